//! Charts for the report: a line chart per historical series and a bar chart of
//! neighbor populations, rendered to **SVG** or **PNG** (chosen by extension).
//!
//! Text goes through plotters' `ab_glyph` path, which does not discover OS fonts, so a
//! TTF has to be registered first (see [`ensure_font`]).

use crate::models::{HistoricalSeries, NeighborPopulationTable};
use crate::report::{format_number, map_locale};
use anyhow::{Result, anyhow};
use log::debug;
use num_format::Locale;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontFamily, FontStyle};
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const FONT_CANDIDATES: [&str; 5] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static FONT: OnceLock<std::result::Result<PathBuf, String>> = OnceLock::new();

/// Register a "sans-serif" font once per process. `font_path` is tried before the
/// well-known system locations; only the first call's choice takes effect.
pub fn ensure_font(font_path: Option<&Path>) -> Result<()> {
    let res = FONT.get_or_init(|| {
        let candidates = font_path
            .map(Path::to_path_buf)
            .into_iter()
            .chain(FONT_CANDIDATES.iter().map(PathBuf::from));
        for path in candidates {
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            // plotters keeps registered fonts for the life of the process
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            if plotters::style::register_font("sans-serif", FontStyle::Normal, bytes).is_ok() {
                debug!("registered chart font {}", path.display());
                return Ok(path);
            }
        }
        Err("no usable TTF font found (pass --font)".to_string())
    });
    res.as_ref().map(|_| ()).map_err(|e| anyhow!("{}", e))
}

/// Pick a Y-axis scale and its human label based on the overall magnitude.
/// Returns (scale, label), e.g. (1e6, "millions").
pub fn choose_axis_scale(max_abs: f64) -> (f64, &'static str) {
    if max_abs >= 1.0e12 {
        (1.0e12, "trillions")
    } else if max_abs >= 1.0e9 {
        (1.0e9, "billions")
    } else if max_abs >= 1.0e6 {
        (1.0e6, "millions")
    } else if max_abs >= 1.0e3 {
        (1.0e3, "thousands")
    } else {
        (1.0, "")
    }
}

/// Axis bounds for a series: (min_year, max_year, min_val, max_val), widened when flat.
pub fn series_bounds(series: &HistoricalSeries) -> Option<(i32, i32, f64, f64)> {
    let mut min_year = series.years().min()?;
    let mut max_year = series.years().max()?;
    if min_year == max_year {
        min_year -= 1;
        max_year += 1;
    }
    let mut min_val = series.values().fold(f64::INFINITY, f64::min);
    let mut max_val = series.values().fold(f64::NEG_INFINITY, f64::max);
    if (max_val - min_val).abs() < f64::EPSILON {
        min_val -= 1.0;
        max_val += 1.0;
    }
    Some((min_year, max_year, min_val, max_val))
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

/// Line chart of one series. Points are drawn in year order.
pub fn plot_series<P: AsRef<Path>>(
    series: &HistoricalSeries,
    out_path: P,
    width: u32,
    height: u32,
    title: &str,
    y_label: &str,
    locale_tag: &str,
) -> Result<()> {
    let bounds = series_bounds(series).ok_or_else(|| anyhow!("no data to plot"))?;
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let loc = map_locale(locale_tag);

    if is_svg(out_path) {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_series(root, series, bounds, title, y_label, loc)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_series(root, series, bounds, title, y_label, loc)
    }
}

fn draw_series<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    series: &HistoricalSeries,
    (min_year, max_year, min_val, max_val): (i32, i32, f64, f64),
    title: &str,
    y_label: &str,
    loc: &Locale,
) -> Result<()> {
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let (scale, scale_label) = choose_axis_scale(min_val.abs().max(max_val.abs()));
    let y_desc = if scale_label.is_empty() {
        y_label.to_string()
    } else {
        format!("{y_label} ({scale_label})")
    };

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(title, (FontFamily::SansSerif, 24))
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(min_year..max_year, (min_val / scale)..(max_val / scale))
        .map_err(|e| anyhow!("{:?}", e))?;

    let y_label_fmt = |v: &f64| format_number(*v, loc);
    let x_label_fmt = |y: &i32| y.to_string();
    let x_label_count = ((max_year - min_year + 1) as usize).min(12);

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc(y_desc)
        .x_labels(x_label_count)
        .y_labels(10)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, 14))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let color = RGBColor(68, 114, 196);
    let points: Vec<(i32, f64)> = series
        .sorted_by_year()
        .into_iter()
        .map(|o| (o.year, o.value / scale))
        .collect();
    chart
        .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
        .map_err(|e| anyhow!("{:?}", e))?;
    chart
        .draw_series(
            points
                .into_iter()
                .map(|p| Circle::new(p, 3, color.filled())),
        )
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Bar chart of neighbor populations, one bar per row.
pub fn plot_neighbor_populations<P: AsRef<Path>>(
    table: &NeighborPopulationTable,
    out_path: P,
    width: u32,
    height: u32,
    locale_tag: &str,
) -> Result<()> {
    if table.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let loc = map_locale(locale_tag);

    if is_svg(out_path) {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_bars(root, table, loc)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_bars(root, table, loc)
    }
}

fn draw_bars<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    table: &NeighborPopulationTable,
    loc: &Locale,
) -> Result<()> {
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let max_pop = table.rows.iter().map(|r| r.population).max().unwrap_or(0) as f64;
    let (scale, scale_label) = choose_axis_scale(max_pop);
    let y_max = (max_pop / scale).max(1.0) * 1.05;
    let n = table.len();

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            "Population of Neighboring Countries",
            (FontFamily::SansSerif, 24),
        )
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0.0f64..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    let names: Vec<&str> = table.rows.iter().map(|r| r.country.as_str()).collect();
    let x_label_fmt = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() < 1e-6 && idx >= 0.0 {
            names.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
        } else {
            String::new()
        }
    };
    let y_label_fmt = |v: &f64| format_number(*v, loc);
    let y_desc = if scale_label.is_empty() {
        "Population".to_string()
    } else {
        format!("Population ({scale_label})")
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .y_labels(10)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .y_desc(y_desc)
        .label_style((FontFamily::SansSerif, 13))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let color = RGBColor(237, 125, 49);
    chart
        .draw_series(table.rows.iter().enumerate().map(|(i, r)| {
            let x = i as f64;
            Rectangle::new(
                [(x - 0.4, 0.0), (x + 0.4, r.population as f64 / scale)],
                color.filled(),
            )
        }))
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
