//! Text rendering of a per-country report.

use crate::error::FetchError;
use crate::models::{Coordinates, CountryRecord, HistoricalSeries, NeighborPopulationTable};
use crate::stats::summarize;
use num_format::{Locale, ToFormattedString};
use serde_json::{Value, json};
use std::fmt::Write;

/// Everything shown for one country. The record is always present; the other
/// sections may each have failed on their own.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryReport {
    pub record: CountryRecord,
    /// Where to center the location map; `None` when the facts carried no latlng.
    pub map: Option<Coordinates>,
    /// Empty when the country has no neighbors or none could be fetched.
    pub neighbors: NeighborPopulationTable,
    pub gdp: Result<HistoricalSeries, FetchError>,
    pub population: Result<HistoricalSeries, FetchError>,
    pub fun_fact: Result<String, FetchError>,
}

/// Map a user-provided locale tag to a num-format Locale.
/// Supported tags (case-insensitive): "en", "de", "fr", "es", "it", "pt", "nl" and their
/// regional forms.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Whole part with thousands separators; up to two decimals kept when present.
pub fn format_number(v: f64, locale: &Locale) -> String {
    if !v.is_finite() {
        return "NA".to_string();
    }
    let rounded = (v * 100.0).round() / 100.0;
    let whole = rounded.trunc() as i64;
    let mut out = if whole == 0 && rounded < 0.0 {
        "-0".to_string()
    } else {
        whole.to_formatted_string(locale)
    };
    let frac = (rounded.fract().abs() * 100.0).round() as u32;
    if frac != 0 {
        let digits = format!("{frac:02}");
        out.push_str(locale.decimal());
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// Message shown in place of a report whose record could not be built.
pub fn render_failure(name: &str, err: &FetchError) -> String {
    match err {
        FetchError::NameResolution(_) => format!("Country '{}' not found.", name.trim()),
        other => format!("{name}: {other}"),
    }
}

pub fn render_text(report: &CountryReport, locale_tag: &str) -> String {
    let loc = map_locale(locale_tag);
    let r = &report.record;
    let mut out = String::new();

    let _ = writeln!(out, "== {} ({}) ==", r.name, r.code);
    if !r.flag_url.is_empty() {
        let _ = writeln!(out, "Flag: {}", r.flag_url);
    }
    let _ = writeln!(out, "Capital: {}", r.capital_display());
    let _ = writeln!(
        out,
        "Population: {}",
        r.population
            .map(|p| p.to_formatted_string(loc))
            .unwrap_or_else(|| "unknown".into())
    );
    let _ = writeln!(
        out,
        "Area: {}",
        r.area_km2
            .map(|a| format!("{} sq km", format_number(a, loc)))
            .unwrap_or_else(|| "unknown".into())
    );
    let _ = writeln!(out, "Currency: {}", r.currency_display());
    let _ = writeln!(out, "Official Language(s): {}", r.language_display());
    let _ = writeln!(out, "Time Zone(s): {}", r.timezone_display());
    let _ = writeln!(out, "Neighboring Countries: {}", r.neighbor_display());

    let _ = writeln!(out, "\n-- Country Location --");
    match report.map {
        Some(c) => {
            let _ = writeln!(out, "Latitude {:.2}, Longitude {:.2}", c.latitude, c.longitude);
        }
        None => {
            let _ = writeln!(out, "Could not retrieve map data for this country.");
        }
    }

    let _ = writeln!(out, "\n-- Neighboring Countries Population --");
    if report.neighbors.is_empty() {
        let _ = writeln!(
            out,
            "No data available for neighboring countries' population."
        );
    } else {
        let width = report
            .neighbors
            .rows
            .iter()
            .map(|n| n.country.chars().count())
            .max()
            .unwrap_or(0);
        for n in &report.neighbors.rows {
            let _ = writeln!(
                out,
                "  {:<width$}  {:>15}",
                n.country,
                n.population.to_formatted_string(loc),
            );
        }
    }

    render_series(&mut out, "GDP", &r.name, &report.gdp, loc);
    render_series(&mut out, "Population", &r.name, &report.population, loc);

    let _ = writeln!(out, "\n-- Fun Fact --");
    match &report.fun_fact {
        Ok(fact) => {
            let _ = writeln!(out, "{fact}");
        }
        Err(e) => {
            let _ = writeln!(out, "No fun fact available ({e}).");
        }
    }
    out
}

fn render_series(
    out: &mut String,
    label: &str,
    country: &str,
    series: &Result<HistoricalSeries, FetchError>,
    loc: &Locale,
) {
    let _ = writeln!(out, "\n-- Historical {label} --");
    let summary = series.as_ref().ok().and_then(summarize);
    match summary {
        Some(s) => {
            let _ = writeln!(
                out,
                "{} years ({}-{}), latest {} = {}, min {}, max {}",
                s.count,
                s.first_year,
                s.last_year,
                s.last_year,
                format_number(s.latest, loc),
                format_number(s.min, loc),
                format_number(s.max, loc),
            );
        }
        None => {
            let _ = writeln!(out, "No historical {} data available for {}.", label, country);
        }
    }
}

fn section_json<T: serde::Serialize>(res: &Result<T, FetchError>) -> Value {
    match res {
        Ok(v) => json!({ "ok": v }),
        Err(e) => json!({ "error": { "kind": e.kind(), "message": e.to_string() } }),
    }
}

/// JSON form of a report, with each fallible section as `{"ok": ..}` or `{"error": ..}`.
/// `map` is `null` when there are no coordinates.
pub fn report_to_json(report: &CountryReport) -> Value {
    json!({
        "record": report.record,
        "map": report.map,
        "neighbors": report.neighbors.rows,
        "gdp": section_json(&report.gdp),
        "population": section_json(&report.population),
        "fun_fact": section_json(&report.fun_fact),
    })
}

pub fn failure_to_json(name: &str, err: &FetchError) -> Value {
    json!({
        "name": name,
        "error": { "kind": err.kind(), "message": err.to_string() },
    })
}
