use crate::models::{HistoricalSeries, NeighborPopulationTable};
use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Prefix cells that a spreadsheet would evaluate as a formula.
fn sanitize_cell(s: &str) -> Cow<'_, str> {
    if s.starts_with(['=', '+', '-', '@']) {
        Cow::Owned(format!("'{s}"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Save a series as CSV with header `country_code,indicator_id,year,value`.
pub fn save_series_csv<P: AsRef<Path>>(series: &HistoricalSeries, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.serialize(("country_code", "indicator_id", "year", "value"))?;
    for o in &series.observations {
        wtr.serialize((
            sanitize_cell(&series.country_code),
            sanitize_cell(&series.indicator_id),
            o.year,
            o.value,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save neighbor populations as CSV with header `country,population`.
pub fn save_neighbors_csv<P: AsRef<Path>>(table: &NeighborPopulationTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.serialize(("country", "population"))?;
    for row in &table.rows {
        wtr.serialize((sanitize_cell(&row.country), row.population))?;
    }
    wtr.flush()?;
    Ok(())
}

fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, value)?;
    w.flush()?;
    Ok(())
}

/// Save a series as pretty JSON.
pub fn save_series_json<P: AsRef<Path>>(series: &HistoricalSeries, path: P) -> Result<()> {
    save_json(series, path)
}

/// Save neighbor populations as a pretty JSON array.
pub fn save_neighbors_json<P: AsRef<Path>>(table: &NeighborPopulationTable, path: P) -> Result<()> {
    save_json(&table.rows, path)
}

/// Save a series, choosing CSV or JSON from the file extension (default CSV).
pub fn save_series<P: AsRef<Path>>(series: &HistoricalSeries, path: P) -> Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv")
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => save_series_json(series, path),
        "csv" => save_series_csv(series, path),
        other => anyhow::bail!("unsupported format: {}", other),
    }
}
