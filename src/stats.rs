use crate::models::HistoricalSeries;
use serde::{Deserialize, Serialize};

/// Summary statistics for one series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub country_code: String,
    pub indicator_id: String,
    pub count: usize,
    pub first_year: i32,
    pub last_year: i32,
    /// Value of the most recent year.
    pub latest: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Compute summary statistics; `None` for an empty series.
pub fn summarize(series: &HistoricalSeries) -> Option<Summary> {
    let by_year = series.sorted_by_year();
    let first = by_year.first()?;
    let last = by_year.last()?;

    let mut vals: Vec<f64> = series.values().collect();
    vals.sort_by(f64::total_cmp);
    let count = vals.len();
    let mean = vals.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 1 {
        vals[count / 2]
    } else {
        (vals[count / 2 - 1] + vals[count / 2]) / 2.0
    };

    Some(Summary {
        country_code: series.country_code.clone(),
        indicator_id: series.indicator_id.clone(),
        count,
        first_year: first.year,
        last_year: last.year,
        latest: last.value,
        min: vals[0],
        max: vals[count - 1],
        mean,
        median,
    })
}
