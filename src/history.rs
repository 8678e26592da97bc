//! Historical indicator series from the World Bank API.

use crate::api::Client;
use crate::config::YearRange;
use crate::error::{FetchError, Result};
use crate::models::{Entry, HistoricalSeries, Meta, Observation};
use log::{info, warn};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static INDICATOR_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid indicator regex"));

/// Reject requests the API could never answer before spending a round trip.
pub fn validate_request(code: &str, indicator: &str, years: YearRange) -> Result<()> {
    if code.trim().is_empty() {
        return Err(FetchError::InvalidArgument("empty country code".into()));
    }
    if !INDICATOR_ID.is_match(indicator.trim()) {
        return Err(FetchError::InvalidArgument(format!(
            "invalid indicator id '{indicator}'"
        )));
    }
    if years.start > years.end {
        return Err(FetchError::InvalidArgument(format!(
            "start year {} is after end year {}",
            years.start, years.end
        )));
    }
    Ok(())
}

/// Fetch one indicator for one country over an inclusive year range.
///
/// Single attempt. Years whose value is null are not part of the result.
pub fn fetch_series(
    client: &Client,
    code: &str,
    indicator: &str,
    years: YearRange,
) -> Result<HistoricalSeries> {
    validate_request(code, indicator, years)?;
    let response = client.get_indicator_json(code, indicator, years)?;
    let series = parse_series(code, indicator, &response)?;
    info!(
        "fetched {} {} observations for {} ({}..={})",
        series.len(),
        indicator,
        code,
        years.start,
        years.end
    );
    Ok(series)
}

/// Parse a `[meta, [entry, ...]]` response into a series, dropping null values.
pub fn parse_series(code: &str, indicator: &str, response: &Value) -> Result<HistoricalSeries> {
    // The API returns an array: [Meta, [Entry, ...]] or a "message" object in position 0 on error.
    let arr = response
        .as_array()
        .ok_or_else(|| FetchError::shape("indicators response is not a top-level array"))?;
    let head = arr
        .first()
        .ok_or_else(|| FetchError::shape("indicators response is an empty array"))?;
    if let Some(msg) = head.get("message") {
        return Err(FetchError::shape(format!("world bank api error: {msg}")));
    }
    if let Ok(meta) = serde_json::from_value::<Meta>(head.clone())
        && meta.pages > 1
    {
        warn!(
            "{} {} spans {} pages; only page {} is used, later years may be missing",
            code, indicator, meta.pages, meta.page
        );
    }

    let entries: Vec<Entry> = match arr.get(1) {
        None | Some(Value::Null) => Vec::new(),
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| FetchError::shape(format!("indicator entries: {e}")))?,
    };

    let mut indicator_name = None;
    let mut observations = Vec::with_capacity(entries.len());
    for e in entries {
        if indicator_name.is_none() {
            indicator_name = e.indicator.as_ref().map(|i| i.value.clone());
        }
        let Some(value) = e.value else {
            continue;
        };
        let year = e
            .date
            .trim()
            .parse::<i32>()
            .map_err(|_| FetchError::shape(format!("date is not a year: '{}'", e.date)))?;
        observations.push(Observation { year, value });
    }

    Ok(HistoricalSeries {
        country_code: code.trim().to_ascii_uppercase(),
        indicator_id: indicator.trim().to_string(),
        indicator_name,
        observations,
    })
}
