//! Country facts: resolve a name, fetch the facts API, normalize into a [`CountryRecord`].

use crate::api::Client;
use crate::error::{FetchError, Result};
use crate::models::{Coordinates, CountryRecord, RawCountry};
use crate::resolver::CountryCodeResolver;
use ahash::AHashSet;
use log::{debug, info};
use serde_json::Value;

/// Resolve `name`, fetch its facts and normalize them.
///
/// ### Errors
/// - [`FetchError::NameResolution`] when the name is unknown (no request is made)
/// - [`FetchError::Network`] on transport failure or non-2xx status
/// - [`FetchError::DataShape`] when the response is not a non-empty array of objects
///   or a field has the wrong type
pub fn fetch_country(
    client: &Client,
    resolver: &dyn CountryCodeResolver,
    name: &str,
) -> Result<CountryRecord> {
    let code = resolver.resolve(name)?;
    debug!("resolved '{}' to {}", name, code);
    let response = client.get_country_json(&code)?;
    let record = normalize_country(name.trim(), &code, &response, resolver)?;
    info!(
        "fetched facts for {} ({} neighbors)",
        record.code,
        record.neighbors.len()
    );
    Ok(record)
}

/// The single country object the facts API wraps in an array.
pub fn first_country_object(response: &Value) -> Result<&Value> {
    let arr = response
        .as_array()
        .ok_or_else(|| FetchError::shape("facts response is not a top-level array"))?;
    let first = arr
        .first()
        .ok_or_else(|| FetchError::shape("facts response is an empty array"))?;
    if !first.is_object() {
        return Err(FetchError::shape("facts response element is not an object"));
    }
    Ok(first)
}

/// Population from a facts response; an absent field counts as zero.
pub fn population_of(response: &Value) -> Result<u64> {
    let obj = first_country_object(response)?;
    match obj.get("population") {
        None | Some(Value::Null) => Ok(0),
        Some(v) => v.as_u64().ok_or_else(|| {
            FetchError::shape(format!("population is not a non-negative integer: {v}"))
        }),
    }
}

/// Build a [`CountryRecord`] from a raw facts response.
pub fn normalize_country(
    name: &str,
    code: &str,
    response: &Value,
    resolver: &dyn CountryCodeResolver,
) -> Result<CountryRecord> {
    let obj = first_country_object(response)?;
    let raw: RawCountry = serde_json::from_value(obj.clone())
        .map_err(|e| FetchError::shape(format!("country object: {e}")))?;

    let capital = raw
        .capital
        .and_then(|c| c.into_iter().next())
        .filter(|c| !c.trim().is_empty());

    if let Some(area) = raw.area
        && area < 0.0
    {
        return Err(FetchError::shape(format!("negative area: {area}")));
    }

    let currencies = raw
        .currencies
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();

    let languages = raw
        .languages
        .unwrap_or_default()
        .into_iter()
        .map(|(key, v)| match v {
            Value::String(s) => Ok(s),
            other => Err(FetchError::shape(format!(
                "language '{key}' is not a string: {other}"
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    let neighbors = resolve_borders(raw.borders.as_deref().unwrap_or_default(), resolver);

    let flag_url = raw.flags.and_then(|f| f.png).unwrap_or_default();

    let coordinates = match raw.latlng {
        None => None,
        Some(ll) => Some(coordinates_from(&ll)?),
    };

    Ok(CountryRecord {
        name: name.to_string(),
        code: code.to_string(),
        capital,
        population: raw.population,
        area_km2: raw.area,
        currencies,
        languages,
        timezones: raw.timezones.unwrap_or_default(),
        neighbors,
        flag_url,
        coordinates,
    })
}

/// Map border codes back to names. Unknown codes and repeats are dropped.
pub fn resolve_borders(codes: &[String], resolver: &dyn CountryCodeResolver) -> Vec<String> {
    let mut seen = AHashSet::new();
    let mut out = Vec::with_capacity(codes.len());
    for code in codes {
        match resolver.name_for_code(code) {
            Some(name) => {
                if seen.insert(name.to_string()) {
                    out.push(name.to_string());
                }
            }
            None => debug!("skipping unresolvable border code {}", code),
        }
    }
    out
}

fn coordinates_from(latlng: &[f64]) -> Result<Coordinates> {
    let [latitude, longitude, ..] = latlng else {
        return Err(FetchError::shape(format!(
            "latlng must hold two numbers, got {}",
            latlng.len()
        )));
    };
    if latitude.abs() > 90.0 || longitude.abs() > 180.0 {
        return Err(FetchError::shape(format!(
            "latlng out of range: [{latitude}, {longitude}]"
        )));
    }
    Ok(Coordinates {
        latitude: *latitude,
        longitude: *longitude,
    })
}
