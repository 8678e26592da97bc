//! Canned-response transport for offline tests.
#![allow(dead_code)]

use country_stats::api::Transport;
use country_stats::{Client, Config, FetchError};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const FACTS: &str = "http://facts.test";
pub const INDICATORS: &str = "http://wb.test";

#[derive(Clone, Default)]
pub struct FakeTransport {
    responses: Arc<Mutex<HashMap<String, Result<Value, FetchError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: impl Into<String>, body: Value) -> &Self {
        self.responses.lock().unwrap().insert(url.into(), Ok(body));
        self
    }

    pub fn fail(&self, url: impl Into<String>, err: FetchError) -> &Self {
        self.responses.lock().unwrap().insert(url.into(), Err(err));
        self
    }

    pub fn country(&self, code: &str, body: Value) -> &Self {
        self.respond(format!("{FACTS}/alpha/{code}"), body)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Transport for FakeTransport {
    fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Network(format!("GET {url}: HTTP 404 Not Found")))
            })
    }
}

pub fn test_config() -> Config {
    Config {
        facts_base_url: FACTS.into(),
        indicators_base_url: INDICATORS.into(),
        ..Config::default()
    }
}

pub fn client(fake: &FakeTransport) -> Client {
    Client::with_transport(&test_config(), fake.clone())
}

/// Trimmed-down REST Countries v3.1 response for France.
pub fn france() -> Value {
    json!([{
        "name": {"common": "France", "official": "French Republic"},
        "capital": ["Paris"],
        "population": 67391582,
        "area": 551695.0,
        "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
        "languages": {"fra": "French"},
        "timezones": ["UTC-10:00", "UTC+01:00"],
        "borders": ["AND", "BEL", "DEU", "ITA", "LUX", "MCO", "ESP", "CHE"],
        "flags": {"png": "https://flagcdn.com/w320/fr.png", "svg": "https://flagcdn.com/fr.svg"},
        "latlng": [46.0, 2.0]
    }])
}

pub fn population_only(pop: u64) -> Value {
    json!([{ "population": pop, "latlng": [0.0, 0.0] }])
}

/// World Bank style response with one entry per (year, value).
pub fn wb_series(code: &str, indicator: &str, points: &[(i32, Option<f64>)]) -> Value {
    let entries: Vec<Value> = points
        .iter()
        .map(|(y, v)| {
            json!({
                "indicator": {"id": indicator, "value": "Population, total"},
                "country": {"id": "XX", "value": "Somewhere"},
                "countryiso3code": code,
                "date": y.to_string(),
                "value": v,
                "unit": "",
                "obs_status": "",
                "decimal": 0
            })
        })
        .collect();
    json!([
        {"page": 1, "pages": 1, "per_page": "1000", "total": entries.len()},
        entries
    ])
}

pub fn wb_url(code: &str, indicator: &str, start: i32, end: i32) -> String {
    format!(
        "{INDICATORS}/country/{code}/indicator/{indicator}\
         ?date={start}:{end}&format=json&per_page=1000"
    )
}
