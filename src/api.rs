//! Synchronous JSON client for the two upstream services:
//!
//! - **REST Countries v3.1**: `GET {facts}/alpha/{CODE}`, one country object wrapped in an array.
//! - **World Bank Indicators v2**:
//!   `GET {indicators}/country/{CODE}/indicator/{ID}?date=S:E&format=json`,
//!   a `[meta, [entry, ...]]` pair.
//!
//! Requests are made exactly once; there is no retry. Transport errors and non-2xx
//! statuses surface as [`FetchError::Network`], undecodable bodies as
//! [`FetchError::DataShape`].
//!
//! The HTTP layer sits behind [`Transport`] so callers (and tests) can swap in canned
//! responses:
//! ```no_run
//! # use country_stats::{Client, Config};
//! let client = Client::new(&Config::default())?;
//! let raw = client.get_country_json("FRA")?;
//! # Ok::<(), country_stats::FetchError>(())
//! ```
use crate::config::{Config, YearRange};
use crate::error::{FetchError, Result};
use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Fetches a URL and decodes the body as JSON.
pub trait Transport: Send + Sync {
    fn get_json(&self, url: &str) -> Result<Value>;
}

/// Blocking `reqwest` transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(Policy::limited(5))
            .user_agent(concat!("country_stats/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|e| FetchError::Network(format!("GET {url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "GET {url}: request failed with HTTP {status}"
            )));
        }
        resp.json::<Value>()
            .map_err(|e| FetchError::shape(format!("decode json from {url}: {e}")))
    }
}

// Allow -, _, . unescaped in codes (common for indicator ids)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(part: &str) -> String {
    percent_encoding::utf8_percent_encode(part.trim(), SAFE).to_string()
}

#[derive(Clone)]
pub struct Client {
    pub facts_base_url: String,
    pub indicators_base_url: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("facts_base_url", &self.facts_base_url)
            .field("indicators_base_url", &self.indicators_base_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Client backed by a real HTTP transport.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_transport(config, HttpTransport::new(config)?))
    }

    pub fn with_transport<T: Transport + 'static>(config: &Config, transport: T) -> Self {
        Self {
            facts_base_url: config.facts_base_url.trim_end_matches('/').to_string(),
            indicators_base_url: config.indicators_base_url.trim_end_matches('/').to_string(),
            transport: Arc::new(transport),
        }
    }

    pub fn facts_url(&self, code: &str) -> String {
        format!("{}/alpha/{}", self.facts_base_url, enc(code))
    }

    pub fn indicator_url(&self, code: &str, indicator: &str, years: YearRange) -> String {
        format!(
            "{}/country/{}/indicator/{}?date={}&format=json&per_page=1000",
            self.indicators_base_url,
            enc(code),
            enc(indicator),
            years.to_query_param()
        )
    }

    /// Raw facts response for one alpha-3 code.
    pub fn get_country_json(&self, code: &str) -> Result<Value> {
        self.transport.get_json(&self.facts_url(code))
    }

    /// Raw indicators response for one code/indicator/year range.
    pub fn get_indicator_json(
        &self,
        code: &str,
        indicator: &str,
        years: YearRange,
    ) -> Result<Value> {
        self.transport
            .get_json(&self.indicator_url(code, indicator, years))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(&Config::default()).expect("reqwest client build")
    }
}
