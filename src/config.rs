//! Runtime configuration shared by the library and the `cstats` binary.

use std::path::PathBuf;
use std::time::Duration;

/// Indicator id for GDP in current US dollars.
pub const GDP_INDICATOR: &str = "NY.GDP.MKTP.CD";
/// Indicator id for total population.
pub const POPULATION_INDICATOR: &str = "SP.POP.TOTL";

pub const DEFAULT_START_YEAR: i32 = 2000;
pub const DEFAULT_END_YEAR: i32 = 2020;

/// Inclusive range of years for historical queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn to_query_param(&self) -> String {
        format!("{}:{}", self.start, self.end)
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::new(DEFAULT_START_YEAR, DEFAULT_END_YEAR)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub facts_base_url: String,
    pub indicators_base_url: String,
    /// Total request timeout.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub fun_facts_path: PathBuf,
    pub years: YearRange,
    /// Number of neighbor lookups in flight at once; 1 means strictly sequential.
    pub neighbor_parallelism: usize,
    /// TTF used for chart text. When unset, a few well-known system locations are probed.
    pub font_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            facts_base_url: "https://restcountries.com/v3.1".into(),
            indicators_base_url: "https://api.worldbank.org/v2".into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            fun_facts_path: PathBuf::from("data/fun_facts.json"),
            years: YearRange::default(),
            neighbor_parallelism: 1,
            font_path: None,
        }
    }
}
