//! country_stats
//!
//! Per-country statistics assembled from two public APIs: REST Countries for
//! current facts (capital, population, area, currencies, languages, borders…)
//! and the World Bank Indicators API for historical series. Pairs with the
//! `cstats` CLI.
//!
//! ### Features
//! - Resolve country names to ISO alpha-3 codes and back (embedded ISO 3166-1 table)
//! - Normalize a facts response into a flat [`CountryRecord`]
//! - Fetch indicator time series, dropping years without a value
//! - Populations of neighboring countries
//! - Session-owned memoization so repeated lookups do not hit the network
//! - Text reports, SVG/PNG charts, CSV/JSON export
//!
//! ### Example
//! ```no_run
//! use country_stats::{Config, Session, YearRange};
//!
//! let mut session = Session::new(&Config::default())?;
//! let france = session.country_facts("France")?;
//! assert_eq!(france.code, "FRA");
//! let pop = session.historical_series("FRA", "SP.POP.TOTL", YearRange::new(2000, 2020))?;
//! let neighbors = session.neighbor_populations(&france.neighbors);
//! println!("{} observations, {} neighbors", pop.len(), neighbors.len());
//! # Ok::<(), country_stats::FetchError>(())
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod facts;
pub mod funfacts;
pub mod history;
pub mod models;
pub mod neighbors;
pub mod report;
pub mod resolver;
pub mod session;
pub mod stats;
pub mod storage;
pub mod viz;

pub use api::{Client, Transport};
pub use config::{Config, YearRange};
pub use error::FetchError;
pub use models::{
    Coordinates, CountryRecord, HistoricalSeries, NeighborPopulation, NeighborPopulationTable,
    Observation,
};
pub use report::CountryReport;
pub use resolver::{CodeTable, CountryCodeResolver};
pub use session::Session;
