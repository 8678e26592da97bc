//! A session owns the client, the lookup table and the memo caches, and assembles
//! per-country reports whose sections fail independently.

use crate::api::Client;
use crate::cache::Memo;
use crate::config::{Config, GDP_INDICATOR, POPULATION_INDICATOR, YearRange};
use crate::error::Result;
use crate::facts::fetch_country;
use crate::funfacts::{FunFacts, NO_FUN_FACT};
use crate::history::fetch_series;
use crate::models::{CountryRecord, HistoricalSeries, NeighborPopulationTable};
use crate::neighbors::fetch_neighbors;
use crate::report::CountryReport;
use crate::resolver::{CodeTable, CountryCodeResolver};
use log::{debug, info, warn};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SeriesKey {
    code: String,
    indicator: String,
    years: YearRange,
}

/// Aggregate hit/miss counters over every memoized operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

pub struct Session {
    client: Client,
    resolver: Box<dyn CountryCodeResolver>,
    fun_facts_path: PathBuf,
    fun_facts: Option<FunFacts>,
    neighbor_parallelism: usize,
    facts: Memo<String, CountryRecord>,
    series: Memo<SeriesKey, HistoricalSeries>,
    neighbors: Memo<Vec<String>, NeighborPopulationTable>,
    trivia: Memo<String, String>,
}

impl Session {
    /// Session with an HTTP client and the embedded country table.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_parts(
            config,
            Client::new(config)?,
            Box::new(CodeTable::embedded()),
        ))
    }

    pub fn with_parts(
        config: &Config,
        client: Client,
        resolver: Box<dyn CountryCodeResolver>,
    ) -> Self {
        Self {
            client,
            resolver,
            fun_facts_path: config.fun_facts_path.clone(),
            fun_facts: None,
            neighbor_parallelism: config.neighbor_parallelism,
            facts: Memo::new(),
            series: Memo::new(),
            neighbors: Memo::new(),
            trivia: Memo::new(),
        }
    }

    /// Use an already loaded fun-fact table instead of reading the configured file.
    pub fn with_fun_facts(mut self, facts: FunFacts) -> Self {
        self.fun_facts = Some(facts);
        self
    }

    pub fn resolver(&self) -> &dyn CountryCodeResolver {
        self.resolver.as_ref()
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn country_facts(&mut self, name: &str) -> Result<CountryRecord> {
        let (client, resolver) = (&self.client, self.resolver.as_ref());
        self.facts.get_or_try_insert_with(name.trim().to_string(), || {
            fetch_country(client, resolver, name)
        })
    }

    pub fn historical_series(
        &mut self,
        code: &str,
        indicator: &str,
        years: YearRange,
    ) -> Result<HistoricalSeries> {
        let key = SeriesKey {
            code: code.trim().to_ascii_uppercase(),
            indicator: indicator.trim().to_string(),
            years,
        };
        let client = &self.client;
        self.series
            .get_or_try_insert_with(key, || fetch_series(client, code, indicator, years))
    }

    /// Populations of `neighbors`; failed lookups are simply missing from the table.
    ///
    /// A table is only remembered when no neighbor was lost to a network or
    /// response-shape error, so an incomplete table is fetched again next time.
    pub fn neighbor_populations(&mut self, neighbors: &[String]) -> NeighborPopulationTable {
        let (client, resolver, parallelism) = (
            &self.client,
            self.resolver.as_ref(),
            self.neighbor_parallelism,
        );
        let table = self.neighbors.get_or_try_insert_with(neighbors.to_vec(), || {
            let fetched = fetch_neighbors(client, resolver, neighbors, parallelism);
            if fetched.is_complete() {
                Ok(fetched.table)
            } else {
                debug!(
                    "{} neighbor lookup(s) failed; table not cached",
                    fetched.transient_failures
                );
                Err(fetched.table)
            }
        });
        table.unwrap_or_else(|partial| partial)
    }

    /// Fun fact for a country name, code or alias.
    ///
    /// The name is mapped to its canonical table name first, so "france", "FRA"
    /// and "France" share one entry. Names the table does not know are looked up
    /// as given.
    pub fn fun_fact(&mut self, name: &str) -> Result<String> {
        let key = self.canonical_name(name);
        let loaded = match self.fun_facts.take() {
            Some(f) => f,
            None => FunFacts::load(&self.fun_facts_path)?,
        };
        let facts = &*self.fun_facts.insert(loaded);
        self.trivia.get_or_try_insert_with(key.clone(), || {
            let fact = facts.find(&key).or_else(|| facts.find(name));
            Ok(fact.unwrap_or(NO_FUN_FACT).to_string())
        })
    }

    fn canonical_name(&self, name: &str) -> String {
        let resolver = self.resolver.as_ref();
        resolver
            .code_for_name(name)
            .or_else(|| resolver.name_for_code(name).map(|_| name.trim()))
            .and_then(|code| resolver.name_for_code(code))
            .unwrap_or(name.trim())
            .to_string()
    }

    /// Build the full report for one country.
    ///
    /// Returns `Err` only when the country record itself cannot be built; every
    /// other section carries its own result.
    pub fn report(&mut self, name: &str, years: YearRange) -> Result<CountryReport> {
        let record = self.country_facts(name)?;
        let neighbors = self.neighbor_populations(&record.neighbors);
        let gdp = self.historical_series(&record.code, GDP_INDICATOR, years);
        let population = self.historical_series(&record.code, POPULATION_INDICATOR, years);
        let canonical = self
            .resolver
            .name_for_code(&record.code)
            .unwrap_or(name.trim())
            .to_string();
        let fun_fact = self.fun_fact(&canonical);
        for (section, err) in [
            ("gdp", gdp.as_ref().err()),
            ("population", population.as_ref().err()),
            ("fun fact", fun_fact.as_ref().err()),
        ] {
            if let Some(e) = err {
                warn!("{}: {} section unavailable: {}", record.code, section, e);
            }
        }
        if record.coordinates.is_none() {
            warn!("{}: map section unavailable: no coordinates", record.code);
        }
        Ok(CountryReport {
            map: record.coordinates,
            record,
            neighbors,
            gdp,
            population,
            fun_fact,
        })
    }

    /// Reports for several countries, one after another. A failure for one
    /// country never stops the next.
    pub fn reports(
        &mut self,
        names: &[String],
        years: YearRange,
    ) -> Vec<(String, Result<CountryReport>)> {
        names
            .iter()
            .map(|name| {
                let res = self.report(name, years);
                match &res {
                    Ok(r) => info!("report ready for {} ({})", name, r.record.code),
                    Err(e) => warn!("no report for {}: {}", name, e),
                }
                (name.clone(), res)
            })
            .collect()
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.facts.hits()
                + self.series.hits()
                + self.neighbors.hits()
                + self.trivia.hits(),
            misses: self.facts.misses()
                + self.series.misses()
                + self.neighbors.misses()
                + self.trivia.misses(),
            entries: self.facts.len()
                + self.series.len()
                + self.neighbors.len()
                + self.trivia.len(),
        }
    }
}
