//! Neighbor populations for the bar chart.

use crate::api::Client;
use crate::error::{FetchError, Result};
use crate::facts::population_of;
use crate::models::{NeighborPopulation, NeighborPopulationTable};
use crate::resolver::CountryCodeResolver;
use log::debug;
use std::thread;

/// Outcome of a neighbor sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborFetch {
    pub table: NeighborPopulationTable,
    /// Neighbors dropped for a network or response-shape failure. Unknown
    /// names are not counted: they fail the same way every time.
    pub transient_failures: usize,
}

impl NeighborFetch {
    pub fn is_complete(&self) -> bool {
        self.transient_failures == 0
    }
}

/// Fetch the population of every neighbor in `neighbors`.
///
/// Each neighbor costs one facts request. A neighbor that cannot be resolved or
/// fetched is left out of the table without an error. Rows keep the input order.
///
/// With `parallelism > 1` lookups run in scoped threads, at most `parallelism`
/// at a time; `0` and `1` both mean one after another.
pub fn neighbor_populations(
    client: &Client,
    resolver: &dyn CountryCodeResolver,
    neighbors: &[String],
    parallelism: usize,
) -> NeighborPopulationTable {
    fetch_neighbors(client, resolver, neighbors, parallelism).table
}

/// Same as [`neighbor_populations`], also counting drops worth retrying later.
pub fn fetch_neighbors(
    client: &Client,
    resolver: &dyn CountryCodeResolver,
    neighbors: &[String],
    parallelism: usize,
) -> NeighborFetch {
    let mut results: Vec<Result<NeighborPopulation>> = Vec::with_capacity(neighbors.len());
    if parallelism <= 1 {
        results.extend(
            neighbors
                .iter()
                .map(|name| population_row(client, resolver, name)),
        );
    } else {
        for chunk in neighbors.chunks(parallelism) {
            thread::scope(|s| {
                let handles: Vec<_> = chunk
                    .iter()
                    .map(|name| s.spawn(move || population_row(client, resolver, name)))
                    .collect();
                for (h, name) in handles.into_iter().zip(chunk) {
                    results.push(h.join().unwrap_or_else(|_| {
                        Err(FetchError::Network(format!("lookup for '{name}' panicked")))
                    }));
                }
            });
        }
    }

    let mut out = NeighborFetch::default();
    for (name, res) in neighbors.iter().zip(results) {
        match res {
            Ok(row) => out.table.rows.push(row),
            Err(e) => {
                debug!("dropping neighbor '{}': {}", name, e);
                if !matches!(e, FetchError::NameResolution(_)) {
                    out.transient_failures += 1;
                }
            }
        }
    }
    out
}

fn population_row(
    client: &Client,
    resolver: &dyn CountryCodeResolver,
    name: &str,
) -> Result<NeighborPopulation> {
    let code = resolver.resolve(name)?;
    let response = client.get_country_json(&code)?;
    Ok(NeighborPopulation {
        country: name.to_string(),
        population: population_of(&response)?,
    })
}
