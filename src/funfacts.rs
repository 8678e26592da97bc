//! Local trivia lookup backed by a JSON object of `country name -> fact`.
//!
//! The file is only ever opened for reading.

use crate::error::{FetchError, Result};
use ahash::AHashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const NO_FUN_FACT: &str = "No fun fact available for this country.";

#[derive(Debug, Clone, Default)]
pub struct FunFacts {
    facts: AHashMap<String, String>,
}

impl FunFacts {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| FetchError::Io(format!("{}: {e}", path.display())))?;
        let facts: AHashMap<String, String> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| FetchError::shape(format!("{}: {e}", path.display())))?;
        Ok(Self { facts })
    }

    pub fn from_map(facts: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            facts: facts.into_iter().collect(),
        }
    }

    /// The fact stored under exactly `country` (surrounding whitespace ignored).
    pub fn find(&self, country: &str) -> Option<&str> {
        self.facts.get(country.trim()).map(String::as_str)
    }

    /// The fact for `country`, or [`NO_FUN_FACT`].
    pub fn get(&self, country: &str) -> &str {
        self.find(country).unwrap_or(NO_FUN_FACT)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}
