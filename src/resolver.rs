//! Country name ⇄ ISO 3166-1 alpha-3 lookup.
//!
//! The default table is embedded from `data/iso3166.json`. Name lookups are
//! case-insensitive and also accept a country's common name (e.g. "Bolivia"
//! for "Bolivia, Plurinational State of"); reverse lookups always return the
//! canonical ISO short name.

use crate::error::{FetchError, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

const EMBEDDED_TABLE: &str = include_str!("../data/iso3166.json");

/// Maps human-readable country names to alpha-3 codes and back.
pub trait CountryCodeResolver: Send + Sync {
    /// Alpha-3 code for a country name, if known.
    fn code_for_name(&self, name: &str) -> Option<&str>;
    /// Canonical country name for an alpha-3 code, if known.
    fn name_for_code(&self, code: &str) -> Option<&str>;

    fn resolve(&self, name: &str) -> Result<String> {
        self.code_for_name(name)
            .map(str::to_owned)
            .ok_or_else(|| FetchError::NameResolution(name.trim().to_string()))
    }
}

/// One row of the lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryEntry {
    pub name: String,
    pub alpha2: String,
    pub alpha3: String,
    pub numeric: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
}

/// In-memory lookup table with folded-name and code indexes.
#[derive(Debug, Clone)]
pub struct CodeTable {
    entries: Vec<CountryEntry>,
    by_name: AHashMap<String, usize>,
    by_code: AHashMap<String, usize>,
}

fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

impl CodeTable {
    /// The embedded ISO 3166-1 table.
    pub fn embedded() -> Self {
        let entries: Vec<CountryEntry> =
            serde_json::from_str(EMBEDDED_TABLE).expect("embedded iso3166 table");
        Self::from_entries(entries)
    }

    /// Load a table from a JSON array of [`CountryEntry`] rows.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let entries: Vec<CountryEntry> = serde_json::from_str(&text)
            .map_err(|e| FetchError::shape(format!("country table: {e}")))?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: Vec<CountryEntry>) -> Self {
        let mut by_name = AHashMap::with_capacity(entries.len() * 2);
        let mut by_code = AHashMap::with_capacity(entries.len() * 2);
        for (idx, e) in entries.iter().enumerate() {
            by_name.entry(fold(&e.name)).or_insert(idx);
            if let Some(common) = &e.common_name {
                by_name.entry(fold(common)).or_insert(idx);
            }
            by_code.entry(e.alpha3.to_ascii_uppercase()).or_insert(idx);
            by_code.entry(e.alpha2.to_ascii_uppercase()).or_insert(idx);
        }
        Self {
            entries,
            by_name,
            by_code,
        }
    }

    pub fn entries(&self) -> &[CountryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical names, in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Look up an entry by name or by alpha-2/alpha-3 code.
    pub fn lookup(&self, query: &str) -> Option<&CountryEntry> {
        self.by_name
            .get(&fold(query))
            .or_else(|| self.by_code.get(&query.trim().to_ascii_uppercase()))
            .map(|&idx| &self.entries[idx])
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::embedded()
    }
}

impl CountryCodeResolver for CodeTable {
    fn code_for_name(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(&fold(name))
            .map(|&idx| self.entries[idx].alpha3.as_str())
    }

    fn name_for_code(&self, code: &str) -> Option<&str> {
        let code = code.trim().to_ascii_uppercase();
        if code.len() != 3 {
            return None;
        }
        self.by_code
            .get(&code)
            .map(|&idx| self.entries[idx].name.as_str())
    }
}
