use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Latitude/longitude pair. Either both are known or the record carries none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Flat, normalized view of one facts API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Name the record was requested under.
    pub name: String,
    /// ISO alpha-3 code used for the lookup.
    pub code: String,
    pub capital: Option<String>,
    pub population: Option<u64>,
    pub area_km2: Option<f64>,
    pub currencies: BTreeSet<String>,
    pub languages: Vec<String>,
    pub timezones: Vec<String>,
    /// Neighbor names, resolved from border codes.
    pub neighbors: Vec<String>,
    pub flag_url: String,
    pub coordinates: Option<Coordinates>,
}

impl CountryRecord {
    pub fn capital_display(&self) -> &str {
        self.capital.as_deref().unwrap_or("unknown")
    }

    /// Currency codes joined with ", ", or `N/A` when there are none.
    pub fn currency_display(&self) -> String {
        join_or_na(self.currencies.iter().map(String::as_str))
    }

    pub fn language_display(&self) -> String {
        join_or_na(self.languages.iter().map(String::as_str))
    }

    pub fn timezone_display(&self) -> String {
        join_or_na(self.timezones.iter().map(String::as_str))
    }

    pub fn neighbor_display(&self) -> String {
        join_or_na(self.neighbors.iter().map(String::as_str))
    }
}

fn join_or_na<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let joined = parts.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "N/A".to_string()
    } else {
        joined
    }
}

/// One (year, value) pair of a historical series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    pub value: f64,
}

/// Ordered observations of one indicator for one country. Years with no value
/// in the source are not present; order is the order the API returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub country_code: String,
    pub indicator_id: String,
    pub indicator_name: Option<String>,
    pub observations: Vec<Observation>,
}

impl HistoricalSeries {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.observations.iter().map(|o| o.year)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|o| o.value)
    }

    /// Observations sorted by ascending year (the stored order is left untouched).
    pub fn sorted_by_year(&self) -> Vec<Observation> {
        let mut out = self.observations.clone();
        out.sort_by_key(|o| o.year);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborPopulation {
    pub country: String,
    pub population: u64,
}

/// Populations of the neighbors that could be resolved and fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborPopulationTable {
    pub rows: Vec<NeighborPopulation>,
}

impl NeighborPopulationTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Raw country object from the facts API (element 0 of the response array).
/// Every field is optional; normalization decides what a gap means.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCountry {
    pub capital: Option<Vec<String>>,
    pub population: Option<u64>,
    pub area: Option<f64>,
    pub currencies: Option<Map<String, Value>>,
    pub languages: Option<Map<String, Value>>,
    pub timezones: Option<Vec<String>>,
    pub borders: Option<Vec<String>>,
    pub flags: Option<RawFlags>,
    pub latlng: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFlags {
    pub png: Option<String>,
    pub svg: Option<String>,
}

/// Metadata section returned by the indicators API (position 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub page: u32,
    pub pages: u32,
    /// Some responses encode `per_page` as a string, others as a number.
    /// Accept both and normalize to `u32`.
    #[serde(deserialize_with = "de_u32_from_string_or_number")]
    pub per_page: u32,
    pub total: u32,
}

/// Serde helper: parse `u32` from either a JSON number or a string.
fn de_u32_from_string_or_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U32Visitor;

    impl<'de> Visitor<'de> for U32Visitor {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer representing a non-negative number")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(|_| E::custom("negative value for u32"))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.parse::<u32>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(U32Visitor)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeName {
    pub id: String,
    pub value: String,
}

/// Raw per-year record from the indicators API (position 1 array).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub indicator: Option<CodeName>,
    pub countryiso3code: Option<String>,
    pub date: String,
    #[serde(default)]
    pub value: Option<f64>,
}
