mod common;

use common::{FakeTransport, client, france};
use country_stats::facts::{fetch_country, normalize_country, population_of};
use country_stats::{CodeTable, Coordinates, FetchError};
use serde_json::json;

#[test]
fn france_normalizes_into_a_full_record() {
    let table = CodeTable::embedded();
    let rec = normalize_country("France", "FRA", &france(), &table).unwrap();

    assert_eq!(rec.code, "FRA");
    assert_eq!(rec.capital.as_deref(), Some("Paris"));
    assert_eq!(rec.population, Some(67_391_582));
    assert_eq!(rec.area_km2, Some(551_695.0));
    assert_eq!(rec.currency_display(), "EUR");
    assert_eq!(rec.languages, vec!["French"]);
    assert_eq!(rec.timezones, vec!["UTC-10:00", "UTC+01:00"]);
    assert_eq!(rec.flag_url, "https://flagcdn.com/w320/fr.png");
    assert_eq!(
        rec.coordinates,
        Some(Coordinates {
            latitude: 46.0,
            longitude: 2.0
        })
    );
    assert_eq!(
        rec.neighbors,
        vec![
            "Andorra",
            "Belgium",
            "Germany",
            "Italy",
            "Luxembourg",
            "Monaco",
            "Spain",
            "Switzerland"
        ]
    );
}

#[test]
fn unresolvable_and_repeated_border_codes_are_skipped() {
    let table = CodeTable::embedded();
    let body = json!([{
        "capital": ["Belgrade"],
        "borders": ["BIH", "UNK", "HUN", "BIH", ""],
        "latlng": [44.0, 21.0]
    }]);
    let rec = normalize_country("Serbia", "SRB", &body, &table).unwrap();
    assert_eq!(rec.neighbors, vec!["Bosnia and Herzegovina", "Hungary"]);
    assert!(rec.neighbors.iter().all(|n| !n.is_empty()));
}

#[test]
fn missing_optional_fields_become_unknown() {
    let table = CodeTable::embedded();
    let body = json!([{ "latlng": [-75.0, 0.0] }]);
    let rec = normalize_country("Antarctica", "ATA", &body, &table).unwrap();
    assert_eq!(rec.capital, None);
    assert_eq!(rec.capital_display(), "unknown");
    assert_eq!(rec.population, None);
    assert_eq!(rec.area_km2, None);
    assert!(rec.currencies.is_empty());
    assert_eq!(rec.currency_display(), "N/A");
    assert!(rec.neighbors.is_empty());
    assert_eq!(rec.flag_url, "");
}

#[test]
fn absent_latlng_means_no_coordinates() {
    let table = CodeTable::embedded();
    let body = json!([{ "capital": ["Paris"] }]);
    let rec = normalize_country("France", "FRA", &body, &table).unwrap();
    assert_eq!(rec.coordinates, None);
}

#[test]
fn malformed_latlng_is_a_shape_error() {
    let table = CodeTable::embedded();
    for latlng in [json!([46.0]), json!(["north", 2.0]), json!([95.0, 2.0]), json!("46,2")] {
        let body = json!([{ "capital": ["Paris"], "latlng": latlng }]);
        let err = normalize_country("France", "FRA", &body, &table).unwrap_err();
        assert!(matches!(err, FetchError::DataShape(_)), "{latlng}: {err:?}");
    }
}

#[test]
fn wrong_types_are_shape_errors() {
    let table = CodeTable::embedded();
    for body in [
        json!({ "capital": ["Paris"] }),
        json!([]),
        json!(["France"]),
        json!([{ "population": -5 }]),
        json!([{ "population": "many" }]),
        json!([{ "area": -1.0 }]),
        json!([{ "languages": { "fra": 7 } }]),
    ] {
        let err = normalize_country("France", "FRA", &body, &table).unwrap_err();
        assert!(matches!(err, FetchError::DataShape(_)), "{body}: {err:?}");
    }
}

#[test]
fn population_defaults_to_zero() {
    assert_eq!(population_of(&json!([{ "population": 77265 }])).unwrap(), 77265);
    assert_eq!(population_of(&json!([{ "capital": ["Andorra la Vella"] }])).unwrap(), 0);
    assert!(population_of(&json!([])).is_err());
}

#[test]
fn unknown_name_makes_no_request() {
    let fake = FakeTransport::new();
    let table = CodeTable::embedded();
    let err = fetch_country(&client(&fake), &table, "Atlantis").unwrap_err();
    assert_eq!(err, FetchError::NameResolution("Atlantis".into()));
    assert_eq!(fake.call_count(), 0);
}

#[test]
fn fetch_uses_the_alpha3_endpoint() {
    let fake = FakeTransport::new();
    fake.country("FRA", france());
    let table = CodeTable::embedded();
    let rec = fetch_country(&client(&fake), &table, "france").unwrap();
    assert_eq!(rec.capital_display(), "Paris");
    assert_eq!(rec.name, "france");
    assert_eq!(fake.calls(), vec![format!("{}/alpha/FRA", common::FACTS)]);
}

#[test]
fn network_failure_produces_no_record() {
    let fake = FakeTransport::new();
    fake.fail(
        format!("{}/alpha/FRA", common::FACTS),
        FetchError::Network("timed out".into()),
    );
    let table = CodeTable::embedded();
    let err = fetch_country(&client(&fake), &table, "France").unwrap_err();
    assert_eq!(err.kind(), "network");
}
