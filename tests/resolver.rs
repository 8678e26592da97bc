use country_stats::resolver::{CodeTable, CountryCodeResolver, CountryEntry};
use country_stats::FetchError;
use std::collections::HashSet;

#[test]
fn embedded_table_is_complete_and_unique() {
    let table = CodeTable::embedded();
    assert_eq!(table.len(), 249);
    let codes: HashSet<&str> = table.entries().iter().map(|e| e.alpha3.as_str()).collect();
    assert_eq!(codes.len(), table.len());
    assert!(table.entries().iter().all(|e| e.alpha3.len() == 3 && e.alpha2.len() == 2));
}

#[test]
fn name_to_code_and_back() {
    let table = CodeTable::embedded();
    assert_eq!(table.code_for_name("France"), Some("FRA"));
    assert_eq!(table.code_for_name("  germany "), Some("DEU"));
    assert_eq!(table.name_for_code("FRA"), Some("France"));
    assert_eq!(table.name_for_code("che"), Some("Switzerland"));
}

#[test]
fn common_names_resolve_to_canonical() {
    let table = CodeTable::embedded();
    assert_eq!(table.code_for_name("Bolivia"), Some("BOL"));
    assert_eq!(table.name_for_code("BOL"), Some("Bolivia, Plurinational State of"));
    assert_eq!(table.code_for_name("Russia"), Some("RUS"));
}

#[test]
fn unknown_names_and_codes() {
    let table = CodeTable::embedded();
    assert_eq!(table.code_for_name("Atlantis"), None);
    // Kosovo's code used by the facts API is not an ISO assignment
    assert_eq!(table.name_for_code("UNK"), None);
    // alpha-2 is not accepted where an alpha-3 code is expected
    assert_eq!(table.name_for_code("FR"), None);
    assert_eq!(
        table.resolve("Atlantis"),
        Err(FetchError::NameResolution("Atlantis".into()))
    );
}

#[test]
fn lookup_accepts_names_and_codes() {
    let table = CodeTable::embedded();
    assert_eq!(table.lookup("fr").map(|e| e.alpha3.as_str()), Some("FRA"));
    assert_eq!(table.lookup("FRA").map(|e| e.name.as_str()), Some("France"));
    assert_eq!(table.lookup("france").map(|e| e.numeric), Some(250));
}

#[test]
fn custom_table_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.json");
    let rows = vec![CountryEntry {
        name: "Freedonia".into(),
        alpha2: "FD".into(),
        alpha3: "FDN".into(),
        numeric: 999,
        common_name: None,
    }];
    std::fs::write(&path, serde_json::to_string(&rows).unwrap()).unwrap();
    let table = CodeTable::from_json_file(&path).unwrap();
    assert_eq!(table.code_for_name("freedonia"), Some("FDN"));
    assert_eq!(table.code_for_name("France"), None);

    std::fs::write(&path, "{not json").unwrap();
    assert!(matches!(
        CodeTable::from_json_file(&path),
        Err(FetchError::DataShape(_))
    ));
}
