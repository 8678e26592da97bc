use country_stats::models::{
    HistoricalSeries, NeighborPopulation, NeighborPopulationTable, Observation,
};
use country_stats::storage;
use std::fs;

fn sample(n: usize) -> HistoricalSeries {
    HistoricalSeries {
        country_code: "DEU".into(),
        indicator_id: "SP.POP.TOTL".into(),
        indicator_name: Some("Population, total".into()),
        observations: (0..n)
            .map(|i| Observation {
                year: 2000 + i as i32,
                value: 100.0 + i as f64,
            })
            .collect(),
    }
}

fn row(country: &str, population: u64) -> NeighborPopulation {
    NeighborPopulation {
        country: country.into(),
        population,
    }
}

#[test]
fn save_series_csv_and_json() {
    let rows = sample(3);
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("series.csv");
    storage::save_series_csv(&rows, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("country_code,indicator_id,year,value"));
    assert_eq!(csv_txt.lines().count(), 1 + rows.len());

    let json_path = dir.path().join("series.json");
    storage::save_series_json(&rows, &json_path).unwrap();
    let txt = fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&txt).unwrap();
    assert_eq!(v["observations"].as_array().unwrap().len(), rows.len());
    assert_eq!(v["indicator_name"], "Population, total");
}

#[test]
fn save_neighbors_json() {
    let table = NeighborPopulationTable {
        rows: vec![
            row("Belgium", 11_555_997),
            row("Spain", 47_351_567),
        ],
    };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("n.json");
    storage::save_neighbors_json(&table, &path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 2);
    assert_eq!(v[1]["population"], 47_351_567);
}

// Cells starting with = + - @ would run as formulas when the CSV is opened in a
// spreadsheet; they are written with a leading single quote instead.
#[test]
fn csv_cells_are_prefixed_to_avoid_formulas() {
    let table = NeighborPopulationTable {
        rows: vec![
            row("=HYPERLINK(\"http://evil\")", 1),
            row("@foo", 2),
            row("Spain", 3),
        ],
    };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inj.csv");
    storage::save_neighbors_csv(&table, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let countries: Vec<String> = rdr
        .records()
        .map(|r| r.unwrap().get(0).unwrap().to_string())
        .collect();
    assert!(countries[0].starts_with('\'') && countries[0].contains("=HYPERLINK"));
    assert_eq!(countries[1], "'@foo");
    assert_eq!(countries[2], "Spain");

    let mut series = sample(1);
    series.indicator_id = "+SUM(A1:A9)".into();
    let spath = dir.path().join("s.csv");
    storage::save_series_csv(&series, &spath).unwrap();
    let txt = fs::read_to_string(&spath).unwrap();
    assert!(txt.contains("'+SUM(A1:A9)"));
}
