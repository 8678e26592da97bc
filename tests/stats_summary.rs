use country_stats::models::{HistoricalSeries, Observation};
use country_stats::stats::summarize;

fn series(points: &[(i32, f64)]) -> HistoricalSeries {
    HistoricalSeries {
        country_code: "AAA".into(),
        indicator_id: "IND1".into(),
        indicator_name: None,
        observations: points
            .iter()
            .map(|&(year, value)| Observation { year, value })
            .collect(),
    }
}

#[test]
fn summary_even_count_uses_middle_pair() {
    // Newest-first, as the indicators API returns them
    let s = summarize(&series(&[(2021, 4.0), (2020, 3.0), (2019, 2.0), (2018, 1.0)])).unwrap();
    assert_eq!(s.count, 4);
    assert_eq!(s.first_year, 2018);
    assert_eq!(s.last_year, 2021);
    assert_eq!(s.latest, 4.0);
    assert_eq!(s.min, 1.0);
    assert_eq!(s.max, 4.0);
    assert!((s.mean - 2.5).abs() < 1e-9);
    assert!((s.median - 2.5).abs() < 1e-9);
}

#[test]
fn summary_odd_count() {
    let s = summarize(&series(&[(2018, 10.0), (2020, 30.0), (2019, 50.0)])).unwrap();
    assert_eq!(s.count, 3);
    assert_eq!(s.latest, 30.0);
    assert_eq!(s.median, 30.0);
    assert_eq!(s.mean, 30.0);
}

#[test]
fn empty_series_has_no_summary() {
    assert!(summarize(&series(&[])).is_none());
}
