// File: crates/chart-core/tests/filter.rs
// Purpose: Slider predicates, defaults and idempotence.

use chart_core::{filter, AxisTriple, ChartError, DataPoint, Dataset, FilterEntry, FilterMode, FilterSpec};

fn dataset() -> Dataset {
    let dims = ["t", "p_a", "m_x", "m_y"].map(String::from).to_vec();
    let points = vec![
        DataPoint::new(vec![0.0, 1.0, 10.0, 0.5]),
        DataPoint::new(vec![1.0, 1.0, 20.0, 0.1]),
        DataPoint::new(vec![2.0, 2.0, 30.0, 0.3]),
        DataPoint::new(vec![3.0, 2.0, 40.0, 0.2]),
    ];
    Dataset::new(dims, points).unwrap()
}

#[test]
fn no_entries_keeps_everything() {
    let ds = dataset();
    let out = filter(&ds, ds.points(), &FilterSpec::new()).unwrap();
    assert_eq!(out.len(), 4);
}

#[test]
fn modes_compare_against_threshold() {
    let ds = dataset();
    let mut spec = FilterSpec::new();
    spec.set("m_x", FilterEntry::new(20.0, FilterMode::AtLeast));
    assert_eq!(filter(&ds, ds.points(), &spec).unwrap().len(), 3);

    spec.set("m_x", FilterEntry::new(20.0, FilterMode::AtMost));
    assert_eq!(filter(&ds, ds.points(), &spec).unwrap().len(), 2);

    spec.set("m_x", FilterEntry::new(30.0, FilterMode::Equal));
    let out = filter(&ds, ds.points(), &spec).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].values()[0], 2.0);
}

#[test]
fn every_entry_must_hold() {
    let ds = dataset();
    let mut spec = FilterSpec::new();
    spec.set("p_a", FilterEntry::new(2.0, FilterMode::Equal));
    spec.set("m_y", FilterEntry::new(0.25, FilterMode::AtLeast));
    let out = filter(&ds, ds.points(), &spec).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].values()[2], 30.0);
}

#[test]
fn equality_is_exact() {
    let ds = Dataset::new(vec!["t".into(), "m_v".into()], vec![DataPoint::new(vec![0.0, 0.1 + 0.2])]).unwrap();
    let mut spec = FilterSpec::new();
    spec.set("m_v", FilterEntry::new(0.3, FilterMode::Equal));
    assert!(filter(&ds, ds.points(), &spec).unwrap().is_empty());
}

#[test]
fn filtering_is_idempotent() {
    let ds = dataset();
    let mut spec = FilterSpec::new();
    spec.set("m_x", FilterEntry::new(15.0, FilterMode::AtLeast));
    spec.set("m_y", FilterEntry::new(0.3, FilterMode::AtMost));
    let once = filter(&ds, ds.points(), &spec).unwrap();
    let twice = filter(&ds, once.iter().copied(), &spec).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn unknown_axis_is_rejected() {
    let ds = dataset();
    let mut spec = FilterSpec::new();
    spec.set("m_nope", FilterEntry::new(0.0, FilterMode::AtLeast));
    assert_eq!(filter(&ds, ds.points(), &spec), Err(ChartError::UnknownAxis("m_nope".into())));
}

#[test]
fn defaults_cover_unplotted_axes_at_their_minimum() {
    let ds = dataset();
    let spec = FilterSpec::defaults_for(&ds, &AxisTriple::new("t", "m_x", "m_y")).unwrap();
    assert_eq!(spec.len(), 1);
    assert_eq!(spec.get("p_a"), Some(&FilterEntry::new(1.0, FilterMode::Equal)));

    let spec = FilterSpec::defaults_for(&ds, &AxisTriple::new("t", "p_a", "m_x")).unwrap();
    assert_eq!(spec.get("m_y"), Some(&FilterEntry::new(0.1, FilterMode::AtLeast)));
}

#[test]
fn modes_parse_and_serialize_as_symbols() {
    assert_eq!(">=".parse::<FilterMode>().unwrap(), FilterMode::AtLeast);
    assert_eq!("≤".parse::<FilterMode>().unwrap(), FilterMode::AtMost);
    assert_eq!("=".parse::<FilterMode>().unwrap(), FilterMode::Equal);
    assert!("~".parse::<FilterMode>().is_err());

    let mut spec = FilterSpec::new();
    spec.set("m_x", FilterEntry::new(2.0, FilterMode::AtMost));
    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(json, serde_json::json!({"m_x": {"value": 2.0, "mode": "<="}}));
}
