//! Store lifecycle tests: dedup, query, persistence, dataset export.

use morpho_core::prelude::*;
use morpho_memory::prelude::*;

fn fingerprint_with(value: i32, kind: i32) -> Morphognostic {
    let mut f = Morphognostic::new(
        Orientation::North,
        EventShape::new(vec![1, 4]).unwrap(),
        21,
        21,
        FingerprintConfig::default(),
    )
    .unwrap();
    f.update(&[Some(value), Some(kind)], 10, 10).unwrap();
    f
}

#[test]
fn insert_then_query_round_trip() {
    let mut store = MetamorphStore::default();
    store
        .insert(Metamorph::new(fingerprint_with(5, 2), 1).with_response_name("forage"))
        .unwrap();
    store
        .insert(Metamorph::new(fingerprint_with(2, 0), 4).with_response_name("return"))
        .unwrap();

    let nearest = store.query_nearest(&fingerprint_with(5, 2)).unwrap().unwrap();
    assert_eq!(nearest.distance, 0.0);
    assert_eq!(nearest.metamorph.response, 1);
    assert_eq!(nearest.metamorph.response_name, "forage");
}

#[test]
fn dedup_respects_threshold_boundary() {
    let mut store = MetamorphStore::default();
    store.insert(Metamorph::new(fingerprint_with(5, 2), 1)).unwrap();
    // Zero distance <= zero threshold: discarded.
    assert!(!store.insert(Metamorph::new(fingerprint_with(5, 2), 9)).unwrap());
    // Any positive distance beats a zero threshold: kept.
    assert!(store.insert(Metamorph::new(fingerprint_with(5, 3), 2)).unwrap());
    assert_eq!(store.len(), 2);
}

#[test]
fn query_against_mismatched_geometry_fails() {
    let mut store = MetamorphStore::default();
    store.insert(Metamorph::new(fingerprint_with(5, 2), 1)).unwrap();

    let probe = Morphognostic::new(
        Orientation::North,
        EventShape::new(vec![1]).unwrap(),
        21,
        21,
        FingerprintConfig::default(),
    )
    .unwrap();
    assert!(store.query_nearest(&probe).is_err());
}

#[test]
fn file_round_trip_restores_cases() {
    let mut store = MetamorphStore::new(0.5);
    store
        .insert(Metamorph::new(fingerprint_with(5, 2), 1).with_response_name("forage"))
        .unwrap();
    store
        .insert(Metamorph::new(fingerprint_with(1, 1), 2).with_effect_indexes(vec![3]))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metamorphs.bin");
    store.save_file(&path).unwrap();

    let loaded = MetamorphStore::load_file(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.equivalence_distance(), 0.5);
    for (a, b) in store.iter().zip(loaded.iter()) {
        assert!(a.equivalent(b).unwrap());
        assert_eq!(a.response_name, b.response_name);
        assert_eq!(a.effect_indexes, b.effect_indexes);
    }
}

#[test]
fn empty_file_round_trip_is_a_successful_empty_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.bin");
    MetamorphStore::default().save_file(&path).unwrap();

    let loaded = MetamorphStore::load_file(&path).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn truncated_store_file_is_an_error() {
    let mut store = MetamorphStore::default();
    store.insert(Metamorph::new(fingerprint_with(5, 2), 1)).unwrap();
    let mut buf = Vec::new();
    store.save(&mut buf).unwrap();
    buf.truncate(buf.len() - 3);
    assert!(MetamorphStore::load(&mut std::io::Cursor::new(&buf)).is_err());
}

#[test]
fn dataset_export_writes_readable_json() {
    let mut store = MetamorphStore::default();
    store
        .insert(Metamorph::new(fingerprint_with(5, 2), 1).with_response_name("forage"))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dataset.json");
    write_dataset(&store, &path).unwrap();

    let dataset = read_dataset(&path).unwrap();
    assert_eq!(dataset.metadata.case_count, 1);
    assert_eq!(dataset.cases[0].response, 1);
    assert_eq!(
        dataset.cases[0].features.len(),
        dataset.metadata.feature_width
    );
}

#[test]
fn stored_cases_survive_live_mutation() {
    let mut live = fingerprint_with(5, 2);
    let mut store = MetamorphStore::default();
    store.insert(Metamorph::new(live.clone(), 1)).unwrap();

    live.update(&[Some(9), Some(0)], 12, 12).unwrap();
    live.set_orientation(Orientation::South);

    let reference = Metamorph::new(fingerprint_with(5, 2), 1);
    assert!(store.get(0).unwrap().equivalent(&reference).unwrap());
}
