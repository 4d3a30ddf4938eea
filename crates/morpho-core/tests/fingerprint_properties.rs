//! Fingerprint comparison and lifecycle properties.

use morpho_core::prelude::*;
use std::io::Cursor;

fn fingerprint(orientation: Orientation) -> Morphognostic {
    Morphognostic::new(
        orientation,
        EventShape::new(vec![1, 4]).unwrap(),
        21,
        21,
        FingerprintConfig::default(),
    )
    .unwrap()
}

fn feed(f: &mut Morphognostic, ticks: &[(i32, i32, i32, i32)]) {
    for &(scalar, kind, x, y) in ticks {
        f.update(&[Some(scalar), Some(kind)], x, y).unwrap();
    }
}

const TICKS: &[(i32, i32, i32, i32)] = &[
    (5, 2, 10, 10),
    (1, 0, 11, 10),
    (3, 3, 10, 12),
    (2, 1, 9, 9),
];

#[test]
fn compare_is_reflexive() {
    let mut f = fingerprint(Orientation::North);
    feed(&mut f, TICKS);
    assert_eq!(f.compare(&f.clone()).unwrap(), 0.0);
}

#[test]
fn compare_is_symmetric() {
    let mut a = fingerprint(Orientation::North);
    let mut b = fingerprint(Orientation::North);
    feed(&mut a, TICKS);
    feed(&mut b, &[(4, 1, 10, 10), (2, 2, 12, 11)]);
    assert_eq!(a.compare(&b).unwrap(), b.compare(&a).unwrap());
}

#[test]
fn clear_then_replay_matches_fresh() {
    let mut used = fingerprint(Orientation::North);
    feed(&mut used, &[(9, 3, 14, 14), (1, 1, 10, 10)]);
    used.clear();
    feed(&mut used, TICKS);

    let mut fresh = fingerprint(Orientation::North);
    feed(&mut fresh, TICKS);

    assert_eq!(used.compare(&fresh).unwrap(), 0.0);
}

#[test]
fn orientation_is_normalized_out() {
    // The same scene in the agent's frame: facing North with activity one
    // cell to the right maps to facing East with activity one cell below.
    let mut north = fingerprint(Orientation::North);
    north.update(&[Some(5), Some(2)], 11, 10).unwrap();

    let mut east = fingerprint(Orientation::East);
    east.update(&[Some(5), Some(2)], 10, 11).unwrap();

    assert_eq!(north.compare(&east).unwrap(), 0.0);

    // And the distance to an unrelated scene is nonzero.
    let mut other = fingerprint(Orientation::North);
    other.update(&[Some(1), Some(0)], 9, 10).unwrap();
    assert!(north.compare(&other).unwrap() > 0.0);
}

#[test]
fn save_load_round_trip() {
    let mut f = fingerprint(Orientation::West);
    feed(&mut f, TICKS);
    let mut buf = Vec::new();
    f.save(&mut buf).unwrap();
    let g = Morphognostic::load(&mut Cursor::new(&buf)).unwrap();
    assert_eq!(f.compare(&g).unwrap(), 0.0);
    assert_eq!(g.orientation(), Orientation::West);
    assert_eq!(g.config(), f.config());
}

#[test]
fn compare_across_cardinalities_fails() {
    let a = fingerprint(Orientation::North);
    let b = Morphognostic::new(
        Orientation::North,
        EventShape::new(vec![1, 5]).unwrap(),
        21,
        21,
        FingerprintConfig::default(),
    )
    .unwrap();
    assert!(a.compare(&b).is_err());
}

#[test]
fn event_log_is_bounded_by_outermost_duration() {
    let mut f = fingerprint(Orientation::North);
    for i in 0..20 {
        f.update(&[Some(1), Some(0)], 10 + (i % 3), 10).unwrap();
    }
    // max age 3 keeps at most 4 events.
    assert!(f.event_log().len() <= 4);
    assert_eq!(f.max_event_age(), 3);
    assert_eq!(f.event_time(), 20);
}
