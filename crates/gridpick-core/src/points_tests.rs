//! Tests for the points table.

use crate::points::{PointsTable, MAX_POSITION};

#[test]
fn seed_table_matches_official_scheme() {
    let table = PointsTable::default();
    let expected = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];
    for (i, points) in expected.iter().enumerate() {
        assert_eq!(table.points_for(i as u32 + 1), *points);
    }
    for position in 11..=MAX_POSITION {
        assert_eq!(table.points_for(position), 0);
    }
}

#[test]
fn unmapped_position_awards_zero() {
    let table = PointsTable::from_pairs([(1, 10)]);
    assert_eq!(table.points_for(2), 0);
    assert_eq!(table.points_for(0), 0);
}

#[test]
fn sparse_update_keeps_prior_values() {
    let mut table = PointsTable::default();
    table.apply([(1, 30), (3, 20)]);
    assert_eq!(table.points_for(1), 30);
    assert_eq!(table.points_for(2), 18);
    assert_eq!(table.points_for(3), 20);
}

#[test]
fn out_of_range_positions_are_ignored() {
    let mut table = PointsTable::default();
    table.apply([(0, 99), (MAX_POSITION + 1, 99)]);
    assert_eq!(table.points_for(0), 0);
    assert_eq!(table.points_for(MAX_POSITION + 1), 0);
}
