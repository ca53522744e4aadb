//! Tests for the in-memory store.

use chrono::{TimeZone, Utc};

use gridpick_core::access::{
    PickOrderAccess, PointsAccess, RaceAccess, RosterAccess, SelectionAccess,
};
use gridpick_core::domain::{DriverId, RaceId, Tier, UserId};
use gridpick_core::error::{EntityKind, StoreError};

use super::*;

fn date(day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, 14, 0, 0).unwrap()
}

/// Two teams (one per tier), two drivers each, two users, two races.
fn fixture() -> MemoryStore {
    let mut store = MemoryStore::new();
    let top = store.add_team("Red Bull", true);
    let bottom = store.add_team("Haas", false);
    store.add_driver("Verstappen", 1, top).unwrap();
    store.add_driver("Lawson", 30, top).unwrap();
    store.add_driver("Ocon", 31, bottom).unwrap();
    store.add_driver("Bearman", 87, bottom).unwrap();
    store.add_user("Alice");
    store.add_user("Bob");
    store.add_race("Bahrain", date(8));
    store.add_race("Jeddah", date(15));
    store
}

#[test]
fn ids_are_unique_across_entity_types() {
    let store = fixture();
    let mut ids: Vec<i64> = store.users().iter().map(|u| u.id.0).collect();
    ids.extend(store.teams().iter().map(|t| t.id.0));
    ids.extend(store.drivers().iter().map(|d| d.id.0));
    ids.extend(store.races().iter().map(|r| r.id.0));
    let count = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), count);
}

#[test]
fn lookup_of_unknown_id_is_not_found() {
    let store = fixture();
    assert_eq!(
        store.user(UserId(999)),
        Err(StoreError::NotFound {
            kind: EntityKind::User,
            id: 999
        })
    );
    assert!(store.race(RaceId(999)).is_err());
    assert!(store.driver(DriverId(999)).is_err());
}

#[test]
fn team_with_drivers_blocks_deletion() {
    let mut store = fixture();
    let team = store.teams()[0].id;
    let err = store.remove_team(team).unwrap_err();
    assert!(matches!(err, StoreError::HasDependents { kind: EntityKind::Team, .. }));
    // Still there.
    assert!(store.team(team).is_ok());
}

#[test]
fn empty_team_can_be_deleted() {
    let mut store = fixture();
    let team = store.add_team("Andretti", false);
    assert_eq!(store.remove_team(team), Ok(()));
    assert!(store.team(team).is_err());
}

#[test]
fn driver_with_selection_blocks_deletion() {
    let mut store = fixture();
    let user = store.users()[0].id;
    let race = store.races()[0].id;
    let driver = store.drivers()[0].id;
    store
        .replace_selection(user, race, Tier::Top, Some(driver))
        .unwrap();

    let err = store.remove_driver(driver).unwrap_err();
    assert_eq!(
        err,
        StoreError::HasDependents {
            kind: EntityKind::Driver,
            id: driver.0,
            dependents: "selections",
        }
    );
}

#[test]
fn driver_with_result_blocks_deletion_and_leaves_state_unchanged() {
    let mut store = fixture();
    let race = store.races()[0].id;
    let driver = store.drivers()[0].id;
    store.set_race_results(race, [(driver, 1)]).unwrap();

    let err = store.remove_driver(driver).unwrap_err();
    assert_eq!(
        err,
        StoreError::HasDependents {
            kind: EntityKind::Driver,
            id: driver.0,
            dependents: "race results",
        }
    );
    assert!(store.driver(driver).is_ok());
    assert_eq!(store.results_for_race(race).len(), 1);
}

#[test]
fn removing_user_cascades_to_selections_and_pick_orders() {
    let mut store = fixture();
    let user = store.users()[0].id;
    let other = store.users()[1].id;
    let race = store.races()[0].id;
    let driver = store.drivers()[0].id;
    store
        .replace_selection(user, race, Tier::Top, Some(driver))
        .unwrap();
    store.store_pick_order(race, &[user, other]);

    store.remove_user(user).unwrap();

    assert!(store.selections_for_race(race).is_empty());
    assert_eq!(store.cached_pick_order(race), Some(vec![other]));
}

#[test]
fn removing_race_cascades_to_results_selections_and_pick_orders() {
    let mut store = fixture();
    let user = store.users()[0].id;
    let race = store.races()[0].id;
    let driver = store.drivers()[0].id;
    store
        .replace_selection(user, race, Tier::Top, Some(driver))
        .unwrap();
    store.set_race_results(race, [(driver, 1)]).unwrap();
    store.store_pick_order(race, &[user]);

    store.remove_race(race).unwrap();

    assert!(store.race(race).is_err());
    assert!(store.results_for_race(race).is_empty());
    assert!(store.selections_for_race(race).is_empty());
    assert_eq!(store.cached_pick_order(race), None);
    // The driver is no longer blocked.
    assert_eq!(store.remove_driver(driver), Ok(()));
}

#[test]
fn replace_selection_keeps_one_pick_per_tier() {
    let mut store = fixture();
    let user = store.users()[0].id;
    let race = store.races()[0].id;
    let drivers = store.drivers();
    let (top_a, top_b, bottom_a) = (drivers[0].id, drivers[1].id, drivers[2].id);

    store
        .replace_selection(user, race, Tier::Top, Some(top_a))
        .unwrap();
    store
        .replace_selection(user, race, Tier::Bottom, Some(bottom_a))
        .unwrap();
    // Swapping the top pick must not disturb the bottom pick.
    store
        .replace_selection(user, race, Tier::Top, Some(top_b))
        .unwrap();

    let picks = store.selections_for_race(race);
    assert_eq!(picks.len(), 2);
    assert_eq!(
        store.selection(user, race, Tier::Top).map(|s| s.driver_id),
        Some(top_b)
    );
    assert_eq!(
        store.selection(user, race, Tier::Bottom).map(|s| s.driver_id),
        Some(bottom_a)
    );
}

#[test]
fn clearing_a_selection_empties_only_that_tier() {
    let mut store = fixture();
    let user = store.users()[0].id;
    let race = store.races()[0].id;
    let drivers = store.drivers();
    store
        .replace_selection(user, race, Tier::Top, Some(drivers[0].id))
        .unwrap();
    store
        .replace_selection(user, race, Tier::Bottom, Some(drivers[2].id))
        .unwrap();

    store.replace_selection(user, race, Tier::Top, None).unwrap();

    assert_eq!(store.selection(user, race, Tier::Top), None);
    assert!(store.selection(user, race, Tier::Bottom).is_some());
}

#[test]
fn set_race_results_replaces_prior_rows() {
    let mut store = fixture();
    let race = store.races()[0].id;
    let drivers = store.drivers();
    store
        .set_race_results(race, [(drivers[0].id, 1), (drivers[1].id, 2)])
        .unwrap();
    store.set_race_results(race, [(drivers[2].id, 1)]).unwrap();

    let results = store.results_for_race(race);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].driver_id, drivers[2].id);
}

#[test]
fn race_closedness_follows_results() {
    let mut store = fixture();
    let race = store.races()[0].id;
    assert!(!store.race_closed(race));
    store
        .set_race_results(race, [(store.drivers()[0].id, 1)])
        .unwrap();
    assert!(store.race_closed(race));
}

#[test]
fn previous_race_picks_latest_before_date_excluding_self() {
    let mut store = fixture();
    let races = store.races();
    let (bahrain, jeddah) = (races[0].id, races[1].id);
    let melbourne = store.add_race("Melbourne", date(22));

    let prev = store.previous_race(date(22), melbourne).unwrap();
    assert_eq!(prev.id, jeddah);
    // The earliest race has no predecessor.
    assert!(store.previous_race(date(8), bahrain).is_none());
}

#[test]
fn races_are_sorted_chronologically_not_by_insertion() {
    let mut store = MemoryStore::new();
    let later = store.add_race("Jeddah", date(15));
    let earlier = store.add_race("Bahrain", date(8));
    let ids: Vec<RaceId> = store.races().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![earlier, later]);
}

#[test]
fn replace_standings_resets_absent_users_to_zero() {
    let mut store = fixture();
    let users = store.users();
    let mut totals = std::collections::BTreeMap::new();
    totals.insert(users[0].id, 43);
    store.replace_standings(&totals);
    store.replace_standings(&std::collections::BTreeMap::new());
    assert!(store.users().iter().all(|u| u.points == 0));
}

#[test]
fn points_table_sparse_update() {
    let mut store = fixture();
    store.update_points_table([(1, 30)]);
    assert_eq!(store.points_table().points_for(1), 30);
    assert_eq!(store.points_table().points_for(2), 18);
}
