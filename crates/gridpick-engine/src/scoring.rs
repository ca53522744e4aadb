//! Scoring engine: per-race points and cumulative standings.

use std::collections::BTreeMap;

use gridpick_core::access::{PointsAccess, RaceAccess, RosterAccess, SelectionAccess};
use gridpick_core::domain::{RaceId, UserId};

/// Computes each user's points for one race.
///
/// Returns an empty map when the race has no recorded results; callers must
/// treat that as "no points awarded", not an error. Only users with at least
/// one processed selection appear in the map; callers needing the full
/// roster union with [`RosterAccess::users`].
///
/// A selected driver with no result contributes 0; a result at a position
/// the points table does not map also contributes 0.
pub fn points_for_race<S>(store: &S, race: RaceId) -> BTreeMap<UserId, i64>
where
    S: RaceAccess + SelectionAccess + PointsAccess,
{
    let mut totals = BTreeMap::new();

    let results = store.results_for_race(race);
    if results.is_empty() {
        return totals;
    }
    let positions: BTreeMap<_, _> = results
        .iter()
        .map(|r| (r.driver_id, r.position))
        .collect();
    let table = store.points_table();

    for selection in store.selections_for_race(race) {
        let entry = totals.entry(selection.user_id).or_insert(0);
        if let Some(position) = positions.get(&selection.driver_id) {
            *entry += table.points_for(*position);
        }
    }
    totals
}

/// Rebuilds every user's cumulative points from scratch.
///
/// Totals are computed into a scratch map (every user starting at 0, every
/// race's contribution added) and swapped into the store in one pass, so a
/// failure part-way never leaves half-updated standings. Idempotent, and
/// independent of race iteration order since addition commutes.
///
/// Must run after any mutation that can change scoring: recording, editing,
/// or deleting results, or deleting a race.
pub fn recompute_standings<S>(store: &mut S) -> BTreeMap<UserId, i64>
where
    S: RosterAccess + RaceAccess + SelectionAccess + PointsAccess,
{
    let mut totals: BTreeMap<UserId, i64> =
        store.users().iter().map(|u| (u.id, 0)).collect();
    for race in store.races() {
        for (user, points) in points_for_race(store, race.id) {
            if let Some(total) = totals.get_mut(&user) {
                *total += points;
            }
        }
    }
    tracing::debug!(users = totals.len(), "rebuilt standings");
    store.replace_standings(&totals);
    totals
}

/// Per-race points sorted for display: descending by points, user ID as a
/// stable secondary key.
///
/// A read view over [`points_for_race`]; the stable tie-break here is a
/// display concern and has no bearing on pick-order fairness.
pub fn race_leaderboard<S>(store: &S, race: RaceId) -> Vec<(UserId, i64)>
where
    S: RaceAccess + SelectionAccess + PointsAccess,
{
    let mut rows: Vec<(UserId, i64)> = points_for_race(store, race).into_iter().collect();
    rows.sort_by_key(|(user, points)| (std::cmp::Reverse(*points), *user));
    rows
}

/// Season standings with a per-race breakdown for every user.
///
/// Rows are sorted descending by total (user ID as secondary key); the inner
/// map holds each race's contribution, 0 for unscored races.
pub fn season_breakdown<S>(store: &S) -> Vec<(UserId, i64, BTreeMap<RaceId, i64>)>
where
    S: RosterAccess + RaceAccess + SelectionAccess + PointsAccess,
{
    let races = store.races();
    let per_race: Vec<(RaceId, BTreeMap<UserId, i64>)> = races
        .iter()
        .map(|race| (race.id, points_for_race(store, race.id)))
        .collect();

    let mut rows: Vec<(UserId, i64, BTreeMap<RaceId, i64>)> = store
        .users()
        .iter()
        .map(|user| {
            let mut breakdown = BTreeMap::new();
            let mut total = 0;
            for (race, totals) in &per_race {
                let points = totals.get(&user.id).copied().unwrap_or(0);
                breakdown.insert(*race, points);
                total += points;
            }
            (user.id, total, breakdown)
        })
        .collect();
    rows.sort_by_key(|(user, total, _)| (std::cmp::Reverse(*total), *user));
    rows
}
