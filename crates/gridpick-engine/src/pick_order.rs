//! Pick-order engine: reverse-grid pick sequencing with cached orders.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use gridpick_core::access::{
    PickOrderAccess, PointsAccess, RaceAccess, RosterAccess, SelectionAccess,
};
use gridpick_core::domain::{DriverId, GrandPrix, RaceId, Tier, UserId};
use gridpick_core::error::{Result, StoreError};

use crate::scoring::points_for_race;
use crate::shuffle::{OsShuffler, Shuffler};

/// Computes and caches the sequence in which users pick drivers for a race.
///
/// Per race the cached order is a two-state machine: uncomputed until the
/// first [`PickOrderEngine::pick_order`] call, computed (and returned
/// verbatim) afterwards, until explicitly invalidated by
/// [`PickOrderEngine::reset_future_pick_orders`].
///
/// The ordering rule is a reverse grid: users are grouped by their points in
/// the chronologically previous race and groups run worst-first. Ties inside
/// a group, and the whole order when no previous scored race exists, come
/// from the injected [`Shuffler`].
pub struct PickOrderEngine<S: Shuffler> {
    shuffler: S,
}

impl PickOrderEngine<OsShuffler> {
    /// Engine with the production OS-seeded shuffler.
    pub fn new() -> Self {
        PickOrderEngine {
            shuffler: OsShuffler::new(),
        }
    }
}

impl Default for PickOrderEngine<OsShuffler> {
    fn default() -> Self {
        PickOrderEngine::new()
    }
}

impl<S: Shuffler> PickOrderEngine<S> {
    /// Engine with an explicit shuffler (deterministic in tests).
    pub fn with_shuffler(shuffler: S) -> Self {
        PickOrderEngine { shuffler }
    }

    /// Returns the pick order for a race, computing and persisting it on
    /// first use.
    ///
    /// Cache hits return the stored sequence verbatim. On a miss:
    ///
    /// 1. Find the chronologically latest race strictly before the target
    ///    (by date, excluding the target itself by ID).
    /// 2. No previous race, or no results for it: the order is a uniform
    ///    random permutation of all current users.
    /// 3. Otherwise group users by their previous-race points (missing
    ///    users count 0), order groups ascending, shuffle within groups.
    /// 4. Persist as positions 1..=N, replacing any prior rows.
    pub fn pick_order<St>(&mut self, store: &mut St, race: RaceId) -> Result<Vec<UserId>>
    where
        St: RosterAccess + RaceAccess + SelectionAccess + PointsAccess + PickOrderAccess,
    {
        if let Some(cached) = store.cached_pick_order(race) {
            tracing::debug!(race = %race, "pick order cache hit");
            return Ok(cached);
        }
        let target = store.race(race)?;

        let order = match self.scored_previous_race(store, &target) {
            None => {
                tracing::debug!(race = %race, "no scored previous race, random order");
                let mut users: Vec<UserId> = store.users().iter().map(|u| u.id).collect();
                self.shuffler.shuffle_users(&mut users);
                users
            }
            Some(previous) => {
                tracing::debug!(race = %race, previous = %previous.id, "reverse-grid order");
                self.reverse_grid_order(store, previous.id)
            }
        };

        store.store_pick_order(race, &order);
        Ok(order)
    }

    /// Worst previous performer picks first; ties shuffled.
    fn reverse_grid_order<St>(&mut self, store: &St, previous: RaceId) -> Vec<UserId>
    where
        St: RosterAccess + RaceAccess + SelectionAccess + PointsAccess,
    {
        let scores = points_for_race(store, previous);
        let mut groups: BTreeMap<i64, Vec<UserId>> = BTreeMap::new();
        for user in store.users() {
            let points = scores.get(&user.id).copied().unwrap_or(0);
            groups.entry(points).or_default().push(user.id);
        }
        let mut order = Vec::new();
        for group in groups.values_mut() {
            self.shuffler.shuffle_users(group);
            order.extend_from_slice(group);
        }
        order
    }

    /// The chronologically previous race, kept only if it has recorded
    /// results. An unscored previous race means a random order; the engine
    /// does not reach further back.
    fn scored_previous_race<St: RaceAccess>(
        &self,
        store: &St,
        target: &GrandPrix,
    ) -> Option<GrandPrix> {
        store
            .previous_race(target.date, target.id)
            .filter(|previous| store.race_closed(previous.id))
    }

    /// Drops cached orders for every race strictly after `now`.
    ///
    /// Full invalidation, not a targeted recompute: the next read for each
    /// race rebuilds from current standings. Must run after any event that
    /// changes who picks or the standings basis: user added, user deleted,
    /// race results recorded. Returns the number of races invalidated.
    pub fn reset_future_pick_orders<St>(&self, store: &mut St, now: DateTime<Utc>) -> usize
    where
        St: RaceAccess + PickOrderAccess,
    {
        let mut cleared = 0;
        for race in store.races() {
            if race.date > now && store.clear_pick_order(race.id) {
                cleared += 1;
            }
        }
        if cleared > 0 {
            tracing::info!(races = cleared, "invalidated future pick orders");
        }
        cleared
    }

    /// Records a user's pick for a race, replacing any prior pick in the
    /// driver's tier.
    ///
    /// Rejected with `RaceClosed` once the race has any recorded results.
    pub fn set_pick<St>(
        &self,
        store: &mut St,
        user: UserId,
        race: RaceId,
        driver: DriverId,
    ) -> Result<()>
    where
        St: RosterAccess + RaceAccess + SelectionAccess,
    {
        self.ensure_open(store, race)?;
        let tier = store.driver_tier(driver)?;
        store.replace_selection(user, race, tier, Some(driver))
    }

    /// Clears a user's pick in one tier for a race.
    ///
    /// Subject to the same closed-race rejection as [`Self::set_pick`].
    pub fn clear_pick<St>(
        &self,
        store: &mut St,
        user: UserId,
        race: RaceId,
        tier: Tier,
    ) -> Result<()>
    where
        St: RaceAccess + SelectionAccess,
    {
        self.ensure_open(store, race)?;
        store.replace_selection(user, race, tier, None)
    }

    fn ensure_open<St: RaceAccess>(&self, store: &St, race: RaceId) -> Result<()> {
        store.race(race)?;
        if store.race_closed(race) {
            return Err(StoreError::RaceClosed { race });
        }
        Ok(())
    }
}

/// The first race strictly after `now`, if the calendar has one.
pub fn next_race<St: RaceAccess>(store: &St, now: DateTime<Utc>) -> Option<GrandPrix> {
    store.races().into_iter().find(|race| race.date > now)
}
