//! Data-access contracts between the persistent store and the engines.
//!
//! The scoring and pick-order engines are generic over these traits rather
//! than over a concrete store, so tests can substitute fixtures and the
//! presentation layer can wrap whatever persistence it owns. The in-memory
//! store in `gridpick-store` implements all of them.
//!
//! Execution is single-writer and synchronous: each operation runs to
//! completion against the shared store before the next is processed, so the
//! traits take plain `&self`/`&mut self` and never suspend.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::{
    Driver, DriverId, DriverSelection, GrandPrix, RaceId, RaceResult, Team, TeamId, Tier, User,
    UserId,
};
use crate::error::Result;
use crate::points::PointsTable;

/// Read access to users, teams, and drivers, plus the single write hook the
/// scoring engine needs to publish rebuilt standings.
pub trait RosterAccess {
    /// All users, in ID order.
    fn users(&self) -> Vec<User>;

    /// Looks up one user. Fails with `NotFound` for unknown IDs.
    fn user(&self, id: UserId) -> Result<User>;

    /// All teams, in ID order.
    fn teams(&self) -> Vec<Team>;

    fn team(&self, id: TeamId) -> Result<Team>;

    /// All drivers, in ID order.
    fn drivers(&self) -> Vec<Driver>;

    fn driver(&self, id: DriverId) -> Result<Driver>;

    /// The tier of the driver's team.
    fn driver_tier(&self, id: DriverId) -> Result<Tier>;

    /// Replaces every user's cumulative points in one pass.
    ///
    /// Users absent from `totals` are reset to 0. This is the swap half of
    /// the scoring engine's compute-into-scratch-then-swap rebuild; callers
    /// never mutate standings incrementally.
    fn replace_standings(&mut self, totals: &BTreeMap<UserId, i64>);
}

/// Read access to the race calendar and recorded results.
pub trait RaceAccess {
    /// All races in chronological order (date, then ID for equal dates).
    fn races(&self) -> Vec<GrandPrix>;

    fn race(&self, id: RaceId) -> Result<GrandPrix>;

    /// All recorded results for the race, in driver-ID order. Empty when
    /// the race has not been scored.
    fn results_for_race(&self, race: RaceId) -> Vec<RaceResult>;

    /// Whether any result has been recorded for the race.
    ///
    /// A closed race no longer accepts pick mutations.
    fn race_closed(&self, race: RaceId) -> bool;

    /// The chronologically latest race strictly before `date`, excluding
    /// the race with ID `excluding`.
    fn previous_race(&self, date: DateTime<Utc>, excluding: RaceId) -> Option<GrandPrix>;
}

/// Read and replace access to per-race driver picks.
pub trait SelectionAccess {
    /// All selections for the race, in insertion order.
    fn selections_for_race(&self, race: RaceId) -> Vec<DriverSelection>;

    /// The user's selection in the given tier for the race, if any.
    fn selection(&self, user: UserId, race: RaceId, tier: Tier) -> Option<DriverSelection>;

    /// Replaces the user's selection in one tier for one race.
    ///
    /// Deletes any existing selection of that tier, then inserts the new
    /// driver (or nothing, clearing the slot). The tier is derived from the
    /// driver being inserted or passed explicitly when clearing. Fails with
    /// `NotFound` for unknown user/race/driver IDs.
    fn replace_selection(
        &mut self,
        user: UserId,
        race: RaceId,
        tier: Tier,
        driver: Option<DriverId>,
    ) -> Result<()>;
}

/// Access to the cached pick-order rows.
///
/// The cached order is derived state owned by the pick-order engine; the
/// store only persists and clears it.
pub trait PickOrderAccess {
    /// The cached order for the race (users by ascending position), or
    /// `None` when no order has been computed.
    fn cached_pick_order(&self, race: RaceId) -> Option<Vec<UserId>>;

    /// Persists `order` as positions 1..=N, replacing any prior rows for
    /// the race.
    fn store_pick_order(&mut self, race: RaceId, order: &[UserId]);

    /// Drops the cached order for the race, if any. Returns whether rows
    /// were removed.
    fn clear_pick_order(&mut self, race: RaceId) -> bool;
}

/// Read access to the points table.
pub trait PointsAccess {
    fn points_table(&self) -> &PointsTable;
}
