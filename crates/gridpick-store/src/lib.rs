//! In-memory season store for gridpick.
//!
//! [`MemoryStore`] owns every authoritative row of the game (roster, races,
//! results, selections, points table) plus the derived pick-order cache, and
//! implements the data-access traits the engines consume. Referential
//! integrity is enforced by pre-checks, not constraint violations: deletes
//! that would orphan rows fail with `HasDependents`, deletes with declared
//! cascade semantics (users, races) take their dependents with them.
//!
//! The store is single-writer and synchronous. Tables are `BTreeMap`-keyed
//! so iteration order is deterministic.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use gridpick_core::access::{
    PickOrderAccess, PointsAccess, RaceAccess, RosterAccess, SelectionAccess,
};
use gridpick_core::domain::{
    Driver, DriverId, DriverSelection, GrandPrix, RaceId, RaceResult, Team, TeamId, Tier, User,
    UserId,
};
use gridpick_core::error::{EntityKind, Result, StoreError};
use gridpick_core::points::PointsTable;

#[cfg(test)]
mod tests;

/// The shared mutable store behind every engine operation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: BTreeMap<UserId, User>,
    teams: BTreeMap<TeamId, Team>,
    drivers: BTreeMap<DriverId, Driver>,
    races: BTreeMap<RaceId, GrandPrix>,
    /// race -> driver -> finishing position (one row per pair).
    results: BTreeMap<RaceId, BTreeMap<DriverId, u32>>,
    selections: Vec<DriverSelection>,
    pick_orders: BTreeMap<RaceId, Vec<UserId>>,
    points: PointsTable,
    next_id: i64,
}

impl MemoryStore {
    /// Creates an empty store with the default points table.
    pub fn new() -> Self {
        MemoryStore {
            next_id: 1,
            ..MemoryStore::default()
        }
    }

    /// Creates an empty store with an explicit points table (e.g. a
    /// configured seed).
    pub fn with_points_table(points: PointsTable) -> Self {
        MemoryStore {
            points,
            ..MemoryStore::new()
        }
    }

    fn alloc_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub fn add_user(&mut self, name: impl Into<String>) -> UserId {
        let id = UserId(self.alloc_id());
        let name = name.into();
        tracing::debug!(user = %id, %name, "adding user");
        self.users.insert(
            id,
            User {
                id,
                name,
                points: 0,
            },
        );
        id
    }

    pub fn rename_user(&mut self, id: UserId, name: impl Into<String>) -> Result<()> {
        let user = self.users.get_mut(&id).ok_or(StoreError::NotFound {
            kind: EntityKind::User,
            id: id.0,
        })?;
        user.name = name.into();
        Ok(())
    }

    /// Deletes a user, cascading to their selections and pick-order rows.
    pub fn remove_user(&mut self, id: UserId) -> Result<()> {
        if self.users.remove(&id).is_none() {
            return Err(StoreError::NotFound {
                kind: EntityKind::User,
                id: id.0,
            });
        }
        self.selections.retain(|s| s.user_id != id);
        for order in self.pick_orders.values_mut() {
            order.retain(|u| *u != id);
        }
        tracing::debug!(user = %id, "removed user and cascaded dependents");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Teams
    // ------------------------------------------------------------------

    pub fn add_team(&mut self, name: impl Into<String>, is_top_team: bool) -> TeamId {
        let id = TeamId(self.alloc_id());
        self.teams.insert(
            id,
            Team {
                id,
                name: name.into(),
                is_top_team,
            },
        );
        id
    }

    pub fn update_team(
        &mut self,
        id: TeamId,
        name: impl Into<String>,
        is_top_team: bool,
    ) -> Result<()> {
        let team = self.teams.get_mut(&id).ok_or(StoreError::NotFound {
            kind: EntityKind::Team,
            id: id.0,
        })?;
        team.name = name.into();
        team.is_top_team = is_top_team;
        Ok(())
    }

    /// Checks whether a team may be deleted.
    ///
    /// Referential-integrity policy lives here; [`Self::remove_team`] calls
    /// this before touching anything.
    pub fn can_delete_team(&self, id: TeamId) -> Result<()> {
        if !self.teams.contains_key(&id) {
            return Err(StoreError::NotFound {
                kind: EntityKind::Team,
                id: id.0,
            });
        }
        if self.drivers.values().any(|d| d.team_id == id) {
            return Err(StoreError::HasDependents {
                kind: EntityKind::Team,
                id: id.0,
                dependents: "drivers",
            });
        }
        Ok(())
    }

    pub fn remove_team(&mut self, id: TeamId) -> Result<()> {
        self.can_delete_team(id)?;
        self.teams.remove(&id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Drivers
    // ------------------------------------------------------------------

    pub fn add_driver(
        &mut self,
        name: impl Into<String>,
        number: u32,
        team_id: TeamId,
    ) -> Result<DriverId> {
        if !self.teams.contains_key(&team_id) {
            return Err(StoreError::NotFound {
                kind: EntityKind::Team,
                id: team_id.0,
            });
        }
        let id = DriverId(self.alloc_id());
        self.drivers.insert(
            id,
            Driver {
                id,
                name: name.into(),
                number,
                team_id,
            },
        );
        Ok(id)
    }

    pub fn update_driver(
        &mut self,
        id: DriverId,
        name: impl Into<String>,
        number: u32,
        team_id: TeamId,
    ) -> Result<()> {
        if !self.teams.contains_key(&team_id) {
            return Err(StoreError::NotFound {
                kind: EntityKind::Team,
                id: team_id.0,
            });
        }
        let driver = self.drivers.get_mut(&id).ok_or(StoreError::NotFound {
            kind: EntityKind::Driver,
            id: id.0,
        })?;
        driver.name = name.into();
        driver.number = number;
        driver.team_id = team_id;
        Ok(())
    }

    /// Checks whether a driver may be deleted.
    ///
    /// A driver referenced by any selection or recorded result blocks
    /// deletion.
    pub fn can_delete_driver(&self, id: DriverId) -> Result<()> {
        if !self.drivers.contains_key(&id) {
            return Err(StoreError::NotFound {
                kind: EntityKind::Driver,
                id: id.0,
            });
        }
        if self.selections.iter().any(|s| s.driver_id == id) {
            return Err(StoreError::HasDependents {
                kind: EntityKind::Driver,
                id: id.0,
                dependents: "selections",
            });
        }
        if self.results.values().any(|rows| rows.contains_key(&id)) {
            return Err(StoreError::HasDependents {
                kind: EntityKind::Driver,
                id: id.0,
                dependents: "race results",
            });
        }
        Ok(())
    }

    pub fn remove_driver(&mut self, id: DriverId) -> Result<()> {
        self.can_delete_driver(id)?;
        self.drivers.remove(&id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Races and results
    // ------------------------------------------------------------------

    pub fn add_race(&mut self, name: impl Into<String>, date: DateTime<Utc>) -> RaceId {
        let id = RaceId(self.alloc_id());
        self.races.insert(
            id,
            GrandPrix {
                id,
                name: name.into(),
                date,
            },
        );
        id
    }

    pub fn update_race(
        &mut self,
        id: RaceId,
        name: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Result<()> {
        let race = self.races.get_mut(&id).ok_or(StoreError::NotFound {
            kind: EntityKind::Race,
            id: id.0,
        })?;
        race.name = name.into();
        race.date = date;
        Ok(())
    }

    /// Deletes a race, cascading to its selections, results, and pick-order
    /// rows.
    ///
    /// Removing results changes the scoring basis, so callers must follow
    /// with a standings rebuild.
    pub fn remove_race(&mut self, id: RaceId) -> Result<()> {
        if self.races.remove(&id).is_none() {
            return Err(StoreError::NotFound {
                kind: EntityKind::Race,
                id: id.0,
            });
        }
        self.selections.retain(|s| s.race_id != id);
        self.results.remove(&id);
        self.pick_orders.remove(&id);
        tracing::debug!(race = %id, "removed race and cascaded dependents");
        Ok(())
    }

    /// Replaces all recorded results for a race.
    ///
    /// Delete-then-insert: any prior rows for the race are dropped first, so
    /// at most one row exists per (race, driver). Unknown driver IDs fail
    /// the whole call before anything is written.
    pub fn set_race_results(
        &mut self,
        race: RaceId,
        rows: impl IntoIterator<Item = (DriverId, u32)>,
    ) -> Result<()> {
        if !self.races.contains_key(&race) {
            return Err(StoreError::NotFound {
                kind: EntityKind::Race,
                id: race.0,
            });
        }
        let mut table = BTreeMap::new();
        for (driver, position) in rows {
            if !self.drivers.contains_key(&driver) {
                return Err(StoreError::NotFound {
                    kind: EntityKind::Driver,
                    id: driver.0,
                });
            }
            table.insert(driver, position);
        }
        tracing::debug!(race = %race, rows = table.len(), "recording race results");
        self.results.insert(race, table);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Points table
    // ------------------------------------------------------------------

    /// Applies a sparse points-table update; unspecified positions keep
    /// their prior value.
    pub fn update_points_table(&mut self, updates: impl IntoIterator<Item = (u32, i64)>) {
        self.points.apply(updates);
    }
}

impl RosterAccess for MemoryStore {
    fn users(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    fn user(&self, id: UserId) -> Result<User> {
        self.users.get(&id).cloned().ok_or(StoreError::NotFound {
            kind: EntityKind::User,
            id: id.0,
        })
    }

    fn teams(&self) -> Vec<Team> {
        self.teams.values().cloned().collect()
    }

    fn team(&self, id: TeamId) -> Result<Team> {
        self.teams.get(&id).cloned().ok_or(StoreError::NotFound {
            kind: EntityKind::Team,
            id: id.0,
        })
    }

    fn drivers(&self) -> Vec<Driver> {
        self.drivers.values().cloned().collect()
    }

    fn driver(&self, id: DriverId) -> Result<Driver> {
        self.drivers.get(&id).cloned().ok_or(StoreError::NotFound {
            kind: EntityKind::Driver,
            id: id.0,
        })
    }

    fn driver_tier(&self, id: DriverId) -> Result<Tier> {
        let driver = self.driver(id)?;
        Ok(self.team(driver.team_id)?.tier())
    }

    fn replace_standings(&mut self, totals: &BTreeMap<UserId, i64>) {
        for user in self.users.values_mut() {
            user.points = totals.get(&user.id).copied().unwrap_or(0);
        }
    }
}

impl RaceAccess for MemoryStore {
    fn races(&self) -> Vec<GrandPrix> {
        let mut races: Vec<GrandPrix> = self.races.values().cloned().collect();
        races.sort_by_key(|r| (r.date, r.id));
        races
    }

    fn race(&self, id: RaceId) -> Result<GrandPrix> {
        self.races.get(&id).cloned().ok_or(StoreError::NotFound {
            kind: EntityKind::Race,
            id: id.0,
        })
    }

    fn results_for_race(&self, race: RaceId) -> Vec<RaceResult> {
        self.results
            .get(&race)
            .map(|rows| {
                rows.iter()
                    .map(|(driver, position)| RaceResult {
                        race_id: race,
                        driver_id: *driver,
                        position: *position,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn race_closed(&self, race: RaceId) -> bool {
        self.results.get(&race).is_some_and(|rows| !rows.is_empty())
    }

    fn previous_race(&self, date: DateTime<Utc>, excluding: RaceId) -> Option<GrandPrix> {
        self.races
            .values()
            .filter(|r| r.date < date && r.id != excluding)
            .max_by_key(|r| (r.date, r.id))
            .cloned()
    }
}

impl SelectionAccess for MemoryStore {
    fn selections_for_race(&self, race: RaceId) -> Vec<DriverSelection> {
        self.selections
            .iter()
            .filter(|s| s.race_id == race)
            .copied()
            .collect()
    }

    fn selection(&self, user: UserId, race: RaceId, tier: Tier) -> Option<DriverSelection> {
        self.selections
            .iter()
            .filter(|s| s.user_id == user && s.race_id == race)
            .find(|s| self.driver_tier(s.driver_id) == Ok(tier))
            .copied()
    }

    fn replace_selection(
        &mut self,
        user: UserId,
        race: RaceId,
        tier: Tier,
        driver: Option<DriverId>,
    ) -> Result<()> {
        if !self.users.contains_key(&user) {
            return Err(StoreError::NotFound {
                kind: EntityKind::User,
                id: user.0,
            });
        }
        if !self.races.contains_key(&race) {
            return Err(StoreError::NotFound {
                kind: EntityKind::Race,
                id: race.0,
            });
        }
        // An inserted driver defines the tier slot being replaced; the
        // explicit tier only matters when clearing.
        let tier = match driver {
            Some(driver) => self.driver_tier(driver)?,
            None => tier,
        };
        // Delete-then-insert keeps at most one selection per tier.
        let doomed: Vec<DriverId> = self
            .selections
            .iter()
            .filter(|s| s.user_id == user && s.race_id == race)
            .map(|s| s.driver_id)
            .filter(|d| self.driver_tier(*d).is_ok_and(|t| t == tier))
            .collect();
        self.selections.retain(|s| {
            !(s.user_id == user && s.race_id == race && doomed.contains(&s.driver_id))
        });
        if let Some(driver) = driver {
            self.selections.push(DriverSelection {
                user_id: user,
                driver_id: driver,
                race_id: race,
            });
        }
        Ok(())
    }
}

impl PickOrderAccess for MemoryStore {
    fn cached_pick_order(&self, race: RaceId) -> Option<Vec<UserId>> {
        self.pick_orders.get(&race).cloned()
    }

    fn store_pick_order(&mut self, race: RaceId, order: &[UserId]) {
        self.pick_orders.insert(race, order.to_vec());
    }

    fn clear_pick_order(&mut self, race: RaceId) -> bool {
        self.pick_orders.remove(&race).is_some()
    }
}

impl PointsAccess for MemoryStore {
    fn points_table(&self) -> &PointsTable {
        &self.points
    }
}
