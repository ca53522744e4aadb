//! Gridpick - A season prediction game engine
//!
//! Users pick one top-tier and one bottom-tier driver before each race,
//! scores come from recorded results via a configurable points table, and
//! pick order follows a reverse grid: whoever scored worst in the previous
//! race picks first.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use gridpick::prelude::*;
//!
//! let mut store = MemoryStore::new();
//! let top = store.add_team("Ferrari", true);
//! let leclerc = store.add_driver("Leclerc", 16, top).unwrap();
//! let alice = store.add_user("Alice");
//! let race = store.add_race("Monza", Utc.with_ymd_and_hms(2026, 9, 6, 13, 0, 0).unwrap());
//!
//! let mut engine = PickOrderEngine::new();
//! engine.set_pick(&mut store, alice, race, leclerc).unwrap();
//! assert_eq!(engine.pick_order(&mut store, race).unwrap(), vec![alice]);
//!
//! store.set_race_results(race, [(leclerc, 1)]).unwrap();
//! let totals = recompute_standings(&mut store);
//! assert_eq!(totals[&alice], 25);
//! ```

// Domain types and errors
pub use gridpick_core::{
    Driver, DriverId, DriverSelection, EntityKind, GrandPrix, PointsTable, RaceId, RaceResult,
    Result, StoreError, Team, TeamId, Tier, User, UserId,
};

// Data-access contracts
pub use gridpick_core::access::{
    PickOrderAccess, PointsAccess, RaceAccess, RosterAccess, SelectionAccess,
};

// In-memory store
pub use gridpick_store::MemoryStore;

// Engines
pub use gridpick_engine::{
    next_race, points_for_race, race_leaderboard, recompute_standings, season_breakdown,
    OsShuffler, PickOrderEngine, SeededShuffler, Shuffler,
};

// Configuration
pub use gridpick_config::{ConfigError, GameConfig};

pub mod prelude {
    pub use super::{
        next_race, points_for_race, race_leaderboard, recompute_standings, season_breakdown,
    };
    pub use super::{
        GameConfig, MemoryStore, PickOrderEngine, PointsTable, SeededShuffler, Shuffler,
        StoreError, Tier,
    };
    pub use super::{
        PickOrderAccess, PointsAccess, RaceAccess, RosterAccess, SelectionAccess,
    };
}
