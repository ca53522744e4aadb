//! Domain entities for a single season.
//!
//! All entities are identified by opaque integer IDs allocated by the store.
//! Engines reference entities by ID only; the store owns the rows.
//!
//! Derived quantities ([`User::points`], cached pick orders) are
//! denormalizations over the authoritative tuples (selections, results,
//! points table) and must stay recomputable from them at any time.

use chrono::{DateTime, Utc};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

id_type!(
    /// Identifier of a [`User`].
    UserId
);
id_type!(
    /// Identifier of a [`Team`].
    TeamId
);
id_type!(
    /// Identifier of a [`Driver`].
    DriverId
);
id_type!(
    /// Identifier of a [`GrandPrix`].
    RaceId
);

/// The two tiers teams are partitioned into.
///
/// Each user picks exactly one driver from each tier per race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Top,
    Bottom,
}

/// A participant in the game.
///
/// `points` is the cumulative standing across all scored races. It is
/// derived state, rebuilt by the scoring engine and never hand-edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub points: i64,
}

/// A constructor team. `is_top_team` partitions the grid into exactly two
/// tiers; every driver belongs to exactly one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub is_top_team: bool,
}

impl Team {
    pub fn tier(&self) -> Tier {
        if self.is_top_team {
            Tier::Top
        } else {
            Tier::Bottom
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub number: u32,
    pub team_id: TeamId,
}

/// A race on the season calendar.
///
/// The date orders races chronologically and classifies them as past or
/// future relative to a caller-supplied "now".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrandPrix {
    pub id: RaceId,
    pub name: String,
    pub date: DateTime<Utc>,
}

/// One finishing position for one driver in one race.
///
/// At most one row exists per (race, driver). The presence of any result for
/// a race closes that race for pick editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceResult {
    pub race_id: RaceId,
    pub driver_id: DriverId,
    pub position: u32,
}

/// One driver pick by one user for one race.
///
/// For a given (user, race) there is at most one selection whose driver is
/// top-tier and at most one whose driver is bottom-tier, enforced by the
/// store's delete-then-insert mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverSelection {
    pub user_id: UserId,
    pub driver_id: DriverId,
    pub race_id: RaceId,
}
