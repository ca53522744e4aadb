//! Shared fixtures for engine tests.

use chrono::{DateTime, TimeZone, Utc};

use gridpick_core::access::SelectionAccess;
use gridpick_core::domain::{DriverId, RaceId, Tier, UserId};
use gridpick_store::MemoryStore;

pub fn date(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, day, 14, 0, 0).unwrap()
}

pub struct Season {
    pub store: MemoryStore,
    pub users: Vec<UserId>,
    pub top_drivers: Vec<DriverId>,
    pub bottom_drivers: Vec<DriverId>,
    pub races: Vec<RaceId>,
}

/// Three users, one top team and one bottom team with three drivers each,
/// and two races a week apart.
pub fn season() -> Season {
    let mut store = MemoryStore::new();
    let top = store.add_team("McLaren", true);
    let bottom = store.add_team("Williams", false);
    let top_drivers = vec![
        store.add_driver("Norris", 4, top).unwrap(),
        store.add_driver("Piastri", 81, top).unwrap(),
        store.add_driver("Leclerc", 16, top).unwrap(),
    ];
    let bottom_drivers = vec![
        store.add_driver("Albon", 23, bottom).unwrap(),
        store.add_driver("Sainz", 55, bottom).unwrap(),
        store.add_driver("Colapinto", 43, bottom).unwrap(),
    ];
    let users = vec![
        store.add_user("Alice"),
        store.add_user("Bob"),
        store.add_user("Carol"),
    ];
    let races = vec![
        store.add_race("Suzuka", date(5)),
        store.add_race("Shanghai", date(12)),
    ];
    Season {
        store,
        users,
        top_drivers,
        bottom_drivers,
        races,
    }
}

/// Gives each user distinct picks for the race: user i takes the i-th top
/// and i-th bottom driver.
pub fn pick_round(season: &mut Season, race: RaceId) {
    for (i, user) in season.users.clone().into_iter().enumerate() {
        season
            .store
            .replace_selection(user, race, Tier::Top, Some(season.top_drivers[i]))
            .unwrap();
        season
            .store
            .replace_selection(user, race, Tier::Bottom, Some(season.bottom_drivers[i]))
            .unwrap();
    }
}
