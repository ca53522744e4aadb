//! Scoring and pick-order engines for gridpick.
//!
//! Both engines are generic over the data-access traits in `gridpick-core`
//! and own no state of their own beyond the injected shuffler. All derived
//! quantities they produce (user standings, cached pick orders) are rebuilt
//! from the authoritative tuples; callers pair every fact mutation with the
//! matching recompute/invalidate call so the store never holds a partial
//! write.

pub mod pick_order;
pub mod scoring;
pub mod shuffle;

#[cfg(test)]
mod test_utils;

pub use pick_order::{next_race, PickOrderEngine};
pub use scoring::{points_for_race, race_leaderboard, recompute_standings, season_breakdown};
pub use shuffle::{OsShuffler, SeededShuffler, Shuffler};
