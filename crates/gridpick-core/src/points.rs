//! The points table mapping finishing positions to awarded points.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Highest finishing position the table covers.
pub const MAX_POSITION: u32 = 20;

const SEED_POINTS: [i64; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// User-editable mapping from finishing position to awarded points.
///
/// Positions without an explicit mapping award 0 points. The default table
/// is the familiar 25-18-15-… scheme with positions 11..=20 at 0.
///
/// # Examples
///
/// ```
/// use gridpick_core::PointsTable;
///
/// let table = PointsTable::default();
/// assert_eq!(table.points_for(1), 25);
/// assert_eq!(table.points_for(11), 0);
/// assert_eq!(table.points_for(99), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointsTable {
    table: BTreeMap<u32, i64>,
}

impl Default for PointsTable {
    fn default() -> Self {
        let mut table = BTreeMap::new();
        for (i, points) in SEED_POINTS.iter().enumerate() {
            table.insert(i as u32 + 1, *points);
        }
        for position in SEED_POINTS.len() as u32 + 1..=MAX_POSITION {
            table.insert(position, 0);
        }
        PointsTable { table }
    }
}

impl PointsTable {
    /// Creates a table from explicit (position, points) pairs.
    ///
    /// Positions outside the pairs award 0.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, i64)>) -> Self {
        PointsTable {
            table: pairs.into_iter().collect(),
        }
    }

    /// Points awarded for the given finishing position (0 if unmapped).
    pub fn points_for(&self, position: u32) -> i64 {
        self.table.get(&position).copied().unwrap_or(0)
    }

    /// Applies a sparse update for positions 1..=[`MAX_POSITION`].
    ///
    /// Unspecified positions keep their prior value; positions outside the
    /// valid range are ignored.
    pub fn apply(&mut self, updates: impl IntoIterator<Item = (u32, i64)>) {
        for (position, points) in updates {
            if (1..=MAX_POSITION).contains(&position) {
                self.table.insert(position, points);
            }
        }
    }

    /// All explicit (position, points) entries in position order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, i64)> + '_ {
        self.table.iter().map(|(p, pts)| (*p, *pts))
    }
}
