//! Gridpick Core - Domain types and data-access contracts
//!
//! This crate provides the fundamental abstractions for gridpick:
//! - Typed IDs and entity structs for the season roster
//! - The points table mapping finishing positions to awarded points
//! - Data-access traits implemented by the store and consumed by the engines
//! - The error taxonomy shared across the workspace

pub mod access;
pub mod domain;
pub mod error;
pub mod points;

#[cfg(test)]
mod points_tests;

pub use access::{PickOrderAccess, PointsAccess, RaceAccess, RosterAccess, SelectionAccess};
pub use domain::{
    Driver, DriverId, DriverSelection, GrandPrix, RaceId, RaceResult, Team, TeamId, Tier, User,
    UserId,
};
pub use error::{EntityKind, Result, StoreError};
pub use points::PointsTable;
