//! Shared type definitions for the Shellworld simulation.
//!
//! This crate is the single source of truth for the values that flow
//! between the grid, the ledger, the action interpreter, and the policies
//! that drive shells. Nothing here owns simulation logic.
//!
//! # Modules
//!
//! - [`ids`] -- Strongly-typed identifiers (shells, accounts, banks, grids)
//! - [`location`] -- [`Coordinate`] and [`Direction`] value types
//! - [`color`] -- RGB [`Color`] with the darkening used by flowers
//! - [`actions`] -- The closed [`Action`] set a policy may emit
//! - [`perception`] -- [`ActorInfo`] and [`ActorEvent`] handed to policies
//! - [`reports`] -- Deferred-effect [`ReportEvent`]s filed with the watchman
//! - [`tags`] -- Open key/value [`TagStore`] attached to shells

pub mod actions;
pub mod color;
pub mod ids;
pub mod location;
pub mod perception;
pub mod reports;
pub mod tags;

// Re-export all public types at crate root for convenience.
pub use actions::{Action, ActionKind, MessageScope, Payload};
pub use color::Color;
pub use ids::{AccountId, BankId, EntityKey, GridId, ShellId};
pub use location::{Coordinate, Direction};
pub use perception::{ActorEvent, ActorInfo};
pub use reports::{ReportEvent, ReportKind};
pub use tags::{TagStore, TagValue};
