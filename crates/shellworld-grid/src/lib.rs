//! Cell grids and spatial math for the Shellworld simulation.
//!
//! This crate models the physical board: a mapping from [`Coordinate`] to
//! at most one occupant, either bounded by a row/column extent or
//! unbounded in every direction, plus the conversions between grid offsets
//! and polar (distance, bearing) pairs that perception and targeting use.
//!
//! # Modules
//!
//! - [`error`] -- [`GridError`] for out-of-range coordinates and bad extents.
//! - [`grid`] -- [`Grid`], the occupant store, with neighborhood queries.
//! - [`spatial`] -- Polar/rectangular conversions, angle normalization, and
//!   square-radius neighborhood enumeration.
//!
//! [`Coordinate`]: shellworld_types::Coordinate

pub mod error;
pub mod grid;
pub mod spatial;

// Re-export primary types at crate root.
pub use error::GridError;
pub use grid::{Grid, GridBounds};
