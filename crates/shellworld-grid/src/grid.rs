//! The occupant store: one optional occupant per cell.
//!
//! A [`Grid`] owns whatever it stores while it is stored there; removing a
//! cell's occupant hands it back to the caller. The grid itself knows
//! nothing about simulation rules.
//!
//! Occupants are kept in a `BTreeMap` keyed by coordinate, so
//! [`Grid::occupied_coordinates`] is row-major and stable for a given
//! occupancy. Bounded grids reject coordinates outside their extent with
//! [`GridError::InvalidCoordinate`]; unbounded grids accept anything.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use shellworld_types::{Coordinate, Direction, GridId};
use tracing::debug;

use crate::error::GridError;

/// How many random probes an unbounded grid makes before giving up on
/// finding an empty cell.
const MAX_UNBOUNDED_PROBES: u32 = 1_000;

/// Half-width of the region around the origin that unbounded probing
/// starts from. It widens as probes fail.
const UNBOUNDED_SPREAD: i32 = 10;

/// The extent of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridBounds {
    /// Rows `0..rows` and columns `0..cols`.
    Bounded {
        /// Number of rows.
        rows: u32,
        /// Number of columns.
        cols: u32,
    },
    /// Every coordinate is valid.
    Unbounded,
}

/// A 2D cell store holding at most one occupant per coordinate.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    /// Identity of this grid instance.
    id: GridId,
    /// Extent of the grid.
    bounds: GridBounds,
    /// Occupied cells.
    cells: BTreeMap<Coordinate, T>,
}

impl<T> Grid<T> {
    /// Create an empty bounded grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyExtent`] if either dimension is zero.
    pub fn bounded(rows: u32, cols: u32) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyExtent { rows, cols });
        }
        Ok(Self {
            id: GridId::new(),
            bounds: GridBounds::Bounded { rows, cols },
            cells: BTreeMap::new(),
        })
    }

    /// Create an empty unbounded grid.
    pub fn unbounded() -> Self {
        Self {
            id: GridId::new(),
            bounds: GridBounds::Unbounded,
            cells: BTreeMap::new(),
        }
    }

    /// Identity of this grid.
    pub const fn id(&self) -> GridId {
        self.id
    }

    /// The grid's extent.
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Number of rows, or `None` for an unbounded grid.
    pub const fn num_rows(&self) -> Option<u32> {
        match self.bounds {
            GridBounds::Bounded { rows, .. } => Some(rows),
            GridBounds::Unbounded => None,
        }
    }

    /// Number of columns, or `None` for an unbounded grid.
    pub const fn num_cols(&self) -> Option<u32> {
        match self.bounds {
            GridBounds::Bounded { cols, .. } => Some(cols),
            GridBounds::Unbounded => None,
        }
    }

    /// Whether `coordinate` addresses a cell of this grid.
    ///
    /// This is the exact predicate [`get`](Self::get), [`put`](Self::put)
    /// and [`remove`](Self::remove) check.
    pub fn is_valid(&self, coordinate: Coordinate) -> bool {
        match self.bounds {
            GridBounds::Bounded { rows, cols } => {
                u32::try_from(coordinate.row).is_ok_and(|r| r < rows)
                    && u32::try_from(coordinate.col).is_ok_and(|c| c < cols)
            }
            GridBounds::Unbounded => true,
        }
    }

    fn check(&self, coordinate: Coordinate) -> Result<(), GridError> {
        if self.is_valid(coordinate) {
            Ok(())
        } else {
            Err(GridError::InvalidCoordinate { coordinate })
        }
    }

    /// The occupant at `coordinate`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidCoordinate`] outside a bounded grid.
    pub fn get(&self, coordinate: Coordinate) -> Result<Option<&T>, GridError> {
        self.check(coordinate)?;
        Ok(self.cells.get(&coordinate))
    }

    /// Store `occupant` at `coordinate`, returning the previous occupant.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidCoordinate`] outside a bounded grid.
    pub fn put(&mut self, coordinate: Coordinate, occupant: T) -> Result<Option<T>, GridError> {
        self.check(coordinate)?;
        Ok(self.cells.insert(coordinate, occupant))
    }

    /// Remove and return the occupant at `coordinate`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidCoordinate`] outside a bounded grid.
    pub fn remove(&mut self, coordinate: Coordinate) -> Result<Option<T>, GridError> {
        self.check(coordinate)?;
        Ok(self.cells.remove(&coordinate))
    }

    /// All occupied coordinates, row-major.
    pub fn occupied_coordinates(&self) -> Vec<Coordinate> {
        self.cells.keys().copied().collect()
    }

    /// Iterate over occupied cells, row-major.
    pub fn occupants(&self) -> impl Iterator<Item = (&Coordinate, &T)> {
        self.cells.iter()
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `coordinate` is valid and unoccupied.
    pub fn is_empty_at(&self, coordinate: Coordinate) -> bool {
        self.is_valid(coordinate) && !self.cells.contains_key(&coordinate)
    }

    // -------------------------------------------------------------------
    // Neighborhood queries
    // -------------------------------------------------------------------

    /// Valid cells among the eight neighbors, clockwise from North.
    pub fn valid_adjacent(&self, coordinate: Coordinate) -> Vec<Coordinate> {
        Direction::COMPASS
            .iter()
            .map(|&d| coordinate.adjacent(d))
            .filter(|&c| self.is_valid(c))
            .collect()
    }

    /// Valid, unoccupied neighbors.
    pub fn empty_adjacent(&self, coordinate: Coordinate) -> Vec<Coordinate> {
        self.valid_adjacent(coordinate)
            .into_iter()
            .filter(|c| !self.cells.contains_key(c))
            .collect()
    }

    /// Valid, occupied neighbors.
    pub fn occupied_adjacent(&self, coordinate: Coordinate) -> Vec<Coordinate> {
        self.valid_adjacent(coordinate)
            .into_iter()
            .filter(|c| self.cells.contains_key(c))
            .collect()
    }

    /// Occupants of the neighboring cells.
    pub fn neighbors(&self, coordinate: Coordinate) -> Vec<&T> {
        self.valid_adjacent(coordinate)
            .iter()
            .filter_map(|c| self.cells.get(c))
            .collect()
    }

    /// Pull `coordinate` inside the grid's extent. Identity on unbounded
    /// grids.
    pub fn clamp(&self, coordinate: Coordinate) -> Coordinate {
        match self.bounds {
            GridBounds::Bounded { rows, cols } => {
                let max_row = i32::try_from(rows.saturating_sub(1)).unwrap_or(i32::MAX);
                let max_col = i32::try_from(cols.saturating_sub(1)).unwrap_or(i32::MAX);
                Coordinate::new(
                    coordinate.row.clamp(0, max_row),
                    coordinate.col.clamp(0, max_col),
                )
            }
            GridBounds::Unbounded => coordinate,
        }
    }

    /// Pick a random empty cell.
    ///
    /// Bounded grids choose uniformly among all empty cells and return
    /// `None` when full. Unbounded grids probe around the origin in a
    /// widening square and give up after a fixed number of probes.
    pub fn random_empty_coordinate<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Coordinate> {
        match self.bounds {
            GridBounds::Bounded { rows, cols } => {
                let rows = i32::try_from(rows).unwrap_or(i32::MAX);
                let cols = i32::try_from(cols).unwrap_or(i32::MAX);
                let empty: Vec<Coordinate> = (0..rows)
                    .flat_map(|r| (0..cols).map(move |c| Coordinate::new(r, c)))
                    .filter(|c| !self.cells.contains_key(c))
                    .collect();
                if empty.is_empty() {
                    debug!(grid = %self.id, "no empty cell left on bounded grid");
                    return None;
                }
                empty.get(rng.random_range(0..empty.len())).copied()
            }
            GridBounds::Unbounded => {
                for probe in 0..MAX_UNBOUNDED_PROBES {
                    let widen = i32::try_from(probe / 10).unwrap_or(i32::MAX);
                    let spread = UNBOUNDED_SPREAD.saturating_add(widen);
                    let candidate = Coordinate::new(
                        rng.random_range(-spread..=spread),
                        rng.random_range(-spread..=spread),
                    );
                    if !self.cells.contains_key(&candidate) {
                        return Some(candidate);
                    }
                }
                debug!(grid = %self.id, probes = MAX_UNBOUNDED_PROBES, "unbounded probe exhausted");
                None
            }
        }
    }
}
