//! Grid coordinates and compass directions.
//!
//! A [`Coordinate`] is a plain `(row, col)` value: rows grow downward
//! (South), columns grow rightward (East). A [`Direction`] is an integer
//! number of compass degrees where `0` is North and `90` is East.
//! Movement only ever happens along the eight canonical headings at 45
//! degree steps; arbitrary headings are rounded to the nearest one.

use serde::{Deserialize, Serialize};

/// A cell address on a grid.
///
/// Ordering is row-major, which makes iteration over a `BTreeMap` keyed by
/// coordinates deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Row index (grows toward the South).
    pub row: i32,
    /// Column index (grows toward the East).
    pub col: i32,
}

impl Coordinate {
    /// Construct a coordinate.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Shift by a row/column offset. Saturates instead of overflowing.
    #[must_use]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row.saturating_add(d_row),
            col: self.col.saturating_add(d_col),
        }
    }

    /// The neighboring cell one step away in `direction`, after rounding
    /// the direction to the nearest compass heading.
    #[must_use]
    pub const fn adjacent(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.unit_step();
        self.offset(d_row, d_col)
    }

    /// Row/column offset from `self` to `other`.
    pub const fn delta_to(self, other: Self) -> (i32, i32) {
        (
            other.row.saturating_sub(self.row),
            other.col.saturating_sub(self.col),
        )
    }

    /// Chebyshev ("square radius") distance between two coordinates.
    pub const fn chebyshev_distance(self, other: Self) -> u32 {
        let d_row = self.row.abs_diff(other.row);
        let d_col = self.col.abs_diff(other.col);
        if d_row > d_col { d_row } else { d_col }
    }
}

impl core::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A heading in integer compass degrees.
///
/// The raw value is not kept normalized; use [`Direction::normalized`] for
/// `[0, 360)` or [`Direction::signed`] for `[-180, 180)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Direction(pub i32);

impl Direction {
    /// Heading toward decreasing rows.
    pub const NORTH: Self = Self(0);
    /// Heading North-East.
    pub const NORTHEAST: Self = Self(45);
    /// Heading toward increasing columns.
    pub const EAST: Self = Self(90);
    /// Heading South-East.
    pub const SOUTHEAST: Self = Self(135);
    /// Heading toward increasing rows.
    pub const SOUTH: Self = Self(180);
    /// Heading South-West.
    pub const SOUTHWEST: Self = Self(225);
    /// Heading toward decreasing columns.
    pub const WEST: Self = Self(270);
    /// Heading North-West.
    pub const NORTHWEST: Self = Self(315);

    /// Degrees in one turn unit (a half right angle).
    pub const HALF_RIGHT: i32 = 45;
    /// Degrees in a full circle.
    pub const FULL_CIRCLE: i32 = 360;

    /// The eight canonical headings, clockwise from North.
    pub const COMPASS: [Self; 8] = [
        Self::NORTH,
        Self::NORTHEAST,
        Self::EAST,
        Self::SOUTHEAST,
        Self::SOUTH,
        Self::SOUTHWEST,
        Self::WEST,
        Self::NORTHWEST,
    ];

    /// Raw degrees as stored.
    pub const fn degrees(self) -> i32 {
        self.0
    }

    /// The same heading in `[0, 360)`.
    #[must_use]
    pub const fn normalized(self) -> Self {
        Self(self.0.rem_euclid(Self::FULL_CIRCLE))
    }

    /// The same heading in `[-180, 180)`.
    pub const fn signed(self) -> i32 {
        self.0
            .saturating_add(180)
            .rem_euclid(Self::FULL_CIRCLE)
            .saturating_sub(180)
    }

    /// Turn by `units` half right angles (positive is clockwise), result
    /// normalized to `[0, 360)`.
    #[must_use]
    pub const fn turned(self, units: i32) -> Self {
        let by = units.rem_euclid(8).saturating_mul(Self::HALF_RIGHT);
        Self(self.0.rem_euclid(Self::FULL_CIRCLE).saturating_add(by)).normalized()
    }

    /// Round to the nearest of the eight canonical headings.
    #[must_use]
    pub const fn to_compass(self) -> Self {
        let sector = self
            .0
            .rem_euclid(Self::FULL_CIRCLE)
            .saturating_add(Self::HALF_RIGHT / 2)
            .div_euclid(Self::HALF_RIGHT);
        Self(sector.saturating_mul(Self::HALF_RIGHT)).normalized()
    }

    /// Row/column step of length one along the nearest compass heading.
    pub const fn unit_step(self) -> (i32, i32) {
        match self.to_compass().0 {
            0 => (-1, 0),
            45 => (-1, 1),
            90 => (0, 1),
            135 => (1, 1),
            180 => (1, 0),
            225 => (1, -1),
            270 => (0, -1),
            _ => (-1, -1),
        }
    }
}

impl From<i32> for Direction {
    fn from(degrees: i32) -> Self {
        Self(degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turning_wraps_both_ways() {
        assert_eq!(Direction::NORTH.turned(2), Direction::EAST);
        assert_eq!(Direction::NORTH.turned(-2), Direction::WEST);
        assert_eq!(Direction::WEST.turned(3), Direction::NORTHEAST);
        assert_eq!(Direction(-90).turned(0), Direction::WEST);
    }

    #[test]
    fn compass_rounding_picks_nearest_heading() {
        assert_eq!(Direction(20).to_compass(), Direction::NORTH);
        assert_eq!(Direction(23).to_compass(), Direction::NORTHEAST);
        assert_eq!(Direction(-10).to_compass(), Direction::NORTH);
        assert_eq!(Direction(350).to_compass(), Direction::NORTH);
        assert_eq!(Direction(100).to_compass(), Direction::EAST);
    }

    #[test]
    fn signed_range() {
        assert_eq!(Direction(270).signed(), -90);
        assert_eq!(Direction(180).signed(), -180);
        assert_eq!(Direction(90).signed(), 90);
        assert_eq!(Direction(-450).signed(), -90);
    }

    #[test]
    fn adjacent_follows_compass() {
        let origin = Coordinate::new(5, 5);
        assert_eq!(origin.adjacent(Direction::NORTH), Coordinate::new(4, 5));
        assert_eq!(origin.adjacent(Direction::EAST), Coordinate::new(5, 6));
        assert_eq!(origin.adjacent(Direction::SOUTHWEST), Coordinate::new(6, 4));
        assert_eq!(origin.adjacent(Direction::NORTHWEST), Coordinate::new(4, 4));
    }

    #[test]
    fn chebyshev_distance_is_square_radius() {
        let a = Coordinate::new(0, 0);
        assert_eq!(a.chebyshev_distance(Coordinate::new(3, -2)), 3);
        assert_eq!(a.chebyshev_distance(a), 0);
    }
}
