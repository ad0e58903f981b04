//! Spatial math: polar/rectangular conversion and neighborhoods.
//!
//! Bearings are compass degrees: `0` is North (decreasing row), `90` is
//! East (increasing column), and results are normalized to `[-180, 180)`.
//! A neighbor one cell East of an observer is therefore at bearing `90`
//! and distance `1.0`, whatever the observer's facing.

use shellworld_types::{Coordinate, Direction};

/// Normalize an angle in degrees to `[-180, 180)`.
pub fn normalize_degrees(theta: f64) -> f64 {
    (theta + 180.0).rem_euclid(360.0) - 180.0
}

/// Normalize an angle in degrees to `[0, 360)`.
pub fn normalize_heading(theta: f64) -> f64 {
    theta.rem_euclid(360.0)
}

/// Convert a row/column offset into `(distance, bearing)`.
///
/// `distance` is `hypot(d_row, d_col)`; `bearing` is the compass bearing
/// of the offset in degrees.
pub fn rect_to_polar(d_row: i32, d_col: i32) -> (f64, f64) {
    let east = f64::from(d_col);
    let north = -f64::from(d_row);
    let distance = east.hypot(north);
    let bearing = normalize_degrees(east.atan2(north).to_degrees());
    (distance, bearing)
}

/// Convert `(distance, bearing)` back into the nearest row/column offset.
#[allow(clippy::cast_possible_truncation)]
pub fn polar_to_offset(distance: f64, bearing: f64) -> (i32, i32) {
    let radians = bearing.to_radians();
    // `as` saturates for out-of-range floats and maps NaN to zero.
    let d_row = (-distance * radians.cos()).round() as i32;
    let d_col = (distance * radians.sin()).round() as i32;
    (d_row, d_col)
}

/// The cell at a polar offset from `origin`.
pub fn polar_target(origin: Coordinate, distance: f64, bearing: f64) -> Coordinate {
    let (d_row, d_col) = polar_to_offset(distance, bearing);
    origin.offset(d_row, d_col)
}

/// Straight-line distance between two cells.
pub fn euclidean_distance(a: Coordinate, b: Coordinate) -> f64 {
    let (d_row, d_col) = a.delta_to(b);
    f64::from(d_row).hypot(f64::from(d_col))
}

/// The cell `steps` compass steps from `origin` along `direction`.
pub fn step_along(origin: Coordinate, direction: Direction, steps: u32) -> Coordinate {
    let (d_row, d_col) = direction.unit_step();
    let steps = i32::try_from(steps).unwrap_or(i32::MAX);
    origin.offset(d_row.saturating_mul(steps), d_col.saturating_mul(steps))
}

/// Round a bearing in degrees to an integer [`Direction`] in `[0, 360)`.
#[allow(clippy::cast_possible_truncation)]
pub fn direction_of(bearing: f64) -> Direction {
    Direction(normalize_heading(bearing).round() as i32).normalized()
}

/// Every cell of the square of half-width `radius` centered on `center`,
/// excluding the center, row-major. Validity is not checked.
pub fn square_neighborhood(center: Coordinate, radius: u32) -> impl Iterator<Item = Coordinate> {
    let r = i32::try_from(radius).unwrap_or(i32::MAX);
    (r.saturating_neg()..=r)
        .flat_map(move |d_row| (r.saturating_neg()..=r).map(move |d_col| (d_row, d_col)))
        .filter(|&(d_row, d_col)| d_row != 0 || d_col != 0)
        .map(move |(d_row, d_col)| center.offset(d_row, d_col))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn east_neighbor_is_bearing_ninety() {
        let (distance, bearing) = rect_to_polar(0, 1);
        assert!(close(distance, 1.0));
        assert!(close(bearing, 90.0));
    }

    #[test]
    fn compass_points() {
        assert!(close(rect_to_polar(-1, 0).1, 0.0));
        assert!(close(rect_to_polar(0, -1).1, -90.0));
        assert!(close(rect_to_polar(1, 0).1, -180.0));
        assert!(close(rect_to_polar(-1, 1).1, 45.0));
        assert!(close(rect_to_polar(-1, 1).0, 2.0_f64.sqrt()));
    }

    #[test]
    fn polar_offsets_land_on_cells() {
        assert_eq!(polar_to_offset(1.0, 0.0), (-1, 0));
        assert_eq!(polar_to_offset(1.0, 90.0), (0, 1));
        assert_eq!(polar_to_offset(2.0, 180.0), (2, 0));
        assert_eq!(polar_to_offset(2.0_f64.sqrt(), -45.0), (-1, -1));
        let (distance, bearing) = rect_to_polar(3, -2);
        assert_eq!(polar_to_offset(distance, bearing), (3, -2));
    }

    #[test]
    fn normalization_ranges() {
        assert!(close(normalize_degrees(270.0), -90.0));
        assert!(close(normalize_degrees(180.0), -180.0));
        assert!(close(normalize_degrees(-190.0), 170.0));
        assert!(close(normalize_heading(-90.0), 270.0));
    }

    #[test]
    fn neighborhood_excludes_center() {
        let cells: Vec<Coordinate> = square_neighborhood(Coordinate::new(0, 0), 1).collect();
        assert_eq!(cells.len(), 8);
        assert!(!cells.contains(&Coordinate::new(0, 0)));
        assert_eq!(square_neighborhood(Coordinate::new(5, 5), 3).count(), 48);
    }

    #[test]
    fn stepping_and_distance() {
        let origin = Coordinate::new(2, 2);
        assert_eq!(step_along(origin, Direction::EAST, 3), Coordinate::new(2, 5));
        assert_eq!(step_along(origin, Direction(140), 1), Coordinate::new(3, 3));
        assert!(close(euclidean_distance(origin, Coordinate::new(5, 6)), 5.0));
        assert_eq!(direction_of(-90.0), Direction::WEST);
    }
}
