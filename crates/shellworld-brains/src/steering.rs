//! Small helpers for turning perception into movement.

use shellworld_grid::spatial;
use shellworld_types::{Action, ActorInfo, Direction};

/// The nearest neighbor matching `wanted`.
///
/// Neighbors without a distance sort last.
pub fn nearest<'a>(
    neighborhood: &'a [ActorInfo],
    wanted: impl Fn(&ActorInfo) -> bool,
) -> Option<&'a ActorInfo> {
    neighborhood
        .iter()
        .filter(|info| wanted(info))
        .min_by(|a, b| {
            let da = a.distance.unwrap_or(f64::MAX);
            let db = b.distance.unwrap_or(f64::MAX);
            da.total_cmp(&db)
        })
}

/// Bearing of `target` relative to the observer's facing, in `[-180, 180)`.
pub fn relative_bearing(me: &ActorInfo, target: &ActorInfo) -> Option<f64> {
    let facing = me.direction.unwrap_or(0.0);
    target
        .direction
        .map(|bearing| spatial::normalize_degrees(bearing - facing))
}

/// The clockwise 45 degree units that best line up with `relative`.
pub fn units_toward(relative: f64) -> i32 {
    spatial::direction_of(relative)
        .to_compass()
        .degrees()
        .div_euclid(Direction::HALF_RIGHT)
}

/// Turn toward `relative` (if needed) and take one step.
pub fn approach(relative: f64) -> Vec<Action> {
    let units = units_toward(relative);
    if units == 0 {
        vec![Action::Move { distance: 1 }]
    } else {
        vec![Action::Turn { units }, Action::Move { distance: 1 }]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn seen(type_name: &str, distance: f64, direction: f64) -> ActorInfo {
        ActorInfo {
            type_name: Some(type_name.to_owned()),
            distance: Some(distance),
            direction: Some(direction),
            ..ActorInfo::default()
        }
    }

    #[test]
    fn nearest_picks_smallest_distance() {
        let hood = vec![seen("Rock", 2.0, 0.0), seen("Coin", 1.5, 90.0), seen("Coin", 1.0, 180.0)];
        let found = nearest(&hood, |i| i.type_name.as_deref() == Some("Coin")).unwrap();
        assert_eq!(found.direction, Some(180.0));
    }

    #[test]
    fn relative_bearing_subtracts_facing() {
        let me = ActorInfo {
            direction: Some(90.0),
            ..ActorInfo::default()
        };
        let east = seen("Rock", 1.0, 90.0);
        let north = seen("Rock", 1.0, 0.0);
        assert_eq!(relative_bearing(&me, &east), Some(0.0));
        assert_eq!(relative_bearing(&me, &north), Some(-90.0));
    }

    #[test]
    fn units_toward_rounds_to_compass() {
        assert_eq!(units_toward(0.0), 0);
        assert_eq!(units_toward(50.0), 1);
        assert_eq!(units_toward(-90.0), 6);
        assert_eq!(approach(0.0), vec![Action::Move { distance: 1 }]);
    }
}
