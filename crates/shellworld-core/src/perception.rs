//! Perception assembly: what a shell sees before it decides.
//!
//! The neighborhood is the square of half-width `perception_radius` around
//! the shell, excluding the shell's own cell. Each occupied cell becomes an
//! [`ActorInfo`] with the occupant's type name and color, its straight-line
//! distance, and the absolute compass bearing from the observer to it.
//! Building a perception never mutates the world.

use shellworld_grid::spatial;
use shellworld_types::{ActorInfo, EntityKey};

use crate::entity::Entity;
use crate::world::World;

/// The perception handed to a policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Perception {
    /// The shell itself: id, color, facing, zero distance.
    pub me: ActorInfo,
    /// Every other occupant in range, row-major.
    pub neighborhood: Vec<ActorInfo>,
}

/// Build the perception for the shell at `key`.
///
/// Returns `None` if `key` is not a shell placed on the world's grid.
pub fn perceive(world: &World, key: EntityKey) -> Option<Perception> {
    let entity = world.entity(key)?;
    let shell = entity.as_shell()?;
    let origin = entity.coordinate()?;

    let me = ActorInfo {
        id: Some(shell.id()),
        type_name: None,
        distance: Some(0.0),
        direction: Some(f64::from(entity.facing().signed())),
        color: Some(entity.color()),
    };

    let grid = world.grid();
    let neighborhood = spatial::square_neighborhood(origin, shell.config().perception_radius)
        .filter_map(|cell| {
            let other = grid.get(cell).ok()??;
            let neighbor = world.entity(*other)?;
            let (d_row, d_col) = origin.delta_to(cell);
            Some(describe(neighbor, spatial::rect_to_polar(d_row, d_col)))
        })
        .collect();

    Some(Perception { me, neighborhood })
}

fn describe(entity: &Entity, (distance, bearing): (f64, f64)) -> ActorInfo {
    ActorInfo {
        id: entity.as_shell().map(crate::Shell::id),
        type_name: Some(entity.type_name().to_owned()),
        distance: Some(distance),
        direction: Some(bearing),
        color: Some(entity.color()),
    }
}
