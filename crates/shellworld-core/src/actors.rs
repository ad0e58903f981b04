//! Behavior of entities that have no policy.
//!
//! Rocks and coins do nothing. A flower fades a little every tick. A bug
//! walks forward while the cell ahead is empty or holds a flower (which it
//! tramples), planting a flower of its own color in the cell it left;
//! otherwise it turns 45 degrees clockwise.

use shellworld_types::EntityKey;
use tracing::trace;

use crate::entity::{Entity, EntityKind};
use crate::error::WorldError;
use crate::world::World;

/// Percentage a flower darkens per tick.
pub const FLOWER_DARKENING_PERCENT: u8 = 5;

/// Run one tick of a plain actor.
pub(crate) fn act(world: &mut World, key: EntityKey) -> Result<(), WorldError> {
    let Some(entity) = world.entity_mut(key) else {
        return Err(WorldError::UnknownEntity { key });
    };
    let is_bug = match entity.kind() {
        EntityKind::Flower => {
            let faded = entity.color().darkened(FLOWER_DARKENING_PERCENT);
            entity.set_color(faded);
            false
        }
        EntityKind::Bug => true,
        EntityKind::Shell(_) | EntityKind::Coin { .. } | EntityKind::Rock => false,
    };
    if is_bug { act_bug(world, key) } else { Ok(()) }
}

/// What a bug finds in the cell ahead.
enum Ahead {
    Clear,
    Flower(EntityKey),
    Blocked,
}

fn act_bug(world: &mut World, key: EntityKey) -> Result<(), WorldError> {
    let entity = world
        .entity(key)
        .ok_or(WorldError::UnknownEntity { key })?;
    let origin = entity.coordinate().ok_or(WorldError::NotPlaced { key })?;
    let facing = entity.facing();
    let color = entity.color();
    let ahead = origin.adjacent(facing);

    let lookahead = if world.grid().is_valid(ahead) {
        match world.grid().get(ahead)?.copied() {
            None => Ahead::Clear,
            Some(other) if world.entity(other).is_some_and(is_flower) => Ahead::Flower(other),
            Some(_) => Ahead::Blocked,
        }
    } else {
        Ahead::Blocked
    };

    match lookahead {
        Ahead::Blocked => {
            if let Some(entity) = world.entity_mut(key) {
                entity.set_facing(facing.turned(1));
            }
            return Ok(());
        }
        Ahead::Flower(flower) => {
            world.destroy(flower);
        }
        Ahead::Clear => {}
    }

    world.move_entity(key, ahead)?;
    world.add(origin, Entity::flower().colored(color))?;
    trace!(%key, from = %origin, to = %ahead, "bug stepped");
    Ok(())
}

fn is_flower(entity: &Entity) -> bool {
    matches!(entity.kind(), EntityKind::Flower)
}
