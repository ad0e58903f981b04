//! Effects of each action kind.
//!
//! Every handler has the [`ActionHandler`](crate::ActionHandler) signature
//! and is installed into an [`ActionRegistry`](crate::ActionRegistry) under
//! its kind. Handlers that touch another entity do not resolve the
//! consequence themselves; they file a report with the watchman.

use shellworld_grid::spatial;
use shellworld_types::{
    AccountId, Action, BankId, Coordinate, Direction, EntityKey, MessageScope, Payload,
    ReportEvent, ShellId, tags::keys,
};
use tracing::{debug, info};

use crate::config::ShellConfig;
use crate::entity::{Entity, EntityKind};
use crate::error::{ActionError, WorldError};
use crate::shell::Shell;
use crate::world::World;

/// The parts of the acting shell a handler needs, copied out of the arena.
struct Actor {
    id: ShellId,
    coordinate: Coordinate,
    facing: Direction,
    config: ShellConfig,
}

fn actor(world: &World, key: EntityKey) -> Result<Actor, ActionError> {
    let entity = world
        .entity(key)
        .ok_or(WorldError::UnknownEntity { key })?;
    let shell = entity
        .as_shell()
        .ok_or(WorldError::UnknownEntity { key })?;
    let coordinate = entity.coordinate().ok_or(WorldError::NotPlaced { key })?;
    Ok(Actor {
        id: shell.id(),
        coordinate,
        facing: entity.facing(),
        config: shell.config().clone(),
    })
}

/// Resolve a polar offset relative to the actor's facing.
fn relative_target(actor: &Actor, direction: f64, distance: f64) -> Coordinate {
    let bearing = f64::from(actor.facing.degrees()) + direction;
    spatial::polar_target(actor.coordinate, distance, bearing)
}

// ---------------------------------------------------------------------------
// Standard actions
// ---------------------------------------------------------------------------

/// Step along the shell's facing, or report a collision.
///
/// The distance is clamped to the shell's maximum and the destination into
/// the grid. Moving onto one's own cell (pinned at an edge) does nothing.
pub fn move_forward(world: &mut World, key: EntityKey, action: &Action) -> Result<(), ActionError> {
    let Action::Move { distance } = *action else {
        return Ok(());
    };
    let actor = actor(world, key)?;
    let steps = distance.min(actor.config.max_move_distance);
    let destination = world
        .grid()
        .clamp(spatial::step_along(actor.coordinate, actor.facing, steps));

    if destination == actor.coordinate {
        return Ok(());
    }

    let occupant = world.grid().get(destination)?.copied();
    match occupant {
        Some(occupant) => {
            world.report(ReportEvent::Collision {
                collider: key,
                collided_with: occupant,
                direction: actor.facing,
            });
        }
        None => world.move_entity(key, destination)?,
    }
    Ok(())
}

/// Rotate by a number of 45 degree units.
pub fn turn(world: &mut World, key: EntityKey, action: &Action) -> Result<(), ActionError> {
    let Action::Turn { units } = *action else {
        return Ok(());
    };
    let entity = world
        .entity_mut(key)
        .ok_or(WorldError::UnknownEntity { key })?;
    let facing = entity.facing().turned(units);
    entity.set_facing(facing);
    Ok(())
}

/// Change color.
pub fn recolor(world: &mut World, key: EntityKey, action: &Action) -> Result<(), ActionError> {
    let Action::Color { color } = *action else {
        return Ok(());
    };
    world
        .entity_mut(key)
        .ok_or(WorldError::UnknownEntity { key })?
        .set_color(color);
    Ok(())
}

/// File one message report per resolved recipient.
///
/// Delivery happens in the watchman, not here.
pub fn send_message(world: &mut World, key: EntityKey, action: &Action) -> Result<(), ActionError> {
    let Action::Message { scope, payload } = action else {
        return Ok(());
    };
    let actor = actor(world, key)?;
    let max_range = actor.config.max_message_range;

    let recipients: Vec<ShellId> = match *scope {
        MessageScope::Shout { radius } => {
            let radius = radius.clamp(0.0, max_range.max(0.0));
            world
                .grid()
                .occupants()
                .filter(|&(&coordinate, &other)| {
                    other != key
                        && spatial::euclidean_distance(actor.coordinate, coordinate) <= radius
                })
                .filter_map(|(_, &other)| world.entity(other)?.as_shell().map(Shell::id))
                .collect()
        }
        MessageScope::Bearing {
            direction,
            distance,
        } => {
            if distance > max_range {
                debug!(sender = %actor.id, distance, max_range, "message beyond range dropped");
                return Ok(());
            }
            let target = spatial::polar_target(actor.coordinate, distance, direction);
            if !world.grid().is_valid(target) {
                return Err(ActionError::NoTarget { coordinate: target });
            }
            let recipient = world
                .grid()
                .get(target)?
                .copied()
                .filter(|&other| other != key)
                .and_then(|other| world.entity(other)?.as_shell().map(Shell::id));
            let Some(id) = recipient else {
                return Err(ActionError::NoTarget { coordinate: target });
            };
            vec![id]
        }
        MessageScope::Recipient(id) => {
            let placed_at = world
                .shell_key(id)
                .and_then(|k| world.entity(k))
                .and_then(Entity::coordinate);
            // A detached recipient is still addressed; delivery drops it.
            if let Some(coordinate) = placed_at {
                let range = f64::from(actor.coordinate.chebyshev_distance(coordinate));
                if range > max_range {
                    debug!(sender = %actor.id, recipient = %id, range, max_range, "message beyond range dropped");
                    return Ok(());
                }
            }
            vec![id]
        }
    };

    for recipient in recipients {
        world.report(ReportEvent::Message {
            sender: actor.id,
            recipient,
            payload: Payload::clone(payload),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Economy actions
// ---------------------------------------------------------------------------

/// Mine from a minable shell or a coin in the same bank.
///
/// Transfers `min(balance, max_mine_per_tick)` from the target's account to
/// the sender's. Targets with no positive balance are left alone.
pub fn collect_coin(world: &mut World, key: EntityKey, action: &Action) -> Result<(), ActionError> {
    let Action::CollectCoin {
        direction,
        distance,
    } = *action
    else {
        return Ok(());
    };
    let actor = actor(world, key)?;
    let (bank_id, miner) = world
        .entity(key)
        .and_then(|e| e.tags().account(keys::MINABLE))
        .ok_or(ActionError::MissingTag {
            key: keys::MINABLE,
        })?;
    if world.banks().get(bank_id).is_none() {
        return Err(ActionError::UnconfiguredEconomy { bank: bank_id });
    }

    let distance = distance.clamp(0.0, actor.config.max_collect_distance.max(0.0));
    let target = relative_target(&actor, direction, distance);
    let source = mining_source(world, key, target, bank_id)
        .ok_or(ActionError::NoTarget { coordinate: target })?;

    let Ok(bank) = world.banks_mut().get_mut(bank_id) else {
        return Err(ActionError::UnconfiguredEconomy { bank: bank_id });
    };
    let balance = bank.balance(source);
    if balance <= 0 {
        debug!(%key, %source, balance, "nothing to collect");
        return Ok(());
    }
    let amount = balance.min(actor.config.max_mine_per_tick);
    bank.transfer(source, miner, amount);
    info!(miner = %actor.id, %source, amount, "coins collected");
    Ok(())
}

/// The account to mine at `target`, if it holds a minable shell or a coin
/// of `bank`.
fn mining_source(
    world: &World,
    key: EntityKey,
    target: Coordinate,
    bank: BankId,
) -> Option<AccountId> {
    let occupant = world.grid().get(target).ok()?.copied()?;
    if occupant == key {
        return None;
    }
    let entity = world.entity(occupant)?;
    match entity.kind() {
        EntityKind::Coin {
            bank: coin_bank,
            account,
        } if *coin_bank == bank => Some(*account),
        EntityKind::Shell(_) => entity
            .tags()
            .account(keys::MINABLE)
            .filter(|(shell_bank, _)| *shell_bank == bank)
            .map(|(_, account)| account),
        _ => None,
    }
}

/// Destroy whatever occupies the addressed cell.
pub fn consume(world: &mut World, key: EntityKey, action: &Action) -> Result<(), ActionError> {
    let Action::Consume {
        direction,
        distance,
    } = *action
    else {
        return Ok(());
    };
    let actor = actor(world, key)?;
    let predator = world
        .entity(key)
        .is_some_and(|e| e.tags().flag(keys::PREDATOR));
    if !predator {
        return Err(ActionError::MissingTag {
            key: keys::PREDATOR,
        });
    }

    let distance = distance.clamp(0.0, actor.config.max_consume_distance.max(0.0));
    let target = relative_target(&actor, direction, distance);
    if !world.grid().is_valid(target) {
        return Err(ActionError::NoTarget { coordinate: target });
    }
    let prey = world
        .grid()
        .get(target)?
        .copied()
        .filter(|&other| other != key)
        .ok_or(ActionError::NoTarget { coordinate: target })?;

    if let Some(eaten) = world.destroy(prey) {
        info!(predator = %actor.id, prey = eaten.type_name(), at = %target, "consumed");
    }
    Ok(())
}
