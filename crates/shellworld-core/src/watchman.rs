//! The watchman: per-world dispatch of deferred effects.
//!
//! Action handlers file [`ReportEvent`]s instead of resolving effects that
//! involve a second entity. The watchman looks up the handler registered
//! for the report's kind and runs it immediately. A handler may file
//! further reports; a chain of pushes recurses once per link and ends at
//! the first blocker or grid edge. On an unbounded grid, an endless line of
//! pushable entities recurses without limit.

use std::collections::BTreeMap;

use shellworld_types::{ActorEvent, ReportEvent, ReportKind, tags::keys};
use tracing::debug;

use crate::entity::Entity;
use crate::error::ActionError;
use crate::world::World;

/// Resolves one report against the world.
pub type ReportHandler = fn(&mut World, &ReportEvent) -> Result<(), ActionError>;

/// Report handlers plus the log of reports filed during the current tick.
#[derive(Debug, Clone)]
pub struct Watchman {
    handlers: BTreeMap<ReportKind, ReportHandler>,
    filed: Vec<ReportEvent>,
}

impl Default for Watchman {
    fn default() -> Self {
        Self::new()
    }
}

impl Watchman {
    /// A watchman with the collision and message handlers installed.
    pub fn new() -> Self {
        let mut handlers: BTreeMap<ReportKind, ReportHandler> = BTreeMap::new();
        handlers.insert(ReportKind::Collision, resolve_collision);
        handlers.insert(ReportKind::Message, deliver_message);
        Self {
            handlers,
            filed: Vec::new(),
        }
    }

    /// Install `handler` for `kind`, returning the handler it replaces.
    pub fn register(&mut self, kind: ReportKind, handler: ReportHandler) -> Option<ReportHandler> {
        self.handlers.insert(kind, handler)
    }

    /// The handler for `kind`, if registered.
    pub fn handler(&self, kind: ReportKind) -> Option<ReportHandler> {
        self.handlers.get(&kind).copied()
    }

    /// Reports filed since the last [`take_filed`](Self::take_filed).
    pub fn filed(&self) -> &[ReportEvent] {
        &self.filed
    }

    /// Drain the filed-report log.
    pub fn take_filed(&mut self) -> Vec<ReportEvent> {
        std::mem::take(&mut self.filed)
    }

    pub(crate) fn record(&mut self, report: ReportEvent) {
        self.filed.push(report);
    }
}

/// Push the collided entity one cell further, then move the collider in.
///
/// Only entities tagged pushable move. If the landing cell is occupied the
/// occupant is pushed first by a recursive report; the collider follows
/// only if that left its destination empty, so either the whole chain
/// shifts or nothing does.
///
/// This departs from a literal cascade, where the original mover stays
/// put whenever the push had to recurse: here it follows the chain into
/// the freed cell.
pub fn resolve_collision(world: &mut World, report: &ReportEvent) -> Result<(), ActionError> {
    let ReportEvent::Collision {
        collider,
        collided_with,
        direction,
    } = *report
    else {
        return Ok(());
    };

    let Some(target) = world.entity(collided_with) else {
        return Ok(());
    };
    if !target.tags().flag(keys::PUSHABLE) {
        debug!(%collider, %collided_with, "collided with an immovable entity");
        return Ok(());
    }
    let Some(destination) = target.coordinate() else {
        return Ok(());
    };

    let landing = world.grid().clamp(destination.adjacent(direction));
    if landing == destination {
        debug!(%collided_with, at = %destination, "push pinned against the grid edge");
        return Ok(());
    }

    let displaced = world.grid().get(landing)?.copied();
    match displaced {
        Some(next) => {
            debug!(pusher = %collided_with, pushed = %next, "push cascades");
            world.report(ReportEvent::Collision {
                collider: collided_with,
                collided_with: next,
                direction,
            });
        }
        None => world.move_entity(collided_with, landing)?,
    }

    if world.grid().is_empty_at(destination) {
        world.move_entity(collider, destination)?;
    }
    Ok(())
}

/// Hand a message to its recipient's policy.
///
/// Messages to unknown shells, or to shells no longer on this world's grid,
/// are dropped.
pub fn deliver_message(world: &mut World, report: &ReportEvent) -> Result<(), ActionError> {
    let ReportEvent::Message {
        sender,
        recipient,
        payload,
    } = report
    else {
        return Ok(());
    };

    let grid_id = world.grid().id();
    let Some(key) = world
        .shell_key(*recipient)
        .filter(|&k| world.entity(k).and_then(Entity::grid) == Some(grid_id))
    else {
        debug!(%sender, %recipient, "recipient left the grid, message dropped");
        return Ok(());
    };

    world.respond(
        key,
        &ActorEvent::Message {
            sender: *sender,
            payload: payload.clone(),
        },
    )?;
    Ok(())
}
