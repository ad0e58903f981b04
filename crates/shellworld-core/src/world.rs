//! The world: grid, entity arena, banks, watchman, and the tick scheduler.
//!
//! Entities live in an arena keyed by [`EntityKey`]; the grid maps cells to
//! keys. Shells are also indexed by [`ShellId`] for message delivery. The
//! index is filled when a shell is added and never pruned, so messages to a
//! shell that has since left the grid are suppressed at delivery time.
//!
//! [`World::step`] snapshots the occupants before anyone acts, then lets
//! each one act in row-major order. An entity removed earlier in the same
//! tick is skipped.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use shellworld_grid::{Grid, GridBounds};
use shellworld_ledger::BankRegistry;
use shellworld_types::{
    AccountId, ActorEvent, BankId, Color, Coordinate, Direction, EntityKey, ReportEvent, ShellId,
    TagStore, tags::keys,
};
use tracing::{debug, info, trace, warn};

use crate::actors;
use crate::config::WorldConfig;
use crate::entity::{Entity, EntityKind, Placement};
use crate::error::WorldError;
use crate::interpreter;
use crate::perception;
use crate::policy::PolicyContext;
use crate::watchman::Watchman;

/// Summary of one completed tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    /// The tick number (first tick is 1).
    pub tick: u64,
    /// Entities that acted.
    pub acted: usize,
    /// Entities skipped because they left the grid earlier in the tick.
    pub skipped: usize,
    /// Reports filed since the previous step, in filing order.
    pub reports: Vec<ReportEvent>,
}

/// A serializable view of one placed entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySnapshot {
    /// Cell occupied.
    pub coordinate: Coordinate,
    /// Type name (a shell's species).
    pub kind: String,
    /// Facing in `[0, 360)`.
    pub facing: Direction,
    /// Current color.
    pub color: Color,
    /// All tags.
    pub tags: TagStore,
    /// Shell identity, for shells.
    pub shell_id: Option<ShellId>,
    /// Bank binding: a coin's account, or a minable shell's.
    pub account: Option<(BankId, AccountId)>,
}

/// A serializable view of the whole grid, for renderers and logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    /// Ticks completed.
    pub tick: u64,
    /// Grid extent.
    pub bounds: GridBounds,
    /// Every placed entity, row-major.
    pub entities: Vec<EntitySnapshot>,
}

/// One simulated world.
#[derive(Debug)]
pub struct World {
    grid: Grid<EntityKey>,
    entities: BTreeMap<EntityKey, Entity>,
    shells: BTreeMap<ShellId, EntityKey>,
    banks: BankRegistry,
    watchman: Watchman,
    rng: StdRng,
    next_key: u64,
    tick: u64,
}

impl World {
    /// Create an empty world over `grid`, seeding its random source.
    pub fn new(grid: Grid<EntityKey>, seed: u64) -> Self {
        Self {
            grid,
            entities: BTreeMap::new(),
            shells: BTreeMap::new(),
            banks: BankRegistry::new(),
            watchman: Watchman::new(),
            rng: StdRng::seed_from_u64(seed),
            next_key: 0,
            tick: 0,
        }
    }

    /// Create an empty world from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Grid`] if the extent is rejected.
    pub fn from_config(config: &WorldConfig) -> Result<Self, WorldError> {
        let grid = if config.is_unbounded() {
            Grid::unbounded()
        } else {
            Grid::bounded(config.rows, config.cols)?
        };
        info!(
            rows = config.rows,
            cols = config.cols,
            seed = config.seed,
            "world created"
        );
        Ok(Self::new(grid, config.seed))
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// The grid of entity keys.
    pub const fn grid(&self) -> &Grid<EntityKey> {
        &self.grid
    }

    /// Ticks completed so far.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The world's banks.
    pub const fn banks(&self) -> &BankRegistry {
        &self.banks
    }

    /// The world's banks, mutably.
    pub const fn banks_mut(&mut self) -> &mut BankRegistry {
        &mut self.banks
    }

    /// The world's watchman.
    pub const fn watchman(&self) -> &Watchman {
        &self.watchman
    }

    /// The world's watchman, mutably (to register extra report handlers).
    pub const fn watchman_mut(&mut self) -> &mut Watchman {
        &mut self.watchman
    }

    /// The world's seeded random source.
    pub const fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Look up an entity.
    pub fn entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(&key)
    }

    /// Look up an entity mutably.
    pub fn entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(&key)
    }

    /// Iterate over every entity in the arena, placed or not.
    pub fn entities(&self) -> impl Iterator<Item = (&EntityKey, &Entity)> {
        self.entities.iter()
    }

    /// The entity occupying `coordinate`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Grid`] if `coordinate` is invalid.
    pub fn entity_at(&self, coordinate: Coordinate) -> Result<Option<&Entity>, WorldError> {
        Ok(self
            .grid
            .get(coordinate)?
            .and_then(|key| self.entities.get(key)))
    }

    /// The arena key of the shell with `id`.
    pub fn shell_key(&self, id: ShellId) -> Option<EntityKey> {
        self.shells.get(&id).copied()
    }

    // -------------------------------------------------------------------
    // Placement
    // -------------------------------------------------------------------

    /// Put a new entity into the grid at `coordinate`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Grid`] for an invalid coordinate and
    /// [`WorldError::OccupiedLocation`] if the cell is taken.
    pub fn add(&mut self, coordinate: Coordinate, mut entity: Entity) -> Result<EntityKey, WorldError> {
        if self.grid.get(coordinate)?.is_some() {
            return Err(WorldError::OccupiedLocation { coordinate });
        }
        let key = EntityKey::new(self.next_key);
        self.next_key = self.next_key.saturating_add(1);

        if let Some(shell) = entity.as_shell() {
            if let Some(previous) = self.shells.insert(shell.id(), key) {
                warn!(id = %shell.id(), %previous, %key, "shell id reused; messages now go to the newer shell");
            }
        }
        entity.set_placement(Some(Placement {
            grid: self.grid.id(),
            coordinate,
        }));
        debug!(%key, kind = entity.type_name(), at = %coordinate, "entity added");
        self.grid.put(coordinate, key)?;
        self.entities.insert(key, entity);
        Ok(key)
    }

    /// Put a new entity at a random empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NoVacancy`] if no empty cell could be found.
    pub fn add_random(&mut self, entity: Entity) -> Result<EntityKey, WorldError> {
        let coordinate = self
            .grid
            .random_empty_coordinate(&mut self.rng)
            .ok_or(WorldError::NoVacancy)?;
        self.add(coordinate, entity)
    }

    /// Return a detached entity to the grid.
    ///
    /// Placing an entity at the cell it already occupies is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownEntity`], [`WorldError::AlreadyPlaced`]
    /// if it is on the grid elsewhere, [`WorldError::OccupiedLocation`] if
    /// another entity holds the cell, or [`WorldError::Grid`].
    pub fn place(&mut self, key: EntityKey, coordinate: Coordinate) -> Result<(), WorldError> {
        let entity = self
            .entities
            .get(&key)
            .ok_or(WorldError::UnknownEntity { key })?;
        if let Some(current) = entity.coordinate() {
            if current == coordinate {
                return Ok(());
            }
            return Err(WorldError::AlreadyPlaced {
                key,
                coordinate: current,
            });
        }
        if self.grid.get(coordinate)?.is_some() {
            return Err(WorldError::OccupiedLocation { coordinate });
        }
        self.grid.put(coordinate, key)?;
        let grid = self.grid.id();
        if let Some(entity) = self.entities.get_mut(&key) {
            entity.set_placement(Some(Placement { grid, coordinate }));
        }
        Ok(())
    }

    /// Take whatever occupies `coordinate` off the grid.
    ///
    /// The entity stays in the arena, detached, and can be placed again.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Grid`] if `coordinate` is invalid.
    pub fn remove(&mut self, coordinate: Coordinate) -> Result<Option<EntityKey>, WorldError> {
        let Some(key) = self.grid.remove(coordinate)? else {
            return Ok(None);
        };
        if let Some(entity) = self.entities.get_mut(&key) {
            entity.set_placement(None);
        }
        debug!(%key, at = %coordinate, "entity removed from grid");
        Ok(Some(key))
    }

    /// Take the entity at `key` off the grid. Detaching a detached entity
    /// does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownEntity`] if `key` is not in the arena.
    pub fn detach(&mut self, key: EntityKey) -> Result<(), WorldError> {
        let entity = self
            .entities
            .get_mut(&key)
            .ok_or(WorldError::UnknownEntity { key })?;
        let Some(placement) = entity.placement() else {
            return Ok(());
        };
        entity.set_placement(None);
        if placement.grid == self.grid.id() && self.grid.get(placement.coordinate)? == Some(&key) {
            self.grid.remove(placement.coordinate)?;
        }
        Ok(())
    }

    /// Remove an entity from the grid and the arena.
    ///
    /// A destroyed shell keeps its id in the shell index; messages to it
    /// are dropped at delivery.
    pub fn destroy(&mut self, key: EntityKey) -> Option<Entity> {
        if let Err(err) = self.detach(key) {
            debug!(%key, error = %err, "destroying an entity that was not attached");
        }
        self.entities.remove(&key)
    }

    /// Move a placed entity to `destination` in one step.
    ///
    /// Facing and color are untouched. There is no moment at which the
    /// entity is in neither cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NotPlaced`] for a detached entity,
    /// [`WorldError::OccupiedLocation`] if another entity holds the
    /// destination, or [`WorldError::Grid`] if it is invalid.
    pub fn move_entity(&mut self, key: EntityKey, destination: Coordinate) -> Result<(), WorldError> {
        let from = self
            .entities
            .get(&key)
            .ok_or(WorldError::UnknownEntity { key })?
            .coordinate()
            .ok_or(WorldError::NotPlaced { key })?;
        if from == destination {
            return Ok(());
        }
        if self.grid.get(destination)?.is_some_and(|&other| other != key) {
            return Err(WorldError::OccupiedLocation {
                coordinate: destination,
            });
        }

        self.grid.remove(from)?;
        self.grid.put(destination, key)?;
        let grid = self.grid.id();
        if let Some(entity) = self.entities.get_mut(&key) {
            entity.set_placement(Some(Placement {
                grid,
                coordinate: destination,
            }));
        }
        trace!(%key, %from, to = %destination, "entity moved");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Perception, action, reports
    // -------------------------------------------------------------------

    /// File a report and dispatch it to its handler immediately.
    ///
    /// Reports with no registered handler are recorded and otherwise
    /// ignored. Handler failures are logged, never propagated.
    pub fn report(&mut self, report: ReportEvent) {
        let kind = report.kind();
        self.watchman.record(report.clone());
        let Some(handler) = self.watchman.handler(kind) else {
            debug!(?kind, "no report handler registered");
            return;
        };
        if let Err(err) = handler(self, &report) {
            warn!(?kind, error = %err, "report handler failed");
        }
    }

    /// Show the shell at `key` its neighborhood and store its policy's
    /// answer as its pending actions.
    ///
    /// Does nothing for plain actors and detached shells.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownEntity`] if `key` is not in the arena.
    pub fn respond(&mut self, key: EntityKey, event: &ActorEvent) -> Result<(), WorldError> {
        if !self.entities.contains_key(&key) {
            return Err(WorldError::UnknownEntity { key });
        }
        let Some(view) = perception::perceive(self, key) else {
            return Ok(());
        };

        let tick = self.tick;
        let Self { entities, rng, .. } = self;
        let Some(shell) = entities.get_mut(&key).and_then(Entity::as_shell_mut) else {
            return Ok(());
        };
        let mut ctx = PolicyContext { tick, rng };
        let actions = shell
            .policy_mut()
            .respond(event, &view.me, &view.neighborhood, &mut ctx);
        trace!(%key, count = actions.len(), "policy responded");
        shell.set_pending(actions);
        Ok(())
    }

    /// Let the entity at `key` act once.
    ///
    /// Shells run and clear their pending actions; plain actors run their
    /// built-in behavior.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownEntity`] if `key` is not in the arena,
    /// or a placement error from a plain actor's move.
    pub fn act(&mut self, key: EntityKey) -> Result<(), WorldError> {
        let entity = self
            .entities
            .get(&key)
            .ok_or(WorldError::UnknownEntity { key })?;
        if matches!(entity.kind(), EntityKind::Shell(_)) {
            interpreter::run_pending(self, key);
            Ok(())
        } else {
            actors::act(self, key)
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// Never fails: errors from individual entities are logged and the tick
    /// continues with the next entity.
    pub fn step(&mut self) -> TickSummary {
        self.tick = self.tick.saturating_add(1);
        let grid_id = self.grid.id();
        let roster: Vec<EntityKey> = self.grid.occupants().map(|(_, &key)| key).collect();

        let mut acted: usize = 0;
        let mut skipped: usize = 0;
        for key in roster {
            let Some(entity) = self.entities.get(&key) else {
                skipped = skipped.saturating_add(1);
                continue;
            };
            // Removed (or destroyed) by an earlier entity this tick.
            if entity.grid() != Some(grid_id) {
                skipped = skipped.saturating_add(1);
                continue;
            }
            if entity.as_shell().is_some() {
                if let Err(err) = self.respond(key, &ActorEvent::Step) {
                    warn!(%key, error = %err, "perception failed");
                }
            }
            if let Err(err) = self.act(key) {
                warn!(%key, error = %err, "act failed");
            }
            acted = acted.saturating_add(1);
        }

        let reports = self.watchman.take_filed();
        debug!(
            tick = self.tick,
            acted,
            skipped,
            reports = reports.len(),
            "tick complete"
        );
        TickSummary {
            tick: self.tick,
            acted,
            skipped,
            reports,
        }
    }

    /// A serializable view of every placed entity.
    pub fn snapshot(&self) -> WorldSnapshot {
        let entities = self
            .grid
            .occupants()
            .filter_map(|(&coordinate, key)| {
                let entity = self.entities.get(key)?;
                let account = match entity.kind() {
                    EntityKind::Coin { bank, account } => Some((*bank, *account)),
                    _ => entity.tags().account(keys::MINABLE),
                };
                Some(EntitySnapshot {
                    coordinate,
                    kind: entity.type_name().to_owned(),
                    facing: entity.facing(),
                    color: entity.color(),
                    tags: entity.tags().clone(),
                    shell_id: entity.as_shell().map(crate::Shell::id),
                    account,
                })
            })
            .collect();
        WorldSnapshot {
            tick: self.tick,
            bounds: self.grid.bounds(),
            entities,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shellworld_types::{Action, TagValue};

    use super::*;
    use crate::policy::ScriptedPolicy;
    use crate::shell::Shell;

    fn world(rows: u32, cols: u32) -> World {
        World::new(Grid::bounded(rows, cols).unwrap(), 7)
    }

    fn scripted(id: u32, actions: Vec<Action>) -> Entity {
        Entity::shell(Shell::new(ShellId::new(id), Box::new(ScriptedPolicy::new(actions))))
    }

    #[test]
    fn add_rejects_occupied_and_invalid_cells() {
        let mut w = world(3, 3);
        w.add(Coordinate::new(1, 1), Entity::rock()).unwrap();
        assert_eq!(
            w.add(Coordinate::new(1, 1), Entity::rock()).unwrap_err(),
            WorldError::OccupiedLocation {
                coordinate: Coordinate::new(1, 1)
            }
        );
        assert!(matches!(
            w.add(Coordinate::new(3, 0), Entity::rock()),
            Err(WorldError::Grid { .. })
        ));
    }

    #[test]
    fn remove_detaches_and_double_remove_is_noop() {
        let mut w = world(3, 3);
        let key = w.add(Coordinate::new(0, 0), Entity::rock()).unwrap();
        assert_eq!(w.remove(Coordinate::new(0, 0)).unwrap(), Some(key));
        assert!(w.entity(key).unwrap().placement().is_none());
        assert_eq!(w.remove(Coordinate::new(0, 0)).unwrap(), None);
        assert!(w.detach(key).is_ok());
        assert!(w.grid().is_empty());
    }

    #[test]
    fn place_returns_a_detached_entity() {
        let mut w = world(3, 3);
        let key = w.add(Coordinate::new(0, 0), Entity::rock()).unwrap();
        assert!(matches!(
            w.place(key, Coordinate::new(2, 2)),
            Err(WorldError::AlreadyPlaced { .. })
        ));
        assert!(w.place(key, Coordinate::new(0, 0)).is_ok());
        w.detach(key).unwrap();
        w.place(key, Coordinate::new(2, 2)).unwrap();
        assert_eq!(w.entity(key).unwrap().coordinate(), Some(Coordinate::new(2, 2)));
        assert_eq!(w.grid().get(Coordinate::new(2, 2)).unwrap(), Some(&key));
    }

    #[test]
    fn move_entity_keeps_facing_and_color() {
        let mut w = world(3, 3);
        let key = w
            .add(
                Coordinate::new(0, 0),
                Entity::rock()
                    .facing_toward(Direction::SOUTH)
                    .colored(Color::GREEN),
            )
            .unwrap();
        w.move_entity(key, Coordinate::new(2, 1)).unwrap();
        let rock = w.entity(key).unwrap();
        assert_eq!(rock.coordinate(), Some(Coordinate::new(2, 1)));
        assert_eq!(rock.facing(), Direction::SOUTH);
        assert_eq!(rock.color(), Color::GREEN);
        assert_eq!(w.grid().len(), 1);
        assert!(w.grid().is_empty_at(Coordinate::new(0, 0)));
    }

    #[test]
    fn move_entity_refuses_occupied_destination() {
        let mut w = world(1, 3);
        let a = w.add(Coordinate::new(0, 0), Entity::rock()).unwrap();
        w.add(Coordinate::new(0, 1), Entity::rock()).unwrap();
        assert!(matches!(
            w.move_entity(a, Coordinate::new(0, 1)),
            Err(WorldError::OccupiedLocation { .. })
        ));
        assert_eq!(w.entity(a).unwrap().coordinate(), Some(Coordinate::new(0, 0)));
    }

    #[test]
    fn add_random_fills_then_reports_no_vacancy() {
        let mut w = world(1, 2);
        w.add_random(Entity::rock()).unwrap();
        w.add_random(Entity::rock()).unwrap();
        assert_eq!(w.add_random(Entity::rock()).unwrap_err(), WorldError::NoVacancy);
    }

    #[test]
    fn flowers_fade_each_tick() {
        let mut w = world(2, 2);
        let key = w.add(Coordinate::new(0, 0), Entity::flower()).unwrap();
        w.step();
        assert_eq!(
            w.entity(key).unwrap().color(),
            Color::PINK.darkened(actors::FLOWER_DARKENING_PERCENT)
        );
    }

    #[test]
    fn bug_walks_and_leaves_a_flower() {
        let mut w = world(3, 1);
        let bug = w
            .add(Coordinate::new(2, 0), Entity::bug().colored(Color::GREEN))
            .unwrap();
        w.step();
        assert_eq!(w.entity(bug).unwrap().coordinate(), Some(Coordinate::new(1, 0)));
        let left_behind = w.entity_at(Coordinate::new(2, 0)).unwrap().unwrap();
        assert_eq!(left_behind.type_name(), "Flower");
        assert_eq!(left_behind.color(), Color::GREEN);
    }

    #[test]
    fn bug_turns_at_the_edge() {
        let mut w = world(1, 1);
        let bug = w.add(Coordinate::new(0, 0), Entity::bug()).unwrap();
        w.step();
        assert_eq!(w.entity(bug).unwrap().facing(), Direction::NORTHEAST);
        assert_eq!(w.entity(bug).unwrap().coordinate(), Some(Coordinate::new(0, 0)));
    }

    #[test]
    fn step_runs_shell_policies() {
        let mut w = world(3, 3);
        let key = w
            .add(
                Coordinate::new(1, 1),
                scripted(1, vec![Action::Turn { units: 2 }, Action::Color { color: Color::RED }]),
            )
            .unwrap();
        let summary = w.step();
        assert_eq!(summary.tick, 1);
        assert_eq!(summary.acted, 1);
        assert_eq!(summary.skipped, 0);
        let shell = w.entity(key).unwrap();
        assert_eq!(shell.facing(), Direction::EAST);
        assert_eq!(shell.color(), Color::RED);
    }

    #[test]
    fn snapshot_lists_placed_entities_row_major() {
        let mut w = world(2, 2);
        w.add(
            Coordinate::new(1, 0),
            scripted(9, Vec::new()).tagged(
                keys::MINABLE,
                TagValue::Account {
                    bank: BankId::new(0),
                    account: AccountId::new(3),
                },
            ),
        )
        .unwrap();
        w.add(
            Coordinate::new(0, 1),
            Entity::coin(BankId::new(0), AccountId::new(4)),
        )
        .unwrap();
        let snapshot = w.snapshot();
        assert_eq!(snapshot.entities.len(), 2);
        let first = snapshot.entities.first().unwrap();
        assert_eq!(first.kind, "Coin");
        assert_eq!(first.account, Some((BankId::new(0), AccountId::new(4))));
        let second = snapshot.entities.get(1).unwrap();
        assert_eq!(second.shell_id, Some(ShellId::new(9)));
        assert_eq!(second.account, Some((BankId::new(0), AccountId::new(3))));
        assert!(serde_json::to_string(&snapshot).is_ok());
    }
}
