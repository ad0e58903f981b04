//! Simulated objects and their placement on a grid.
//!
//! Every entity lives in its world's arena under an [`EntityKey`]; the
//! grid stores keys, never entities. An entity's [`Placement`] is the only
//! link from the entity back to the grid, and it is cleared whenever the
//! entity leaves the grid.

use shellworld_types::{AccountId, BankId, Color, Coordinate, Direction, GridId, TagStore, TagValue};

use crate::shell::Shell;

/// Where an entity currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// The grid holding the entity.
    pub grid: GridId,
    /// The cell it occupies.
    pub coordinate: Coordinate,
}

/// What kind of thing an entity is.
#[derive(Debug)]
pub enum EntityKind {
    /// A policy-driven agent.
    Shell(Box<Shell>),
    /// An inert token bound to a bank account.
    Coin {
        /// Bank holding the coin's balance.
        bank: BankId,
        /// The coin's account in that bank.
        account: AccountId,
    },
    /// An inert obstacle.
    Rock,
    /// Darkens a little every tick.
    Flower,
    /// Walks forward, leaving flowers behind.
    Bug,
}

/// A simulated object.
#[derive(Debug)]
pub struct Entity {
    kind: EntityKind,
    placement: Option<Placement>,
    facing: Direction,
    color: Color,
    tags: TagStore,
}

impl Entity {
    /// Create a detached entity facing North.
    pub const fn new(kind: EntityKind, color: Color) -> Self {
        Self {
            kind,
            placement: None,
            facing: Direction::NORTH,
            color,
            tags: TagStore::new(),
        }
    }

    /// A shell in the default blue.
    pub fn shell(shell: Shell) -> Self {
        Self::new(EntityKind::Shell(Box::new(shell)), Color::BLUE)
    }

    /// A coin bound to `(bank, account)`.
    pub const fn coin(bank: BankId, account: AccountId) -> Self {
        Self::new(EntityKind::Coin { bank, account }, Color::YELLOW)
    }

    /// A black rock.
    pub const fn rock() -> Self {
        Self::new(EntityKind::Rock, Color::BLACK)
    }

    /// A pink flower.
    pub const fn flower() -> Self {
        Self::new(EntityKind::Flower, Color::PINK)
    }

    /// A red bug.
    pub const fn bug() -> Self {
        Self::new(EntityKind::Bug, Color::RED)
    }

    /// Set the initial facing.
    #[must_use]
    pub const fn facing_toward(mut self, facing: Direction) -> Self {
        self.facing = facing.normalized();
        self
    }

    /// Set the initial color.
    #[must_use]
    pub const fn colored(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set a tag at construction.
    #[must_use]
    pub fn tagged(mut self, key: &str, value: TagValue) -> Self {
        self.tags.set(key, value);
        self
    }

    /// What kind of entity this is.
    pub const fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// The name shown to perceiving shells and renderers.
    pub fn type_name(&self) -> &str {
        match &self.kind {
            EntityKind::Shell(shell) => shell.species(),
            EntityKind::Coin { .. } => "Coin",
            EntityKind::Rock => "Rock",
            EntityKind::Flower => "Flower",
            EntityKind::Bug => "Bug",
        }
    }

    /// The shell inside, if this is one.
    pub fn as_shell(&self) -> Option<&Shell> {
        match &self.kind {
            EntityKind::Shell(shell) => Some(shell),
            _ => None,
        }
    }

    /// The shell inside, mutably.
    pub fn as_shell_mut(&mut self) -> Option<&mut Shell> {
        match &mut self.kind {
            EntityKind::Shell(shell) => Some(shell),
            _ => None,
        }
    }

    /// Current placement, `None` when detached.
    pub const fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Current cell, `None` when detached.
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.placement.map(|p| p.coordinate)
    }

    /// The grid the entity is on, `None` when detached.
    pub fn grid(&self) -> Option<GridId> {
        self.placement.map(|p| p.grid)
    }

    /// Current facing in `[0, 360)`.
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Current color.
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Turn to face `facing`.
    pub const fn set_facing(&mut self, facing: Direction) {
        self.facing = facing.normalized();
    }

    /// Recolor.
    pub const fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// The entity's tags.
    pub const fn tags(&self) -> &TagStore {
        &self.tags
    }

    /// The entity's tags, mutably.
    pub const fn tags_mut(&mut self) -> &mut TagStore {
        &mut self.tags
    }

    pub(crate) const fn set_placement(&mut self, placement: Option<Placement>) {
        self.placement = placement;
    }
}
