//! A shell that hunts for coins.

use rand::Rng;
use shellworld_core::{Policy, PolicyContext};
use shellworld_types::{Action, ActorEvent, ActorInfo};

use crate::steering;

/// Type name of coins in perception.
const COIN: &str = "Coin";

/// Default reach of a collection attempt, in cells.
pub const DEFAULT_REACH: f64 = 1.5;

/// Consecutive collections at one spot before wandering off.
pub const DEFAULT_PATIENCE: u32 = 3;

/// Heads for the nearest visible coin and mines it.
///
/// With no coin in sight it wanders. After `patience` collections in a row
/// it assumes the coin is spent and takes one random step away.
#[derive(Debug, Clone)]
pub struct CoinSeeker {
    reach: f64,
    patience: u32,
    streak: u32,
}

impl Default for CoinSeeker {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinSeeker {
    /// Create a seeker with the default reach and patience.
    pub const fn new() -> Self {
        Self {
            reach: DEFAULT_REACH,
            patience: DEFAULT_PATIENCE,
            streak: 0,
        }
    }

    /// Override how far the seeker believes it can collect.
    #[must_use]
    pub const fn with_reach(mut self, reach: f64) -> Self {
        self.reach = reach;
        self
    }

    fn wander<R: Rng + ?Sized>(rng: &mut R) -> Vec<Action> {
        let units = if rng.random_bool(0.5) { -1 } else { 1 };
        vec![Action::Turn { units }, Action::Move { distance: 1 }]
    }
}

impl Policy for CoinSeeker {
    fn species(&self) -> &str {
        "CoinSeeker"
    }

    fn respond(
        &mut self,
        event: &ActorEvent,
        me: &ActorInfo,
        neighborhood: &[ActorInfo],
        ctx: &mut PolicyContext<'_>,
    ) -> Vec<Action> {
        if !matches!(event, ActorEvent::Step) {
            return Vec::new();
        }
        let target = steering::nearest(neighborhood, |info| info.type_name.as_deref() == Some(COIN))
            .and_then(|coin| Some((steering::relative_bearing(me, coin)?, coin.distance?)));

        let Some((relative, distance)) = target else {
            self.streak = 0;
            return Self::wander(&mut *ctx.rng);
        };

        if distance > self.reach {
            self.streak = 0;
            return steering::approach(relative);
        }
        if self.streak >= self.patience {
            self.streak = 0;
            return Self::wander(&mut *ctx.rng);
        }
        self.streak = self.streak.saturating_add(1);
        vec![Action::CollectCoin {
            direction: relative,
            distance,
        }]
    }
}
