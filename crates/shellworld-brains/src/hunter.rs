//! A predator that courts its own kind and eats everything else.
//!
//! Each tick a hunter:
//!
//! 1. Turns orange the first time it runs.
//! 2. Once more than [`BABY_TIME`] ticks have passed since it last nested,
//!    either nests (if it has accepted a mate, skipping the rest of the
//!    tick) or sends a [`MatingCall`] to the nearest hunter it can see.
//! 3. Eats the nearest non-hunter within reach, chases one that is out of
//!    reach, or wanders by turning 45 degrees either way and stepping.
//!
//! A hunter older than [`BABY_TIME`] ticks accepts the first mating call
//! it hears and ignores calls from anyone else until it nests.
//!
//! Consuming requires the shell to carry the predator tag and the
//! cash-grab action registry; the hunter only decides.

use rand::Rng;
use serde::{Deserialize, Serialize};
use shellworld_core::{Policy, PolicyContext};
use shellworld_types::{Action, ActorEvent, ActorInfo, Color, MessageScope, Payload};
use tracing::debug;
use uuid::Uuid;

use crate::steering;

/// Ticks between nests, and the age at which a hunter starts to court.
pub const BABY_TIME: u64 = 30;

/// Type name hunters report and recognize each other by.
pub const SPECIES: &str = "HunterCritter";

/// Default reach of a hunter's bite, in cells.
pub const DEFAULT_REACH: f64 = 1.5;

/// The payload of a courtship message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatingCall {
    /// The caller's identity.
    pub uuid: Uuid,
    /// Whether the caller is female.
    pub female: bool,
    /// How many times the call has been answered back and forth.
    pub pass: u32,
}

impl MatingCall {
    /// Wrap as a message payload.
    pub fn to_payload(&self) -> Payload {
        Payload::Value(serde_json::to_value(self).unwrap_or_default())
    }

    /// Decode a payload, if it is a mating call.
    pub fn from_payload(payload: &Payload) -> Option<Self> {
        match payload {
            Payload::Value(value) => serde_json::from_value(value.clone()).ok(),
            Payload::Text(_) => None,
        }
    }
}

/// Per-hunter state.
#[derive(Debug, Clone)]
pub struct HunterCritter {
    uuid: Uuid,
    female: bool,
    reach: f64,
    first_run: bool,
    time: u64,
    last_baby: u64,
    mate: Option<Uuid>,
}

impl HunterCritter {
    /// Create a hunter whose identity is drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(female: bool, rng: &mut R) -> Self {
        let uuid = uuid::Builder::from_random_bytes(rng.random()).into_uuid();
        Self {
            uuid,
            female,
            reach: DEFAULT_REACH,
            first_run: true,
            time: 0,
            last_baby: 0,
            mate: None,
        }
    }

    /// Override how far the hunter believes it can bite.
    #[must_use]
    pub const fn with_reach(mut self, reach: f64) -> Self {
        self.reach = reach;
        self
    }

    /// This hunter's identity.
    pub const fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// The accepted mate, if any.
    pub const fn mate(&self) -> Option<Uuid> {
        self.mate
    }

    /// Ticks lived.
    pub const fn age(&self) -> u64 {
        self.time
    }

    fn hear(&mut self, call: &MatingCall) {
        if self.time < BABY_TIME {
            return;
        }
        match self.mate {
            None => {
                debug!(hunter = %self.uuid, mate = %call.uuid, "mate accepted");
                self.mate = Some(call.uuid);
            }
            Some(mate) if mate != call.uuid => {
                debug!(hunter = %self.uuid, caller = %call.uuid, "already spoken for");
            }
            Some(_) => {}
        }
    }

    fn court(&self, neighborhood: &[ActorInfo]) -> Option<Action> {
        let lover = steering::nearest(neighborhood, |info| {
            info.type_name.as_deref() == Some(SPECIES)
        })?;
        let call = MatingCall {
            uuid: self.uuid,
            female: self.female,
            pass: 0,
        };
        Some(Action::Message {
            scope: MessageScope::Bearing {
                direction: lover.direction?,
                distance: lover.distance?,
            },
            payload: call.to_payload(),
        })
    }

    fn hunt(&self, me: &ActorInfo, neighborhood: &[ActorInfo]) -> Option<Vec<Action>> {
        let prey = steering::nearest(neighborhood, |info| {
            info.type_name.as_deref().is_some_and(|t| t != SPECIES)
        })?;
        let relative = steering::relative_bearing(me, prey)?;
        let distance = prey.distance?;
        if distance <= self.reach {
            Some(vec![Action::Consume {
                direction: relative,
                distance,
            }])
        } else {
            Some(steering::approach(relative))
        }
    }
}

impl Policy for HunterCritter {
    fn species(&self) -> &str {
        SPECIES
    }

    fn respond(
        &mut self,
        event: &ActorEvent,
        me: &ActorInfo,
        neighborhood: &[ActorInfo],
        ctx: &mut PolicyContext<'_>,
    ) -> Vec<Action> {
        if let ActorEvent::Message { payload, .. } = event {
            if let Some(call) = MatingCall::from_payload(payload) {
                self.hear(&call);
            }
            return Vec::new();
        }

        let mut actions = Vec::new();
        if self.first_run {
            actions.push(Action::Color {
                color: Color::ORANGE,
            });
            self.first_run = false;
        }
        self.time = self.time.saturating_add(1);
        self.last_baby = self.last_baby.saturating_add(1);

        if self.last_baby > BABY_TIME {
            if let Some(mate) = self.mate.take() {
                debug!(hunter = %self.uuid, %mate, "nesting");
                self.last_baby = 0;
                return actions;
            }
            if let Some(call) = self.court(neighborhood) {
                actions.push(call);
            }
        }

        if let Some(hunt) = self.hunt(me, neighborhood) {
            actions.extend(hunt);
            return actions;
        }

        let units = if ctx.rng.random_bool(0.5) { -1 } else { 1 };
        actions.push(Action::Turn { units });
        actions.push(Action::Move { distance: 1 });
        actions
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use shellworld_types::ShellId;

    use super::*;

    fn seen(type_name: &str, distance: f64, direction: f64) -> ActorInfo {
        ActorInfo {
            type_name: Some(type_name.to_owned()),
            distance: Some(distance),
            direction: Some(direction),
            ..ActorInfo::default()
        }
    }

    fn me() -> ActorInfo {
        ActorInfo {
            id: Some(ShellId::new(1)),
            distance: Some(0.0),
            direction: Some(0.0),
            ..ActorInfo::default()
        }
    }

    fn step(hunter: &mut HunterCritter, rng: &mut StdRng, hood: &[ActorInfo]) -> Vec<Action> {
        let mut ctx = PolicyContext { tick: 0, rng };
        hunter.respond(&ActorEvent::Step, &me(), hood, &mut ctx)
    }

    #[test]
    fn first_step_turns_orange_then_wanders() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut hunter = HunterCritter::new(true, &mut rng);
        let actions = step(&mut hunter, &mut rng, &[]);
        assert_eq!(
            actions.first(),
            Some(&Action::Color {
                color: Color::ORANGE
            })
        );
        assert_eq!(actions.last(), Some(&Action::Move { distance: 1 }));

        let again = step(&mut hunter, &mut rng, &[]);
        assert_eq!(again.len(), 2);
    }

    #[test]
    fn eats_the_nearest_prey_in_reach() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut hunter = HunterCritter::new(false, &mut rng);
        let hood = [
            seen("Rock", 2.0, 0.0),
            seen("Flower", 1.0, 90.0),
            seen(SPECIES, 1.0, 180.0),
        ];
        let actions = step(&mut hunter, &mut rng, &hood);
        assert_eq!(
            actions.last(),
            Some(&Action::Consume {
                direction: 90.0,
                distance: 1.0
            })
        );
    }

    #[test]
    fn chases_prey_out_of_reach() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut hunter = HunterCritter::new(false, &mut rng);
        let actions = step(&mut hunter, &mut rng, &[seen("Bug", 3.0, 180.0)]);
        assert_eq!(
            actions.get(1..),
            Some(&[Action::Turn { units: 4 }, Action::Move { distance: 1 }][..])
        );
    }

    #[test]
    fn courts_after_baby_time() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut hunter = HunterCritter::new(true, &mut rng);
        for _ in 0..BABY_TIME {
            step(&mut hunter, &mut rng, &[]);
        }
        let actions = step(&mut hunter, &mut rng, &[seen(SPECIES, 2.0, 45.0)]);
        assert!(hunter.age() > BABY_TIME);
        let call = actions.iter().find_map(|a| match a {
            Action::Message { payload, .. } => MatingCall::from_payload(payload),
            _ => None,
        });
        assert_eq!(
            call,
            Some(MatingCall {
                uuid: hunter.uuid(),
                female: true,
                pass: 0
            })
        );
    }

    #[test]
    fn accepts_one_mate_and_nests() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut hunter = HunterCritter::new(false, &mut rng);
        let suitor = MatingCall {
            uuid: Uuid::nil(),
            female: true,
            pass: 0,
        };
        let message = |call: &MatingCall| ActorEvent::Message {
            sender: ShellId::new(2),
            payload: call.to_payload(),
        };

        // Too young to listen.
        let mut ctx = PolicyContext { tick: 0, rng: &mut rng };
        hunter.respond(&message(&suitor), &me(), &[], &mut ctx);
        assert!(hunter.mate().is_none());

        for _ in 0..BABY_TIME {
            step(&mut hunter, &mut rng, &[]);
        }
        let mut ctx = PolicyContext { tick: 0, rng: &mut rng };
        hunter.respond(&message(&suitor), &me(), &[], &mut ctx);
        assert_eq!(hunter.mate(), Some(Uuid::nil()));

        let rival = MatingCall {
            uuid: Uuid::from_u128(1),
            ..suitor
        };
        hunter.respond(&message(&rival), &me(), &[], &mut ctx);
        assert_eq!(hunter.mate(), Some(Uuid::nil()));

        let nest = step(&mut hunter, &mut rng, &[seen("Rock", 1.0, 0.0)]);
        assert!(nest.is_empty());
        assert!(hunter.mate().is_none());
    }

    #[test]
    fn text_messages_are_not_mating_calls() {
        assert!(MatingCall::from_payload(&Payload::from("hey baby")).is_none());
    }
}
