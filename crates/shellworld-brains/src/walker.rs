//! A shell that wanders at random.

use rand::Rng;
use shellworld_core::{Policy, PolicyContext};
use shellworld_types::{Action, ActorEvent, ActorInfo};

/// Each tick: turn 90 degrees left or right at random, then step forward.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomWalker;

impl RandomWalker {
    /// Create a new walker.
    pub const fn new() -> Self {
        Self
    }
}

impl Policy for RandomWalker {
    fn species(&self) -> &str {
        "RandomWalker"
    }

    fn respond(
        &mut self,
        event: &ActorEvent,
        _me: &ActorInfo,
        _neighborhood: &[ActorInfo],
        ctx: &mut PolicyContext<'_>,
    ) -> Vec<Action> {
        if !matches!(event, ActorEvent::Step) {
            return Vec::new();
        }
        let units = if ctx.rng.random_bool(0.5) { -2 } else { 2 };
        vec![Action::Turn { units }, Action::Move { distance: 1 }]
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use shellworld_types::ShellId;

    use super::*;

    #[test]
    fn walker_turns_a_quarter_then_moves() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = PolicyContext {
            tick: 1,
            rng: &mut rng,
        };
        let actions = RandomWalker::new().respond(&ActorEvent::Step, &ActorInfo::default(), &[], &mut ctx);
        assert_eq!(actions.len(), 2);
        assert!(matches!(
            actions.first(),
            Some(Action::Turn { units: -2 | 2 })
        ));
        assert_eq!(actions.get(1), Some(&Action::Move { distance: 1 }));
    }

    #[test]
    fn walker_ignores_messages() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = PolicyContext {
            tick: 1,
            rng: &mut rng,
        };
        let event = ActorEvent::Message {
            sender: ShellId::new(3),
            payload: "hi".into(),
        };
        assert!(RandomWalker::new().respond(&event, &ActorInfo::default(), &[], &mut ctx).is_empty());
    }
}
