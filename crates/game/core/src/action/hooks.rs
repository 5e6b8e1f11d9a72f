//! Presentation collaborators consumed by the sequencer.
//!
//! Hooks are fire-and-forget: they return nothing and never suspend. Any
//! time spent "playing an animation" is expressed by the sequencer's own
//! windup/recover waits.

use crate::state::CombatantId;

/// Animation hooks. Every method defaults to a no-op.
pub trait Presentation {
    /// Turn the actor toward its target before an attack.
    fn face(&mut self, _actor: CombatantId, _target: CombatantId) {}

    fn play_attack(&mut self, _actor: CombatantId) {}

    fn play_hurt(&mut self, _target: CombatantId) {}

    fn play_idle(&mut self, _actor: CombatantId) {}
}

/// Receives damage/heal numbers for on-screen popups. Purely observational.
pub trait PopupSink {
    fn spawn(&mut self, target: CombatantId, amount: u32, is_crit: bool, is_heal: bool);
}

/// Presentation that ignores every hook.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPresentation;

impl Presentation for NoPresentation {}

/// A presentation call, as captured by [`PresentationLog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentationEvent {
    Face {
        actor: CombatantId,
        target: CombatantId,
    },
    Attack(CombatantId),
    Hurt(CombatantId),
    Idle(CombatantId),
    Popup {
        target: CombatantId,
        amount: u32,
        is_crit: bool,
        is_heal: bool,
    },
}

/// Records hooks and popups in call order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresentationLog {
    pub events: Vec<PresentationEvent>,
}

impl PresentationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hurt_count(&self, target: CombatantId) -> usize {
        self.events
            .iter()
            .filter(|e| **e == PresentationEvent::Hurt(target))
            .count()
    }

    pub fn popups(&self) -> impl Iterator<Item = &PresentationEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, PresentationEvent::Popup { .. }))
    }
}

impl Presentation for PresentationLog {
    fn face(&mut self, actor: CombatantId, target: CombatantId) {
        self.events.push(PresentationEvent::Face { actor, target });
    }

    fn play_attack(&mut self, actor: CombatantId) {
        self.events.push(PresentationEvent::Attack(actor));
    }

    fn play_hurt(&mut self, target: CombatantId) {
        self.events.push(PresentationEvent::Hurt(target));
    }

    fn play_idle(&mut self, actor: CombatantId) {
        self.events.push(PresentationEvent::Idle(actor));
    }
}

impl PopupSink for PresentationLog {
    fn spawn(&mut self, target: CombatantId, amount: u32, is_crit: bool, is_heal: bool) {
        self.events.push(PresentationEvent::Popup {
            target,
            amount,
            is_crit,
            is_heal,
        });
    }
}
