//! Tracing-backed presentation hooks and resource observers.
//!
//! The runtime has no renderer; these adapters turn presentation calls and
//! HP/SP notifications into structured log events instead.
use battle_core::{
    CombatantId, PopupSink, Presentation, ResourceChanged, ResourceObserver, Roster,
    SubscriptionId,
};

/// Logs every presentation hook and popup.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingPresentation;

impl Presentation for TracingPresentation {
    fn face(&mut self, actor: CombatantId, target: CombatantId) {
        tracing::trace!(%actor, %target, "face");
    }

    fn play_attack(&mut self, actor: CombatantId) {
        tracing::debug!(%actor, "attack animation");
    }

    fn play_hurt(&mut self, target: CombatantId) {
        tracing::debug!(%target, "hurt animation");
    }

    fn play_idle(&mut self, actor: CombatantId) {
        tracing::trace!(%actor, "idle animation");
    }
}

impl PopupSink for TracingPresentation {
    fn spawn(&mut self, target: CombatantId, amount: u32, is_crit: bool, is_heal: bool) {
        tracing::info!(%target, amount, is_crit, is_heal, "popup");
    }
}

/// Logs HP/SP notifications for one combatant.
#[derive(Clone, Debug)]
pub struct ResourceLogger {
    name: String,
}

impl ResourceLogger {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ResourceObserver for ResourceLogger {
    fn on_resource_changed(&mut self, change: &ResourceChanged) {
        tracing::debug!(
            combatant = %change.combatant,
            name = %self.name,
            resource = %change.resource,
            previous = change.previous,
            current = change.current,
            maximum = change.maximum,
            "resource changed"
        );
    }
}

/// Subscribes a [`ResourceLogger`] to every combatant in the roster.
pub fn attach_resource_logging(roster: &mut Roster) -> Vec<(CombatantId, SubscriptionId)> {
    let ids: Vec<_> = roster.ids().collect();
    ids.into_iter()
        .filter_map(|id| {
            let combatant = roster.get_mut(id)?;
            let logger = ResourceLogger::new(combatant.name.clone());
            Some((id, combatant.subscribe(logger)))
        })
        .collect()
}
