//! Interactive target selection.
//!
//! [`TargetSelection`] narrows a candidate pool to the combatants an action
//! will affect. The pool is filtered to live combatants once, on the first
//! poll, preserving pool order. From then on the selector reads one frame of
//! input per tick until the player confirms or cancels.
//!
//! ## Tick Order
//!
//! - First poll: filter the pool. Empty → complete as cancelled. Otherwise
//!   highlight the first live entry and spend one tick ignoring input.
//! - Every later poll: previous, next, cancel, confirm, then yield.

use crate::select::{InputEvents, ListCursor, SelectContext};
use crate::state::CombatantId;
use crate::task::{Step, Task};

/// Whether an action affects one chosen combatant or the whole live pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetMode {
    #[default]
    Single,
    All,
}

/// Outcome of a selection loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionResult {
    pub cancelled: bool,
    pub targets: Vec<CombatantId>,
}

impl SelectionResult {
    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            targets: Vec::new(),
        }
    }

    pub fn chosen(targets: Vec<CombatantId>) -> Self {
        Self {
            cancelled: false,
            targets,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Start,
    Polling,
    Done,
}

/// Resumable target selection loop.
#[derive(Clone, Debug)]
pub struct TargetSelection {
    actor: CombatantId,
    pool: Vec<CombatantId>,
    live: Vec<CombatantId>,
    mode: TargetMode,
    cursor: ListCursor,
    phase: Phase,
}

impl TargetSelection {
    pub fn new(actor: CombatantId, pool: Vec<CombatantId>, mode: TargetMode) -> Self {
        Self {
            actor,
            pool,
            live: Vec::new(),
            mode,
            cursor: ListCursor::new(),
            phase: Phase::Start,
        }
    }

    pub fn actor(&self) -> CombatantId {
        self.actor
    }

    pub fn mode(&self) -> TargetMode {
        self.mode
    }

    /// The combatant under the cursor, once the live pool is known.
    pub fn focused(&self) -> Option<CombatantId> {
        self.live.get(self.cursor.index()).copied()
    }

    fn highlight(&self, ctx: &mut SelectContext<'_>) {
        if let (Some(view), Some(target)) = (ctx.view.as_deref_mut(), self.focused()) {
            view.highlight(target);
        }
    }

    fn finish(&mut self, ctx: &mut SelectContext<'_>, result: SelectionResult) -> Step<SelectionResult> {
        if let Some(view) = ctx.view.as_deref_mut() {
            view.clear();
        }
        tracing::debug!(
            actor = %self.actor,
            mode = %self.mode,
            cancelled = result.cancelled,
            count = result.targets.len(),
            "target selection finished"
        );
        self.phase = Phase::Done;
        Step::Complete(result)
    }
}

impl<'a> Task<SelectContext<'a>> for TargetSelection {
    type Output = SelectionResult;

    fn poll(&mut self, ctx: &mut SelectContext<'a>) -> Step<SelectionResult> {
        match self.phase {
            Phase::Start => {
                self.live = ctx.roster.live(&self.pool);
                self.cursor.reset();
                if self.live.is_empty() {
                    return self.finish(ctx, SelectionResult::cancelled());
                }
                self.highlight(ctx);
                self.phase = Phase::Polling;
                Step::next_tick()
            }

            Phase::Polling => {
                let events = ctx.input.poll_events();
                let len = self.live.len();
                tracing::trace!(actor = %self.actor, ?events, cursor = self.cursor.index(), "target input");

                if events.contains(InputEvents::PREVIOUS) {
                    self.cursor.previous(len);
                    self.highlight(ctx);
                }
                if events.contains(InputEvents::NEXT) {
                    self.cursor.next(len);
                    self.highlight(ctx);
                }
                if events.contains(InputEvents::CANCEL) {
                    return self.finish(ctx, SelectionResult::cancelled());
                }
                if events.contains(InputEvents::CONFIRM) {
                    let targets = match self.mode {
                        TargetMode::All => self.live.clone(),
                        TargetMode::Single => self.focused().into_iter().collect(),
                    };
                    return self.finish(ctx, SelectionResult::chosen(targets));
                }
                Step::next_tick()
            }

            Phase::Done => {
                tracing::warn!(actor = %self.actor, "polled a finished target selection");
                Step::Complete(SelectionResult::cancelled())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::ScriptedInput;
    use crate::state::{Combatant, Roster, Side};

    fn three_slimes() -> (Roster, Vec<CombatantId>) {
        let mut roster = Roster::new();
        let ids = ["a", "b", "c"]
            .into_iter()
            .map(|name| roster.insert(Combatant::new(name, Side::Enemy, 10, 0)))
            .collect();
        (roster, ids)
    }

    #[test]
    fn previous_from_start_wraps_to_last() {
        let (roster, pool) = three_slimes();
        let mut input = ScriptedInput::new([InputEvents::PREVIOUS, InputEvents::CONFIRM]);
        let mut ctx = SelectContext::new(&roster, &mut input);
        let mut selection = TargetSelection::new(CombatantId(9), pool.clone(), TargetMode::Single);

        assert!(!selection.poll(&mut ctx).is_complete());
        assert!(!selection.poll(&mut ctx).is_complete());
        let result = selection.poll(&mut ctx).into_output();

        assert_eq!(result, Some(SelectionResult::chosen(vec![pool[2]])));
    }

    #[test]
    fn reset_tick_ignores_input() {
        let (roster, pool) = three_slimes();
        let mut input = ScriptedInput::new([InputEvents::CANCEL]);
        let mut ctx = SelectContext::new(&roster, &mut input);
        let mut selection = TargetSelection::new(CombatantId(9), pool, TargetMode::Single);

        // The cancel frame is still queued after the reset tick.
        assert!(!selection.poll(&mut ctx).is_complete());
        let result = selection.poll(&mut ctx).into_output();
        assert_eq!(result, Some(SelectionResult::cancelled()));
    }
}
