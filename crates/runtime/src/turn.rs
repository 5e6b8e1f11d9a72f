//! Player turn composition.
//!
//! A [`PlayerTurn`] chains the interactive pieces of one player decision:
//!
//! ```text
//! Command ─┬─ Attack ──────────────────────────► Target ─► Sequence
//!          ├─ Skill ─► Menu (unless preselected) ─► Target* ─► Sequence
//!          ├─ Item ──► Menu (unless preselected) ─► Target ─► Sequence
//!          └─ Guard ───────────────────────────────────────► Sequence
//!
//! * skipped for self-only skills
//! ```
//!
//! Cancelling the menu or the target selector ends the turn with
//! [`TurnOutcome::Cancelled`] before anything is mutated.
use battle_core::{
    ActionMenu, ActionOutcome, ActionSequence, Command, CommandKind, CombatantId, EffectType,
    MenuResult, Roster, Side, Step, TargetMode, TargetSelection, Task,
};

use crate::context::TurnContext;
use crate::error::{Result, RuntimeError};

/// How a finished turn ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The sequencer ran (possibly rejecting the request).
    Acted(ActionOutcome),

    /// The player backed out of a menu or the target selector.
    Cancelled,
}

/// Which side an effect is aimed at, relative to the actor.
pub fn target_side(actor_side: Side, effect: EffectType) -> Side {
    match effect {
        EffectType::Damage => actor_side.opponent(),
        EffectType::Heal | EffectType::ApplyStatus => actor_side,
    }
}

enum Stage {
    Menu(ActionMenu),
    Target {
        selection: TargetSelection,
        command: Command,
    },
    Act(ActionSequence),
    Done,
}

/// Resumable player turn for one actor.
pub struct PlayerTurn {
    actor: CombatantId,
    side: Side,
    mode: TargetMode,
    stage: Stage,
    pending: Option<Command>,
}

impl PlayerTurn {
    /// Starts a turn for `actor` from the command the player picked.
    ///
    /// ## Errors
    /// - `RuntimeError::UnknownCombatant` if the actor is not in the roster
    pub fn new(actor: CombatantId, command: Command, roster: &Roster) -> Result<Self> {
        let side = roster
            .get(actor)
            .map(|c| c.side)
            .ok_or(RuntimeError::UnknownCombatant(actor))?;

        Ok(Self {
            actor,
            side,
            mode: TargetMode::Single,
            stage: Stage::Done,
            pending: Some(command),
        })
    }

    /// Target mode for skills and items. Basic attacks are always single.
    pub fn with_mode(mut self, mode: TargetMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn actor(&self) -> CombatantId {
        self.actor
    }

    /// Routes a complete command to the menu, the selector or the sequencer.
    fn route(&self, command: Command, roster: &Roster) -> Stage {
        match command.kind {
            CommandKind::Skill if command.skill.is_none() => {
                Stage::Menu(ActionMenu::skills(self.actor))
            }
            CommandKind::Item if command.item.is_none() => {
                Stage::Menu(ActionMenu::items(self.actor))
            }
            CommandKind::Guard => {
                Stage::Act(ActionSequence::new(self.actor, command.into_request(Vec::new())))
            }
            CommandKind::Skill if command.skill.as_ref().is_some_and(|s| s.targets_self_only) => {
                Stage::Act(ActionSequence::new(self.actor, command.into_request(Vec::new())))
            }
            _ => {
                let (effect, mode) = match (&command.kind, &command.skill, &command.item) {
                    (CommandKind::Skill, Some(skill), _) => (skill.effect, self.mode),
                    (CommandKind::Item, _, Some(item)) => (item.effect, self.mode),
                    _ => (EffectType::Damage, TargetMode::Single),
                };
                let pool = roster.side(target_side(self.side, effect));
                Stage::Target {
                    selection: TargetSelection::new(self.actor, pool, mode),
                    command,
                }
            }
        }
    }

    fn finish(&mut self, outcome: TurnOutcome) -> Step<TurnOutcome> {
        tracing::debug!(actor = %self.actor, ?outcome, "player turn finished");
        self.stage = Stage::Done;
        Step::Complete(outcome)
    }
}

impl<'a> Task<TurnContext<'a>> for PlayerTurn {
    type Output = TurnOutcome;

    fn poll(&mut self, ctx: &mut TurnContext<'a>) -> Step<TurnOutcome> {
        let _span = tracing::debug_span!("player_turn", actor = %self.actor).entered();
        if let Some(command) = self.pending.take() {
            self.stage = self.route(command, ctx.roster);
        }

        loop {
            match &mut self.stage {
                Stage::Menu(menu) => {
                    let step = menu.poll(&mut ctx.select());
                    match step {
                        Step::Yield(suspend) => return Step::Yield(suspend),
                        Step::Complete(MenuResult::Cancelled) => {
                            return self.finish(TurnOutcome::Cancelled);
                        }
                        Step::Complete(MenuResult::Skill(skill)) => {
                            self.stage = self.route(Command::skill(skill), ctx.roster);
                        }
                        Step::Complete(MenuResult::Item(item)) => {
                            self.stage = self.route(Command::item(item), ctx.roster);
                        }
                    }
                }

                Stage::Target { selection, command } => {
                    let step = selection.poll(&mut ctx.select());
                    match step {
                        Step::Yield(suspend) => return Step::Yield(suspend),
                        Step::Complete(result) if result.cancelled => {
                            return self.finish(TurnOutcome::Cancelled);
                        }
                        Step::Complete(result) => {
                            let request = command.clone().into_request(result.targets);
                            self.stage = Stage::Act(ActionSequence::new(self.actor, request));
                        }
                    }
                }

                Stage::Act(sequence) => {
                    let step = sequence.poll(&mut ctx.sequence());
                    match step {
                        Step::Yield(suspend) => return Step::Yield(suspend),
                        Step::Complete(outcome) => return self.finish(TurnOutcome::Acted(outcome)),
                    }
                }

                Stage::Done => {
                    tracing::warn!(actor = %self.actor, "polled a finished player turn");
                    return Step::Complete(TurnOutcome::Cancelled);
                }
            }
        }
    }
}
