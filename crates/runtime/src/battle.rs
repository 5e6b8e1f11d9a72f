//! Round-based battle loop.
//!
//! Every round walks the roster in insertion order. Dead combatants are
//! skipped; everyone else asks its side's [`Controller`] for a decision. A
//! player [`Command`] runs through a [`PlayerTurn`] (menus and target
//! selection), an AI [`Intent`] goes straight to the sequencer.
//!
//! The battle ends when a side has no live combatants or the round limit is
//! reached. Only one turn is active at a time.
use battle_core::{
    ActionOutcome, ActionRequest, ActionSequence, Command, CombatantId, Intent, Roster, Side,
    Step, Task,
};

use crate::context::TurnContext;
use crate::error::{Result, RuntimeError};
use crate::turn::{PlayerTurn, TurnOutcome};

/// Consecutive cancelled turns after which the actor guards instead.
pub const MAX_CANCELLED_TURNS: u32 = 3;

/// A decision from either a player-input layer or an AI layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Command(Command),
    Intent(Intent),
}

impl From<Command> for Decision {
    fn from(command: Command) -> Self {
        Decision::Command(command)
    }
}

impl From<Intent> for Decision {
    fn from(intent: Intent) -> Self {
        Decision::Intent(intent)
    }
}

/// Source of decisions for one side.
pub trait Controller {
    fn decide(&mut self, actor: CombatantId, roster: &Roster) -> Decision;
}

impl<F> Controller for F
where
    F: FnMut(CombatantId, &Roster) -> Decision,
{
    fn decide(&mut self, actor: CombatantId, roster: &Roster) -> Decision {
        self(actor, roster)
    }
}

/// Controller that always guards.
#[derive(Clone, Copy, Debug, Default)]
pub struct GuardController;

impl Controller for GuardController {
    fn decide(&mut self, _actor: CombatantId, _roster: &Roster) -> Decision {
        Decision::Command(Command::guard())
    }
}

/// One completed turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnRecord {
    pub round: u32,
    pub actor: CombatantId,
    pub outcome: ActionOutcome,
}

/// How the battle ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleOutcome {
    /// `None` when the round limit was reached first.
    pub winner: Option<Side>,
    pub rounds: u32,
    pub turns: Vec<TurnRecord>,
}

enum ActiveTurn {
    Player(PlayerTurn),
    Ai(ActionSequence),
}

/// Resumable battle over a roster.
pub struct Battle {
    party: Box<dyn Controller>,
    enemy: Box<dyn Controller>,
    max_rounds: u32,
    round: u32,
    order: Vec<CombatantId>,
    next: usize,
    active: Option<(CombatantId, ActiveTurn)>,
    cancelled: u32,
    turns: Vec<TurnRecord>,
}

impl Battle {
    /// Prepares a battle; both sides must have someone alive.
    ///
    /// ## Errors
    /// - `RuntimeError::NoLiveCombatants` if either side is already wiped out
    pub fn new(
        roster: &Roster,
        party: Box<dyn Controller>,
        enemy: Box<dyn Controller>,
        max_rounds: u32,
    ) -> Result<Self> {
        for side in [Side::Party, Side::Enemy] {
            if !roster.side_alive(side) {
                return Err(RuntimeError::NoLiveCombatants { side });
            }
        }

        Ok(Self {
            party,
            enemy,
            max_rounds: max_rounds.max(1),
            round: 0,
            order: Vec::new(),
            next: 0,
            active: None,
            cancelled: 0,
            turns: Vec::new(),
        })
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn turns(&self) -> &[TurnRecord] {
        &self.turns
    }

    fn winner(roster: &Roster) -> Option<Side> {
        match (roster.side_alive(Side::Party), roster.side_alive(Side::Enemy)) {
            (true, false) => Some(Side::Party),
            (false, true) => Some(Side::Enemy),
            _ => None,
        }
    }

    fn is_over(roster: &Roster) -> bool {
        !roster.side_alive(Side::Party) || !roster.side_alive(Side::Enemy)
    }

    fn finish(&mut self, winner: Option<Side>) -> Step<BattleOutcome> {
        tracing::info!(
            ?winner,
            rounds = self.round,
            turns = self.turns.len(),
            "battle finished"
        );
        Step::Complete(BattleOutcome {
            winner,
            rounds: self.round,
            turns: std::mem::take(&mut self.turns),
        })
    }

    /// Picks the next live actor, starting a new round when needed.
    fn next_actor(&mut self, roster: &Roster) -> Option<CombatantId> {
        loop {
            if self.next >= self.order.len() {
                if self.round >= self.max_rounds {
                    return None;
                }
                self.round += 1;
                self.order = roster.ids().collect();
                self.next = 0;
                tracing::info!(round = self.round, "round started");
            }

            let actor = self.order[self.next];
            if roster.is_alive(actor) {
                return Some(actor);
            }
            self.next += 1;
        }
    }

    fn begin_turn(&mut self, actor: CombatantId, roster: &Roster) -> Result<ActiveTurn> {
        let side = roster
            .get(actor)
            .map(|c| c.side)
            .ok_or(RuntimeError::UnknownCombatant(actor))?;

        let decision = if self.cancelled >= MAX_CANCELLED_TURNS {
            tracing::warn!(%actor, cancelled = self.cancelled, "too many cancelled turns, guarding");
            Decision::Command(Command::guard())
        } else {
            match side {
                Side::Party => self.party.decide(actor, roster),
                Side::Enemy => self.enemy.decide(actor, roster),
            }
        };
        tracing::debug!(%actor, %side, ?decision, "turn started");

        Ok(match decision {
            Decision::Command(command) => ActiveTurn::Player(PlayerTurn::new(actor, command, roster)?),
            Decision::Intent(intent) => {
                ActiveTurn::Ai(ActionSequence::new(actor, ActionRequest::from(intent)))
            }
        })
    }

    fn end_turn(&mut self, actor: CombatantId, outcome: TurnOutcome) {
        match outcome {
            TurnOutcome::Acted(outcome) => {
                self.cancelled = 0;
                self.next += 1;
                self.turns.push(TurnRecord {
                    round: self.round,
                    actor,
                    outcome,
                });
            }
            TurnOutcome::Cancelled => {
                // Same actor decides again.
                self.cancelled += 1;
            }
        }
    }
}

impl<'a> Task<TurnContext<'a>> for Battle {
    type Output = BattleOutcome;

    fn poll(&mut self, ctx: &mut TurnContext<'a>) -> Step<BattleOutcome> {
        let _battle = tracing::info_span!("battle").entered();
        loop {
            if let Some((actor, turn)) = self.active.as_mut() {
                let actor = *actor;
                let _turn = tracing::info_span!("turn", round = self.round, %actor).entered();
                let step = match turn {
                    ActiveTurn::Player(turn) => turn.poll(ctx),
                    ActiveTurn::Ai(sequence) => match sequence.poll(&mut ctx.sequence()) {
                        Step::Yield(suspend) => Step::Yield(suspend),
                        Step::Complete(outcome) => Step::Complete(TurnOutcome::Acted(outcome)),
                    },
                };
                match step {
                    Step::Yield(suspend) => return Step::Yield(suspend),
                    Step::Complete(outcome) => {
                        self.active = None;
                        self.end_turn(actor, outcome);
                    }
                }
            }

            if Self::is_over(ctx.roster) {
                return self.finish(Self::winner(ctx.roster));
            }

            let Some(actor) = self.next_actor(ctx.roster) else {
                return self.finish(None);
            };

            match self.begin_turn(actor, ctx.roster) {
                Ok(turn) => self.active = Some((actor, turn)),
                Err(error) => {
                    tracing::warn!(%actor, %error, "skipping turn");
                    self.next += 1;
                }
            }
        }
    }
}
