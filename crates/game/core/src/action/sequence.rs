//! Action sequencing state machine.
//!
//! An [`ActionSequence`] turns one request into an ordered series of steps:
//! resource gating, windup, effect application, recover. Mutations are
//! committed the moment they happen; the sequence never batches or rolls
//! back. Once admitted, an action runs to completion.
//!
//! ## Step Order
//!
//! - **BasicAttack**: face → attack hook → wait windup → damage first target
//!   → hurt hook if alive → wait recover → idle hook → gain SP
//! - **Skill**: spend SP → attack hook → wait windup → effect → wait recover
//! - **Item**: consume one unit → effect → wait one tick
//! - **Guard**: complete immediately

use core::mem;
use core::time::Duration;
use std::sync::Arc;

use crate::action::hooks::{PopupSink, Presentation};
use crate::action::request::ActionRequest;
use crate::action::validation::{ActionPlan, admit};
use crate::combat::{heal_amount, physical};
use crate::config::BattleConfig;
use crate::definition::{EffectType, ItemDefinition, SkillDefinition, StatusDefinition};
use crate::error::{BattleError, Rejection};
use crate::state::{CombatantId, Roster};
use crate::task::{Step, Task};

/// Everything a sequence borrows for one poll.
pub struct SequenceContext<'a> {
    pub roster: &'a mut Roster,
    pub config: &'a BattleConfig,
    pub presentation: &'a mut dyn Presentation,
    pub popups: Option<&'a mut dyn PopupSink>,
}

impl<'a> SequenceContext<'a> {
    pub fn new(
        roster: &'a mut Roster,
        config: &'a BattleConfig,
        presentation: &'a mut dyn Presentation,
    ) -> Self {
        Self {
            roster,
            config,
            presentation,
            popups: None,
        }
    }

    pub fn with_popups(mut self, popups: &'a mut dyn PopupSink) -> Self {
        self.popups = Some(popups);
        self
    }

    fn popup(&mut self, target: CombatantId, amount: u32, is_heal: bool) {
        if let Some(popups) = self.popups.as_deref_mut() {
            popups.spawn(target, amount, false, is_heal);
        }
    }
}

/// A single committed effect, in application order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppliedEffect {
    Damage { target: CombatantId, amount: u32 },
    Heal { target: CombatantId, amount: u32 },
    Status { target: CombatantId, status: String },
    SpSpent(u32),
    SpGained(u32),
    ItemConsumed(String),
}

/// Summary of what an action did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionReport {
    pub applied: Vec<AppliedEffect>,
}

impl ActionReport {
    pub fn total_damage(&self) -> u32 {
        self.applied
            .iter()
            .map(|e| match e {
                AppliedEffect::Damage { amount, .. } => *amount,
                _ => 0,
            })
            .sum()
    }

    pub fn total_healing(&self) -> u32 {
        self.applied
            .iter()
            .map(|e| match e {
                AppliedEffect::Heal { amount, .. } => *amount,
                _ => 0,
            })
            .sum()
    }
}

/// Final result of a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action ran. The report may be empty (guard, no targets left).
    Completed(ActionReport),

    /// A gate fired before anything was committed or awaited.
    Rejected(Rejection),
}

impl ActionOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, ActionOutcome::Rejected(_))
    }

    pub fn report(&self) -> Option<&ActionReport> {
        match self {
            ActionOutcome::Completed(report) => Some(report),
            ActionOutcome::Rejected(_) => None,
        }
    }
}

#[derive(Debug)]
enum Stage {
    Start(ActionRequest),
    AttackImpact {
        target: CombatantId,
        recover: Duration,
    },
    AttackFinish,
    SkillImpact {
        skill: Arc<SkillDefinition>,
        targets: Vec<CombatantId>,
        recover: Duration,
    },
    Finish,
    Done,
}

/// Resumable execution of one action for one actor.
#[derive(Debug)]
pub struct ActionSequence {
    actor: CombatantId,
    stage: Stage,
    report: ActionReport,
}

impl ActionSequence {
    pub fn new(actor: CombatantId, request: ActionRequest) -> Self {
        Self {
            actor,
            stage: Stage::Start(request),
            report: ActionReport::default(),
        }
    }

    pub fn actor(&self) -> CombatantId {
        self.actor
    }

    fn start(&mut self, request: ActionRequest, ctx: &mut SequenceContext<'_>) -> Step<ActionOutcome> {
        let kind = request.kind.as_snake_case();
        let plan = match admit(self.actor, &request, ctx.roster) {
            Ok(plan) => plan,
            Err(rejection) => return self.reject(kind, rejection),
        };

        tracing::debug!(actor = %self.actor, kind, "action admitted");

        match plan {
            ActionPlan::BasicAttack { target } => {
                let Some(actor) = ctx.roster.get(self.actor) else {
                    return self.reject(kind, Rejection::UnknownCombatant(self.actor));
                };
                let timing = actor.timing;

                ctx.presentation.face(self.actor, target);
                ctx.presentation.play_attack(self.actor);
                self.stage = Stage::AttackImpact {
                    target,
                    recover: timing.recover(),
                };
                Step::wait(timing.windup())
            }

            ActionPlan::Skill { skill, targets } => {
                let Some(actor) = ctx.roster.get_mut(self.actor) else {
                    return self.reject(kind, Rejection::UnknownCombatant(self.actor));
                };
                let timing = actor.timing;

                actor.set_sp(i64::from(actor.current_sp()) - i64::from(skill.sp_cost));
                if skill.sp_cost > 0 {
                    self.report.applied.push(AppliedEffect::SpSpent(skill.sp_cost));
                }

                ctx.presentation.play_attack(self.actor);
                self.stage = Stage::SkillImpact {
                    skill,
                    targets,
                    recover: timing.recover(),
                };
                Step::wait(timing.windup())
            }

            ActionPlan::Item { item, targets } => {
                let Some(actor) = ctx.roster.get_mut(self.actor) else {
                    return self.reject(kind, Rejection::UnknownCombatant(self.actor));
                };
                // No inventory means unlimited use; nothing is consumed.
                if let Some(inventory) = actor.inventory.as_mut() {
                    if !inventory.try_consume(&item, 1) {
                        return self.reject(kind, Rejection::ItemUnavailable);
                    }
                    self.report
                        .applied
                        .push(AppliedEffect::ItemConsumed(item.id.clone()));
                }

                self.apply_item(&item, &targets, ctx);
                self.stage = Stage::Finish;
                Step::next_tick()
            }

            ActionPlan::Guard => self.complete(),
        }
    }

    fn attack_impact(
        &mut self,
        target: CombatantId,
        recover: Duration,
        ctx: &mut SequenceContext<'_>,
    ) -> Step<ActionOutcome> {
        let attacker = ctx.roster.get(self.actor).map(|c| c.stats).unwrap_or_default();

        if let Some(defender) = ctx.roster.get_mut(target) {
            let damage = physical(
                None,
                &attacker,
                &defender.stats,
                0,
                false,
                &ctx.config.damage,
            );
            defender.set_hp(i64::from(defender.current_hp()) - i64::from(damage));
            let alive = defender.is_alive();

            self.report
                .applied
                .push(AppliedEffect::Damage { target, amount: damage });
            ctx.popup(target, damage, false);
            if alive {
                ctx.presentation.play_hurt(target);
            }
        }

        self.stage = Stage::AttackFinish;
        Step::wait(recover)
    }

    fn attack_finish(&mut self, ctx: &mut SequenceContext<'_>) -> Step<ActionOutcome> {
        ctx.presentation.play_idle(self.actor);

        let gain = ctx.config.basic_attack_sp_gain;
        let cap = ctx.config.sp_cap();
        if let Some(actor) = ctx.roster.get_mut(self.actor) {
            let before = actor.current_sp();
            actor.gain_sp(gain.min(cap.saturating_sub(before)));
            let gained = actor.current_sp().saturating_sub(before);
            if gained > 0 {
                self.report.applied.push(AppliedEffect::SpGained(gained));
            }
        }

        self.complete()
    }

    fn skill_impact(
        &mut self,
        skill: Arc<SkillDefinition>,
        targets: Vec<CombatantId>,
        recover: Duration,
        ctx: &mut SequenceContext<'_>,
    ) -> Step<ActionOutcome> {
        match skill.effect {
            EffectType::Damage => {
                let attacker = ctx.roster.get(self.actor).map(|c| c.stats).unwrap_or_default();
                for &target in &targets {
                    let Some(defender) = ctx.roster.get_mut(target) else {
                        continue;
                    };
                    if !defender.is_alive() {
                        continue;
                    }
                    let damage = physical(
                        Some(skill.as_ref()),
                        &attacker,
                        &defender.stats,
                        skill.power,
                        skill.override_with_power,
                        &ctx.config.damage,
                    );
                    defender.set_hp(i64::from(defender.current_hp()) - i64::from(damage));
                    let alive = defender.is_alive();

                    self.report
                        .applied
                        .push(AppliedEffect::Damage { target, amount: damage });
                    ctx.popup(target, damage, false);
                    if alive {
                        ctx.presentation.play_hurt(target);
                    }
                }
            }
            EffectType::Heal => {
                let targets = self.default_to_self(targets, &skill);
                self.apply_heal(&targets, skill.power, skill.is_percent, ctx);
            }
            EffectType::ApplyStatus => {
                let targets = self.default_to_self(targets, &skill);
                if let Some(status) = &skill.status_to_apply {
                    self.apply_status(&targets, status, ctx);
                }
            }
        }

        self.stage = Stage::Finish;
        Step::wait(recover)
    }

    /// Self-only skills issued without targets act on the caster.
    fn default_to_self(&self, targets: Vec<CombatantId>, skill: &SkillDefinition) -> Vec<CombatantId> {
        if targets.is_empty() && skill.targets_self_only {
            vec![self.actor]
        } else {
            targets
        }
    }

    /// Items take their targets as given; damage items have no item branch.
    fn apply_item(
        &mut self,
        item: &ItemDefinition,
        targets: &[CombatantId],
        ctx: &mut SequenceContext<'_>,
    ) {
        match item.effect {
            EffectType::Heal => self.apply_heal(targets, item.power, item.is_percent, ctx),
            EffectType::ApplyStatus => {
                if let Some(status) = &item.status_to_apply {
                    self.apply_status(targets, status, ctx);
                }
            }
            EffectType::Damage => {}
        }
    }

    fn apply_heal(
        &mut self,
        targets: &[CombatantId],
        power: u32,
        is_percent: bool,
        ctx: &mut SequenceContext<'_>,
    ) {
        for &target in targets {
            let Some(combatant) = ctx.roster.get_mut(target) else {
                continue;
            };
            let amount = heal_amount(combatant.max_hp(), power, is_percent);
            combatant.set_hp(i64::from(combatant.current_hp()) + i64::from(amount));

            self.report.applied.push(AppliedEffect::Heal { target, amount });
            ctx.popup(target, amount, true);
        }
    }

    fn apply_status(
        &mut self,
        targets: &[CombatantId],
        status: &Arc<StatusDefinition>,
        ctx: &mut SequenceContext<'_>,
    ) {
        for &target in targets {
            let Some(combatant) = ctx.roster.get_mut(target) else {
                continue;
            };
            combatant.add_status(Arc::clone(status));
            self.report.applied.push(AppliedEffect::Status {
                target,
                status: status.id.clone(),
            });
        }
    }

    fn reject(&mut self, kind: &'static str, rejection: Rejection) -> Step<ActionOutcome> {
        tracing::debug!(
            actor = %self.actor,
            kind,
            code = rejection.error_code(),
            class = rejection.class().as_str(),
            "action rejected"
        );
        self.stage = Stage::Done;
        Step::Complete(ActionOutcome::Rejected(rejection))
    }

    fn complete(&mut self) -> Step<ActionOutcome> {
        self.stage = Stage::Done;
        Step::Complete(ActionOutcome::Completed(mem::take(&mut self.report)))
    }
}

impl<'a> Task<SequenceContext<'a>> for ActionSequence {
    type Output = ActionOutcome;

    fn poll(&mut self, ctx: &mut SequenceContext<'a>) -> Step<ActionOutcome> {
        match mem::replace(&mut self.stage, Stage::Done) {
            Stage::Start(request) => self.start(request, ctx),
            Stage::AttackImpact { target, recover } => self.attack_impact(target, recover, ctx),
            Stage::AttackFinish => self.attack_finish(ctx),
            Stage::SkillImpact {
                skill,
                targets,
                recover,
            } => self.skill_impact(skill, targets, recover, ctx),
            Stage::Finish => self.complete(),
            Stage::Done => {
                tracing::warn!(actor = %self.actor, "polled a finished action sequence");
                self.complete()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::hooks::NoPresentation;
    use crate::config::ActionTiming;
    use crate::state::{CombatStats, Combatant, Side};
    use crate::task::Suspend;

    #[test]
    fn guard_completes_on_first_poll() {
        let mut roster = Roster::new();
        let hero = roster.insert(Combatant::new("hero", Side::Party, 10, 3));
        let config = BattleConfig::default();
        let mut presentation = NoPresentation;
        let mut ctx = SequenceContext::new(&mut roster, &config, &mut presentation);

        let mut sequence = ActionSequence::new(hero, ActionRequest::guard());
        let step = sequence.poll(&mut ctx);

        assert_eq!(
            step,
            Step::Complete(ActionOutcome::Completed(ActionReport::default()))
        );
    }

    #[test]
    fn basic_attack_waits_windup_then_recover() {
        let mut roster = Roster::new();
        let hero = roster.insert(
            Combatant::new("hero", Side::Party, 10, 3)
                .with_stats(CombatStats::new(5, 0))
                .with_timing(ActionTiming::new(100, 40)),
        );
        let slime = roster.insert(Combatant::new("slime", Side::Enemy, 20, 0));
        let config = BattleConfig::default();
        let mut presentation = NoPresentation;
        let mut ctx = SequenceContext::new(&mut roster, &config, &mut presentation);

        let mut sequence = ActionSequence::new(hero, ActionRequest::basic_attack(vec![slime]));

        assert_eq!(
            sequence.poll(&mut ctx).suspension(),
            Some(Suspend::For(Duration::from_millis(100)))
        );
        assert_eq!(ctx.roster.get(slime).map(|c| c.current_hp()), Some(20));

        assert_eq!(
            sequence.poll(&mut ctx).suspension(),
            Some(Suspend::For(Duration::from_millis(40)))
        );
        assert_eq!(ctx.roster.get(slime).map(|c| c.current_hp()), Some(15));
        assert_eq!(ctx.roster.get(hero).map(|c| c.current_sp()), Some(0));

        assert!(sequence.poll(&mut ctx).is_complete());
        assert_eq!(ctx.roster.get(hero).map(|c| c.current_sp()), Some(1));
    }
}
