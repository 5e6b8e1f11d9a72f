use std::sync::Arc;

use battle_core::{
    ActionOutcome, BattleConfig, CombatStats, Combatant, CombatantId, Command, CommandKind,
    EffectType, InputEvents, ItemDefinition, NoPresentation, Roster, ScriptedInput, Side,
    SkillDefinition, TargetMode,
};
use battle_runtime::{
    PlayerTurn, RuntimeConfig, RuntimeError, TurnContext, TurnOutcome, VirtualScheduler,
};

struct Party {
    roster: Roster,
    hero: CombatantId,
    ally: CombatantId,
    imp: CombatantId,
    ogre: CombatantId,
}

fn party() -> Party {
    let cleave = Arc::new(SkillDefinition::new("cleave", EffectType::Damage, 3).with_cost(1));
    let mend = Arc::new(
        SkillDefinition::new("mend", EffectType::Heal, 6)
            .with_cost(1)
            .self_only(),
    );

    let mut roster = Roster::new();
    let hero = roster.insert(
        Combatant::new("hero", Side::Party, 30, 5)
            .with_hp(20)
            .with_sp(2)
            .with_stats(CombatStats::new(5, 0))
            .with_skills(vec![cleave, mend]),
    );
    let ally = roster.insert(Combatant::new("ally", Side::Party, 30, 0).with_hp(10));
    let imp = roster.insert(Combatant::new("imp", Side::Enemy, 12, 0));
    let ogre = roster.insert(Combatant::new("ogre", Side::Enemy, 40, 0));
    Party {
        roster,
        hero,
        ally,
        imp,
        ogre,
    }
}

fn play(
    roster: &mut Roster,
    turn: &mut PlayerTurn,
    frames: impl IntoIterator<Item = InputEvents>,
) -> TurnOutcome {
    let config = BattleConfig::default();
    let mut presentation = NoPresentation;
    let mut input = ScriptedInput::new(frames);
    let mut ctx = TurnContext::new(roster, &config, &mut presentation, &mut input);
    let config = RuntimeConfig {
        max_ticks: 64,
        ..RuntimeConfig::instant()
    };
    VirtualScheduler::new(config)
        .run(turn, &mut ctx)
        .expect("turn finishes")
}

#[test]
fn attack_targets_the_opposing_side() {
    let Party {
        mut roster,
        hero,
        imp,
        ogre,
        ..
    } = party();
    let mut turn = PlayerTurn::new(hero, Command::attack(), &roster).expect("hero exists");

    let outcome = play(&mut roster, &mut turn, [InputEvents::NEXT, InputEvents::CONFIRM]);

    assert!(matches!(outcome, TurnOutcome::Acted(ActionOutcome::Completed(_))));
    assert_eq!(roster.get(imp).map(Combatant::current_hp), Some(12));
    assert_eq!(roster.get(ogre).map(Combatant::current_hp), Some(35));
    assert_eq!(roster.get(hero).map(Combatant::current_sp), Some(3));
}

#[test]
fn skill_menu_then_self_only_skill_skips_targeting() {
    let Party {
        mut roster, hero, ..
    } = party();
    let mut turn = PlayerTurn::new(hero, Command::new(CommandKind::Skill), &roster).expect("hero");

    // menu reset tick, move to "mend", confirm
    let outcome = play(&mut roster, &mut turn, [InputEvents::NEXT, InputEvents::CONFIRM]);

    assert!(matches!(outcome, TurnOutcome::Acted(ActionOutcome::Completed(_))));
    let hero = roster.get(hero).expect("hero");
    assert_eq!(hero.current_hp(), 26);
    assert_eq!(hero.current_sp(), 1);
}

#[test]
fn cancelling_target_selection_mutates_nothing() {
    let Party {
        mut roster,
        hero,
        imp,
        ..
    } = party();
    let cleave = roster.get(hero).expect("hero").skills[0].clone();
    let mut turn = PlayerTurn::new(hero, Command::skill(cleave), &roster).expect("hero");

    let outcome = play(&mut roster, &mut turn, [InputEvents::CANCEL]);

    assert_eq!(outcome, TurnOutcome::Cancelled);
    assert_eq!(roster.get(hero).map(Combatant::current_sp), Some(2));
    assert_eq!(roster.get(imp).map(Combatant::current_hp), Some(12));
}

#[test]
fn cancelling_the_menu_ends_the_turn() {
    let Party {
        mut roster, hero, ..
    } = party();
    let mut turn = PlayerTurn::new(hero, Command::new(CommandKind::Item), &roster).expect("hero");

    let outcome = play(&mut roster, &mut turn, [InputEvents::CANCEL]);

    assert_eq!(outcome, TurnOutcome::Cancelled);
}

#[test]
fn heal_items_target_the_actor_side() {
    let Party {
        mut roster,
        hero,
        ally,
        ..
    } = party();
    let tonic = Arc::new(ItemDefinition::new("tonic", EffectType::Heal, 5));
    let mut turn = PlayerTurn::new(hero, Command::item(tonic), &roster).expect("hero");

    play(&mut roster, &mut turn, [InputEvents::NEXT, InputEvents::CONFIRM]);

    assert_eq!(roster.get(ally).map(Combatant::current_hp), Some(15));
    assert_eq!(roster.get(hero).map(Combatant::current_hp), Some(20));
}

#[test]
fn all_mode_hits_every_live_enemy() {
    let Party {
        mut roster,
        hero,
        imp,
        ogre,
        ..
    } = party();
    let cleave = roster.get(hero).expect("hero").skills[0].clone();
    let mut turn = PlayerTurn::new(hero, Command::skill(cleave), &roster)
        .expect("hero")
        .with_mode(TargetMode::All);

    play(&mut roster, &mut turn, [InputEvents::CONFIRM]);

    assert_eq!(roster.get(imp).map(Combatant::current_hp), Some(4));
    assert_eq!(roster.get(ogre).map(Combatant::current_hp), Some(32));
}

#[test]
fn unknown_actor_cannot_take_a_turn() {
    let Party { roster, .. } = party();
    let result = PlayerTurn::new(CombatantId(42), Command::attack(), &roster);
    assert!(matches!(result, Err(RuntimeError::UnknownCombatant(CombatantId(42)))));
}
