use std::path::PathBuf;

use battle_content::ContentFactory;
use battle_core::{
    ActionOutcome, BattleConfig, CombatStats, Combatant, CombatantId, Command, InputEvents,
    Intent, NoPresentation, Roster, ScriptedInput, Side,
};
use battle_runtime::{
    Battle, Controller, Decision, GuardController, RealtimeScheduler, RuntimeConfig, RuntimeError,
    TurnContext, VirtualScheduler,
};

/// Attacks the first live member of the other side.
fn brawler() -> Box<dyn Controller> {
    Box::new(|actor: CombatantId, roster: &Roster| {
        let side = roster.get(actor).map(|c| c.side).unwrap_or(Side::Party);
        let foes = roster.live(&roster.side(side.opponent()));
        match foes.first() {
            Some(&target) => Decision::Intent(Intent::basic_attack(target)),
            None => Decision::Intent(Intent::default()),
        }
    })
}

fn skirmish() -> Roster {
    let mut roster = Roster::new();
    roster.insert(Combatant::new("knight", Side::Party, 30, 3).with_stats(CombatStats::new(6, 2)));
    roster.insert(Combatant::new("rat", Side::Enemy, 8, 0).with_stats(CombatStats::new(2, 0)));
    roster.insert(Combatant::new("bat", Side::Enemy, 6, 0).with_stats(CombatStats::new(2, 0)));
    roster
}

fn fight(roster: &mut Roster, battle: &mut Battle) -> battle_runtime::BattleOutcome {
    let config = BattleConfig::default();
    let mut presentation = NoPresentation;
    let mut input = ScriptedInput::default();
    let mut ctx = TurnContext::new(roster, &config, &mut presentation, &mut input);
    VirtualScheduler::new(RuntimeConfig::instant())
        .run(battle, &mut ctx)
        .expect("battle finishes")
}

#[test]
fn party_wins_a_one_sided_fight() {
    let mut roster = skirmish();
    let mut battle = Battle::new(&roster, brawler(), Box::new(GuardController), 10).expect("valid");

    let outcome = fight(&mut roster, &mut battle);

    assert_eq!(outcome.winner, Some(Side::Party));
    // 6 attack vs 0 defense: two hits for the rat, one for the bat
    assert_eq!(outcome.rounds, 3);
    assert!(!roster.side_alive(Side::Enemy));
}

#[test]
fn round_limit_ends_without_a_winner() {
    let mut roster = skirmish();
    let mut battle = Battle::new(
        &roster,
        Box::new(GuardController),
        Box::new(GuardController),
        4,
    )
    .expect("valid");

    let outcome = fight(&mut roster, &mut battle);

    assert_eq!(outcome.winner, None);
    assert_eq!(outcome.rounds, 4);
    assert_eq!(outcome.turns.len(), 12);
}

#[test]
fn dead_combatants_never_act() {
    let mut roster = skirmish();
    let bat = roster.side(Side::Enemy)[1];
    roster.get_mut(bat).expect("bat").set_hp(0);
    let mut battle = Battle::new(
        &roster,
        Box::new(GuardController),
        Box::new(GuardController),
        2,
    )
    .expect("valid");

    let outcome = fight(&mut roster, &mut battle);

    assert!(outcome.turns.iter().all(|turn| turn.actor != bat));
    assert_eq!(outcome.turns.len(), 4);
}

#[test]
fn repeated_cancellation_falls_back_to_guard() {
    let mut roster = skirmish();
    let knight = roster.side(Side::Party)[0];
    let mut battle = Battle::new(
        &roster,
        Box::new(|_: CombatantId, _: &Roster| Decision::Command(Command::attack())),
        Box::new(GuardController),
        1,
    )
    .expect("valid");

    let config = BattleConfig::default();
    let mut presentation = NoPresentation;
    let mut input = || InputEvents::CANCEL;
    let mut ctx = TurnContext::new(&mut roster, &config, &mut presentation, &mut input);
    let outcome = VirtualScheduler::new(RuntimeConfig::instant())
        .run(&mut battle, &mut ctx)
        .expect("battle finishes");

    let first = &outcome.turns[0];
    assert_eq!(first.actor, knight);
    assert_eq!(first.outcome.report().map(|r| r.applied.len()), Some(0));
    assert!(!matches!(first.outcome, ActionOutcome::Rejected(_)));
}

#[test]
fn one_sided_rosters_are_refused() {
    let mut roster = Roster::new();
    roster.insert(Combatant::new("knight", Side::Party, 30, 3));

    let result = Battle::new(
        &roster,
        Box::new(GuardController),
        Box::new(GuardController),
        5,
    );

    assert!(matches!(
        result,
        Err(RuntimeError::NoLiveCombatants { side: Side::Enemy })
    ));
}

#[test]
fn bundled_training_encounter_resolves() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../content");
    let factory = ContentFactory::new(dir);
    let config = factory.load_config().expect("battle.toml");
    let catalog = factory.load_catalog().expect("catalog");
    let mut encounter = factory
        .load_encounter("training", &catalog, &config)
        .expect("training encounter");

    let mut battle = Battle::new(&encounter.roster, brawler(), brawler(), 50).expect("valid");
    let mut presentation = NoPresentation;
    let mut input = ScriptedInput::default();
    let mut ctx = TurnContext::new(&mut encounter.roster, &config, &mut presentation, &mut input);
    let outcome = VirtualScheduler::new(RuntimeConfig::instant())
        .run(&mut battle, &mut ctx)
        .expect("battle finishes");

    assert!(outcome.winner.is_some());
}

#[tokio::test(start_paused = true)]
async fn realtime_battle_spends_scheduled_time() {
    let mut roster = Roster::new();
    roster.insert(Combatant::new("knight", Side::Party, 30, 3).with_stats(CombatStats::new(9, 0)));
    roster.insert(Combatant::new("rat", Side::Enemy, 5, 0));
    let mut battle =
        Battle::new(&roster, brawler(), Box::new(GuardController), 5).expect("valid");

    let config = BattleConfig::default();
    let mut presentation = NoPresentation;
    let mut input = ScriptedInput::default();
    let mut ctx = TurnContext::new(&mut roster, &config, &mut presentation, &mut input);
    let mut scheduler = RealtimeScheduler::new(RuntimeConfig::default());
    let start = tokio::time::Instant::now();

    let outcome = scheduler.run(&mut battle, &mut ctx).await.expect("finishes");

    assert_eq!(outcome.winner, Some(Side::Party));
    // one basic attack: default 350 ms windup + 250 ms recover
    assert!(start.elapsed() >= std::time::Duration::from_millis(600));
}
