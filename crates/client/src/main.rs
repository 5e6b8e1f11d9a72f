//! `battle` - runs an authored encounter with AI surrogates on both sides.
mod ai;
mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_content::ContentFactory;
use battle_core::{ActionOutcome, BattleConfig, Roster, ScriptedInput};
use battle_runtime::{
    Battle, BattleOutcome, RealtimeScheduler, RuntimeConfig, TracingPresentation, TurnContext,
    VirtualScheduler, attach_resource_logging,
};
use clap::Parser;

use crate::ai::SurrogateAi;

#[derive(Parser, Debug)]
#[command(name = "battle", about = "Turn-based battle simulator", version)]
struct Cli {
    /// Directory holding battle.toml, the catalogs and encounters/
    #[arg(long, default_value = "content")]
    content: PathBuf,

    /// Encounter name under encounters/, or a path to a .ron file
    #[arg(short, long, default_value = "training")]
    encounter: String,

    /// Round limit (overrides BATTLE_MAX_ROUNDS)
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Resolve waits on a virtual clock instead of sleeping
    #[arg(long)]
    instant: bool,

    /// HP percentage at or below which the AI heals an ally
    #[arg(long, default_value_t = SurrogateAi::DEFAULT_HEAL_THRESHOLD)]
    heal_threshold: u32,

    /// Only log to the file, not to stdout
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::setup_logging(!cli.quiet)?;

    let mut runtime = RuntimeConfig::from_env();
    if let Some(rounds) = cli.rounds {
        runtime = runtime.with_max_rounds(rounds);
    }

    let factory = ContentFactory::new(&cli.content);
    let config = factory.load_config()?;
    let catalog = factory.load_catalog()?;
    let mut encounter = factory
        .load_encounter(&cli.encounter, &catalog, &config)
        .with_context(|| format!("Failed to load encounter '{}'", cli.encounter))?;

    tracing::info!(
        encounter = %encounter.name,
        combatants = encounter.roster.len(),
        skills = catalog.skill_count(),
        items = catalog.item_count(),
        "encounter loaded"
    );

    attach_resource_logging(&mut encounter.roster);
    let ai = SurrogateAi::new(cli.heal_threshold);
    let outcome = run(&mut encounter.roster, &config, runtime, ai, cli.instant).await?;
    report(&encounter.roster, &outcome);
    Ok(())
}

async fn run(
    roster: &mut Roster,
    config: &BattleConfig,
    runtime: RuntimeConfig,
    ai: SurrogateAi,
    instant: bool,
) -> Result<BattleOutcome> {
    let mut battle = Battle::new(
        roster,
        Box::new(ai),
        Box::new(ai),
        runtime.max_rounds,
    )?;

    let mut presentation = TracingPresentation;
    let mut popups = TracingPresentation;
    // Both sides are AI-driven, so selection input is never read.
    let mut input = ScriptedInput::default();
    let mut ctx = TurnContext::new(roster, config, &mut presentation, &mut input)
        .with_popups(&mut popups);

    let outcome = if instant {
        let mut scheduler = VirtualScheduler::new(runtime);
        let outcome = scheduler.run(&mut battle, &mut ctx)?;
        tracing::info!(ticks = scheduler.stats().ticks, elapsed = ?scheduler.now(), "virtual run finished");
        outcome
    } else {
        let mut scheduler = RealtimeScheduler::new(runtime);
        let outcome = scheduler.run(&mut battle, &mut ctx).await?;
        tracing::info!(ticks = scheduler.stats().ticks, "realtime run finished");
        outcome
    };
    Ok(outcome)
}

fn report(roster: &Roster, outcome: &BattleOutcome) {
    match outcome.winner {
        Some(side) => println!("{side} wins after {} rounds", outcome.rounds),
        None => println!("No winner after {} rounds", outcome.rounds),
    }

    let rejected = outcome
        .turns
        .iter()
        .filter(|t| matches!(t.outcome, ActionOutcome::Rejected(_)))
        .count();
    println!("{} turns, {} rejected", outcome.turns.len(), rejected);

    for combatant in roster.iter() {
        println!(
            "  {:<10} {:<6} HP {:>3}/{:<3} SP {}/{}",
            combatant.name,
            combatant.side,
            combatant.current_hp(),
            combatant.max_hp(),
            combatant.current_sp(),
            combatant.max_sp()
        );
    }
}
