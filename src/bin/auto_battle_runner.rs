//! Headless Auto-Battle Runner
//!
//! Plays a generated encounter with the player under automation and prints
//! the outcome. Useful for comparing profiles across seeds.

use std::path::PathBuf;

use auto_battle::automation::{
    AutoBattleController, EnglishLogStrings, LogStrings, ProfileId, StateCommand,
};
use auto_battle::combat::{
    Combatant, CoverLevel, Enemy, MapArea, SeededCombatResolver, StandardRules, Weapon,
};
use auto_battle::encounter::{run_enemy_phase, Encounter, EncounterOutcome};
use auto_battle::{AutoBattleSettings, GridPosition};
use clap::Parser;
use serde::Serialize;

/// Headless Auto-Battle Runner - automated player vs scripted enemies
#[derive(Parser, Debug)]
#[command(name = "auto_battle_runner")]
#[command(about = "Play an encounter under auto-battle and report the outcome")]
struct Args {
    /// Behaviour profile (balanced, aggressive, defensive); overrides settings
    #[arg(long)]
    profile: Option<String>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum player turns before calling it a draw
    #[arg(long, default_value_t = 30)]
    max_turns: u32,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Settings TOML (enabled flag is ignored, profile_dir is honoured)
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Serialize)]
struct RunResult {
    outcome: EncounterOutcome,
    turns: u32,
    player_health: i32,
    enemies_remaining: usize,
    decisions: usize,
    profile: ProfileId,
    seed: u64,
}

fn main() -> auto_battle::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("auto_battle=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let settings = match &args.settings {
        Some(path) => AutoBattleSettings::load(path)?,
        None => AutoBattleSettings::default(),
    };
    let profile_id = match &args.profile {
        Some(name) => name.parse::<ProfileId>().unwrap_or_else(|e| {
            tracing::warn!("{}; using {}", e, ProfileId::default());
            ProfileId::default()
        }),
        None => settings.profile_id(),
    };

    let registry = settings.build_registry()?;
    let mut controller = AutoBattleController::with_rules(registry, StandardRules);
    let mut resolver = SeededCombatResolver::new(seed);
    let mut enemy_resolver = SeededCombatResolver::new(seed.wrapping_add(1));

    let mut encounter = create_encounter();
    let mut decisions = 0;

    while !encounter.is_finished() && encounter.turn_count <= args.max_turns {
        let commands = controller.update(&encounter.update_context(true, profile_id), &mut resolver);
        decisions += commands
            .iter()
            .filter(|c| matches!(c, StateCommand::RecordDecision(_)))
            .count();
        let acted = commands.iter().any(StateCommand::mutates_encounter);
        encounter.apply_all(commands);

        if encounter.is_finished() {
            break;
        }
        if encounter.is_player_turn && !acted {
            tracing::warn!("Controller made no progress on turn {}; ending turn", encounter.turn_count);
            encounter.switch_turn();
        }
        if !encounter.is_player_turn {
            run_enemy_phase(&mut encounter, &mut enemy_resolver);
        }
    }

    let result = RunResult {
        outcome: encounter.outcome,
        turns: encounter.turn_count,
        player_health: encounter.player.health,
        enemies_remaining: encounter.living_enemies().count(),
        decisions,
        profile: profile_id,
        seed,
    };

    match args.format.as_str() {
        "text" => {
            let strings = EnglishLogStrings;
            for entry in &encounter.log {
                println!("{}", strings.render(entry));
            }
            println!();
            println!("Auto-Battle Result");
            println!("==================");
            println!("Outcome: {:?}", result.outcome);
            println!("Turns: {}", result.turns);
            println!("Player health: {}/{}", result.player_health, encounter.player.max_health);
            println!("Enemies remaining: {}", result.enemies_remaining);
            println!("Decisions: {}", result.decisions);
            println!("Profile: {}", result.profile);
            println!("Seed: {}", result.seed);
        }
        other => {
            if other != "json" {
                tracing::warn!("Unknown format '{}', defaulting to json", other);
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}

/// A walled courtyard with a few crates and three guards
fn create_encounter() -> Encounter {
    let mut map = MapArea::walled("courtyard", 12, 10);
    map.set_cover(GridPosition::new(4, 3), CoverLevel::Half);
    map.set_cover(GridPosition::new(4, 6), CoverLevel::Full);
    map.set_cover(GridPosition::new(7, 4), CoverLevel::Half);
    map.set_wall(GridPosition::new(6, 7));

    let player = Combatant::new("Runner", GridPosition::new(2, 5), 100, 6).with_weapon(Weapon::pistol());
    let enemies = vec![
        Enemy::new("Guard", GridPosition::new(9, 2)),
        Enemy::new("Enforcer", GridPosition::new(9, 5)).with_health(55, 55),
        Enemy::new("Lookout", GridPosition::new(8, 8)).with_damage(4),
    ];
    Encounter::new(player, enemies, map)
}
