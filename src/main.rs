//! Duel Arena - Entry Point
//!
//! Picks a character for the player, then fights opponents one after the
//! other. The same player carries health, XP and level across fights.
//! With `--batch` it instead runs many seeded fights and prints a JSON report.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use duel_arena::character::{Character, CharacterType, PresetRegistry};
use duel_arena::core::config::DuelConfig;
use duel_arena::core::dice::{Dice, RngDice};
use duel_arena::core::error::Result;
use duel_arena::game::{
    simulate_batch, BatchConfig, Fight, FightLogObserver, Game, XpEarnedObserver,
};

/// Duel Arena - warriors fight each other for honor and glory
#[derive(Parser, Debug)]
#[command(name = "duel-arena")]
#[command(about = "Simulate turn-based duels between preset characters")]
struct Args {
    /// Player character type (fighter, archer, mage, mage_archer)
    #[arg(long, short = 'c', default_value = "fighter")]
    character: String,

    /// Opponent type; a random type is drawn for every fight if absent
    #[arg(long, short = 'e')]
    enemy: Option<String>,

    /// Number of fights in a row for the same player
    #[arg(long, short = 'n', default_value_t = 1)]
    fights: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Engine config TOML
    #[arg(long)]
    config: Option<String>,

    /// Character preset TOML (defaults to the built-in table)
    #[arg(long)]
    presets: Option<String>,

    /// Run this many independent fights and print a JSON report
    #[arg(long)]
    batch: Option<u32>,

    /// Level the player up after every win
    #[arg(long)]
    level_up: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("duel_arena=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DuelConfig::load(path)?,
        None => DuelConfig::default(),
    };
    let registry = match &args.presets {
        Some(path) => PresetRegistry::load(path)?,
        None => PresetRegistry::default(),
    };
    let player_type: CharacterType = args.character.parse()?;
    let enemy_type: Option<CharacterType> = args
        .enemy
        .as_deref()
        .map(|s| s.parse::<CharacterType>())
        .transpose()?;

    if let Some(fights) = args.batch {
        let batch = BatchConfig {
            player: player_type,
            // Batches need a fixed pairing
            enemy: enemy_type.unwrap_or(player_type),
            fights,
            seed: args.seed.unwrap_or_else(|| rand::random()),
            duel: config,
            registry,
        };
        let report = simulate_batch(&batch)?;
        println!("{}", report.to_json()?);
        return Ok(());
    }

    let dice: Box<dyn Dice> = match args.seed {
        Some(seed) => Box::new(RngDice::seeded(seed)),
        None => Box::new(RngDice::entropy()),
    };

    let mut game = Game::new(config, registry, dice);
    game.subscribe(Arc::new(XpEarnedObserver::default()));
    game.subscribe(Arc::new(FightLogObserver));

    let mut player = game.create_character(player_type)?;
    player.set_nickname(format!("Player {}", player_type));

    println!("Welcome to the arena, where warriors fight each other for honor and glory!");
    println!("It's time for a fight!");

    for _ in 0..args.fights {
        let opponent_type = match enemy_type {
            Some(t) => t,
            None => game.random_character_type()?,
        };
        let mut enemy = game.create_character(opponent_type)?;
        enemy.set_nickname(format!("AI: {}", opponent_type.name()));

        println!("Opponent found {}", enemy.nickname());

        let fight = game.play(&mut player, &mut enemy)?;
        if args.level_up && fight.is_winner(&player) {
            player.level_up();
        }

        print_result(&fight, &player);
    }

    Ok(())
}

fn print_result(fight: &Fight, player: &Character) {
    println!("------------------------------");
    if fight.is_winner(player) {
        println!("Result: You WON!");
    } else {
        println!("Result: You lost...");
    }
    println!("Total Rounds: {}", fight.rounds());
    println!("Damage dealt: {}", fight.damage_dealt());
    println!("Damage received: {}", fight.damage_received());
    println!("XP: {}", player.xp());
    println!("Level: {}", player.level());
    println!("Exhausted Turns: {}", fight.exhausted_turns());
    for failure in fight.observer_failures() {
        println!("Warning: {} failed: {}", failure.observer, failure.message);
    }
    println!("------------------------------");
}
