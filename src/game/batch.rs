//! Batch simulation
//!
//! Runs many independent fights between two character types in parallel.
//! Fight `i` always uses dice seeded with `seed + i`, so a report depends
//! only on the config, never on thread scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::character::{CharacterType, PresetRegistry};
use crate::core::config::DuelConfig;
use crate::core::dice::RngDice;
use crate::core::error::Result;
use crate::game::fight::FightStats;
use crate::game::Game;

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub player: CharacterType,
    pub enemy: CharacterType,
    pub fights: u32,
    pub seed: u64,
    pub duel: DuelConfig,
    pub registry: PresetRegistry,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            player: CharacterType::Fighter,
            enemy: CharacterType::Archer,
            fights: 1000,
            seed: 12345,
            duel: DuelConfig::default(),
            registry: PresetRegistry::default(),
        }
    }
}

/// Aggregate results of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub player: CharacterType,
    pub enemy: CharacterType,
    pub seed: u64,
    pub fights: u32,
    pub player_wins: u32,
    pub enemy_wins: u32,
    pub win_rate: f64,
    pub average_rounds: f64,
    pub longest_fight: u32,
    pub average_damage_dealt: f64,
    pub average_damage_received: f64,
    pub average_exhausted_turns: f64,
}

impl BatchReport {
    fn from_results(config: &BatchConfig, results: &[(bool, FightStats)]) -> Self {
        let fights = results.len() as u32;
        let player_wins = results.iter().filter(|(won, _)| *won).count() as u32;
        let average = |field: fn(&FightStats) -> u32| {
            if results.is_empty() {
                0.0
            } else {
                results.iter().map(|(_, s)| f64::from(field(s))).sum::<f64>() / f64::from(fights)
            }
        };

        Self {
            player: config.player,
            enemy: config.enemy,
            seed: config.seed,
            fights,
            player_wins,
            enemy_wins: fights - player_wins,
            win_rate: if fights == 0 {
                0.0
            } else {
                f64::from(player_wins) / f64::from(fights)
            },
            average_rounds: average(|s| s.rounds),
            longest_fight: results.iter().map(|(_, s)| s.rounds).max().unwrap_or(0),
            average_damage_dealt: average(|s| s.damage_dealt),
            average_damage_received: average(|s| s.damage_received),
            average_exhausted_turns: average(|s| s.exhausted_turns),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} vs {} over {} fights (seed {}): {} wins, {} losses ({:.1}% win rate), \
             {:.1} rounds on average, longest {}",
            self.player.name(),
            self.enemy.name(),
            self.fights,
            self.seed,
            self.player_wins,
            self.enemy_wins,
            self.win_rate * 100.0,
            self.average_rounds,
            self.longest_fight,
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run every fight in the batch; the first failing fight fails the batch
pub fn simulate_batch(config: &BatchConfig) -> Result<BatchReport> {
    config.duel.validate()?;

    let results = (0..config.fights)
        .into_par_iter()
        .map(|index| run_fight(config, index))
        .collect::<Result<Vec<_>>>()?;

    let report = BatchReport::from_results(config, &results);
    tracing::info!("{}", report.summary());
    Ok(report)
}

fn run_fight(config: &BatchConfig, index: u32) -> Result<(bool, FightStats)> {
    let dice = RngDice::seeded(config.seed.wrapping_add(u64::from(index)));
    let mut game = Game::new(config.duel.clone(), config.registry.clone(), Box::new(dice));

    let mut player = game.create_character(config.player)?;
    let mut enemy = game.create_character(config.enemy)?;
    let fight = game.play(&mut player, &mut enemy)?;

    Ok((fight.player_won(), *fight.stats()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_counts_add_up() {
        let config = BatchConfig {
            fights: 200,
            ..BatchConfig::default()
        };
        let report = simulate_batch(&config).unwrap();
        assert_eq!(report.fights, 200);
        assert_eq!(report.player_wins + report.enemy_wins, 200);
        assert!(report.average_rounds >= 1.0);
        assert!(report.longest_fight as f64 >= report.average_rounds);
        assert!((0.0..=1.0).contains(&report.win_rate));
    }

    #[test]
    fn test_batch_is_reproducible() {
        let config = BatchConfig {
            player: CharacterType::Mage,
            enemy: CharacterType::MageArcher,
            fights: 100,
            seed: 77,
            ..BatchConfig::default()
        };
        assert_eq!(simulate_batch(&config).unwrap(), simulate_batch(&config).unwrap());
    }

    #[test]
    fn test_empty_batch() {
        let config = BatchConfig {
            fights: 0,
            ..BatchConfig::default()
        };
        let report = simulate_batch(&config).unwrap();
        assert_eq!(report.fights, 0);
        assert_eq!(report.win_rate, 0.0);
        assert_eq!(report.longest_fight, 0);
    }

    #[test]
    fn test_report_json_has_fields() {
        let config = BatchConfig {
            fights: 10,
            ..BatchConfig::default()
        };
        let json = simulate_batch(&config).unwrap().to_json().unwrap();
        assert!(json.contains("\"player_wins\""));
        assert!(json.contains("\"fighter\""));
    }
}
