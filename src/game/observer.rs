//! Fight observers
//!
//! Observers are told when a fight starts and when it has a winner. They
//! may change the characters (experience, bookkeeping) but never the
//! result of the fight itself.

use crate::character::Character;
use crate::core::error::ObserverError;
use crate::game::fight::Fight;

/// Everything an observer gets once a fight is decided
pub struct FinishedFight<'a> {
    pub fight: &'a Fight,
    pub winner: &'a mut Character,
    pub loser: &'a mut Character,
}

pub trait FightObserver: Send + Sync {
    fn name(&self) -> &str;

    /// Fire-and-forget notice before the first round
    fn on_fight_starting(&self, _player: &Character, _enemy: &Character) {}

    fn on_fight_finished(&self, outcome: &mut FinishedFight<'_>) -> Result<(), ObserverError>;
}

/// Decides how much experience a win is worth
pub trait XpCalculator: Send + Sync {
    fn add_xp(&self, winner: &mut Character, enemy_level: u32);
}

/// A win is worth the defeated enemy's level in XP
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelXpCalculator;

impl XpCalculator for LevelXpCalculator {
    fn add_xp(&self, winner: &mut Character, enemy_level: u32) {
        winner.add_xp(enemy_level);
    }
}

/// Awards experience to the winner. Does not level anyone up.
pub struct XpEarnedObserver {
    calculator: Box<dyn XpCalculator>,
}

impl XpEarnedObserver {
    pub fn new(calculator: Box<dyn XpCalculator>) -> Self {
        Self { calculator }
    }
}

impl Default for XpEarnedObserver {
    fn default() -> Self {
        Self::new(Box::new(LevelXpCalculator))
    }
}

impl FightObserver for XpEarnedObserver {
    fn name(&self) -> &str {
        "xp-earned"
    }

    fn on_fight_finished(&self, outcome: &mut FinishedFight<'_>) -> Result<(), ObserverError> {
        let enemy_level = outcome.loser.level();
        self.calculator.add_xp(outcome.winner, enemy_level);
        tracing::debug!(
            winner = outcome.winner.nickname(),
            xp = outcome.winner.xp(),
            "Experience awarded"
        );
        Ok(())
    }
}

/// Writes fight starts and results to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct FightLogObserver;

impl FightObserver for FightLogObserver {
    fn name(&self) -> &str {
        "fight-log"
    }

    fn on_fight_starting(&self, player: &Character, enemy: &Character) {
        tracing::info!(
            player = player.nickname(),
            enemy = enemy.nickname(),
            "Fight starting"
        );
    }

    fn on_fight_finished(&self, outcome: &mut FinishedFight<'_>) -> Result<(), ObserverError> {
        let fight = outcome.fight;
        tracing::info!(
            winner = %fight.winner().nickname,
            loser = %fight.loser().nickname,
            rounds = fight.rounds(),
            damage_dealt = fight.damage_dealt(),
            damage_received = fight.damage_received(),
            exhausted_turns = fight.exhausted_turns(),
            "Fight finished"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{Bow, Leather};
    use crate::core::types::Side;
    use crate::game::fight::{FightStats, FighterRef};
    use std::sync::Arc;

    fn pair() -> (Character, Character) {
        let winner = Character::new(10, 1, Arc::new(Bow), Arc::new(Leather));
        let mut loser = Character::new(10, 1, Arc::new(Bow), Arc::new(Leather));
        loser.level_up();
        loser.level_up();
        (winner, loser)
    }

    #[test]
    fn test_xp_observer_awards_loser_level() {
        let (mut winner, mut loser) = pair();
        let fight = Fight::new(
            FightStats::default(),
            FighterRef::of(&winner, Side::Player),
            FighterRef::of(&loser, Side::Enemy),
        );

        let observer = XpEarnedObserver::default();
        let mut outcome = FinishedFight {
            fight: &fight,
            winner: &mut winner,
            loser: &mut loser,
        };
        observer.on_fight_finished(&mut outcome).unwrap();

        assert_eq!(winner.xp(), 3);
        assert_eq!(winner.level(), 1);
        assert_eq!(loser.xp(), 0);
    }

    #[test]
    fn test_custom_xp_calculator() {
        struct Double;
        impl XpCalculator for Double {
            fn add_xp(&self, winner: &mut Character, enemy_level: u32) {
                winner.add_xp(enemy_level * 2);
            }
        }

        let (mut winner, mut loser) = pair();
        let fight = Fight::new(
            FightStats::default(),
            FighterRef::of(&winner, Side::Enemy),
            FighterRef::of(&loser, Side::Player),
        );
        let observer = XpEarnedObserver::new(Box::new(Double));
        observer
            .on_fight_finished(&mut FinishedFight {
                fight: &fight,
                winner: &mut winner,
                loser: &mut loser,
            })
            .unwrap();
        assert_eq!(winner.xp(), 6);
    }
}
