//! Fight records
//!
//! Stats are accumulated round by round while a fight runs; a [`Fight`] is
//! only created once a winner is known.

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::core::types::{CharacterId, Side};

/// Running totals for one fight, always from the player's point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightStats {
    pub rounds: u32,
    /// Damage the player landed on the enemy
    pub damage_dealt: u32,
    /// Damage the player took from the enemy
    pub damage_received: u32,
    /// Player attacks that dealt nothing
    pub exhausted_turns: u32,
}

impl FightStats {
    pub fn add_round(&mut self) {
        self.rounds += 1;
    }

    pub fn add_damage_dealt(&mut self, damage: i32) {
        self.damage_dealt = self.damage_dealt.saturating_add(non_negative(damage));
    }

    pub fn add_damage_received(&mut self, damage: i32) {
        self.damage_received = self.damage_received.saturating_add(non_negative(damage));
    }

    pub fn add_exhausted_turn(&mut self) {
        self.exhausted_turns += 1;
    }
}

fn non_negative(damage: i32) -> u32 {
    u32::try_from(damage).unwrap_or(0)
}

/// Who fought, by identity. The fight never owns the characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterRef {
    pub id: CharacterId,
    pub nickname: String,
    pub side: Side,
}

impl FighterRef {
    pub fn of(character: &Character, side: Side) -> Self {
        Self {
            id: character.id(),
            nickname: character.nickname().to_string(),
            side,
        }
    }
}

/// An observer that failed while being told about a finished fight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverFailure {
    pub observer: String,
    pub message: String,
}

/// A finished fight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fight {
    stats: FightStats,
    winner: FighterRef,
    loser: FighterRef,
    observer_failures: Vec<ObserverFailure>,
}

impl Fight {
    pub fn new(stats: FightStats, winner: FighterRef, loser: FighterRef) -> Self {
        Self {
            stats,
            winner,
            loser,
            observer_failures: Vec::new(),
        }
    }

    pub fn stats(&self) -> &FightStats {
        &self.stats
    }

    pub fn rounds(&self) -> u32 {
        self.stats.rounds
    }

    pub fn damage_dealt(&self) -> u32 {
        self.stats.damage_dealt
    }

    pub fn damage_received(&self) -> u32 {
        self.stats.damage_received
    }

    pub fn exhausted_turns(&self) -> u32 {
        self.stats.exhausted_turns
    }

    pub fn winner(&self) -> &FighterRef {
        &self.winner
    }

    pub fn loser(&self) -> &FighterRef {
        &self.loser
    }

    pub fn winner_side(&self) -> Side {
        self.winner.side
    }

    pub fn player_won(&self) -> bool {
        self.winner.side == Side::Player
    }

    pub fn is_winner(&self, character: &Character) -> bool {
        self.winner.id == character.id()
    }

    pub fn is_loser(&self, character: &Character) -> bool {
        self.loser.id == character.id()
    }

    pub fn observer_failures(&self) -> &[ObserverFailure] {
        &self.observer_failures
    }

    pub(crate) fn record_observer_failures(&mut self, failures: Vec<ObserverFailure>) {
        self.observer_failures = failures;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{Bow, Leather};
    use std::sync::Arc;

    #[test]
    fn test_stats_accumulate() {
        let mut stats = FightStats::default();
        stats.add_round();
        stats.add_round();
        stats.add_damage_dealt(27);
        stats.add_damage_dealt(0);
        stats.add_damage_received(5);
        stats.add_exhausted_turn();
        assert_eq!(stats.rounds, 2);
        assert_eq!(stats.damage_dealt, 27);
        assert_eq!(stats.damage_received, 5);
        assert_eq!(stats.exhausted_turns, 1);
    }

    #[test]
    fn test_negative_damage_is_ignored() {
        let mut stats = FightStats::default();
        stats.add_damage_dealt(-4);
        assert_eq!(stats.damage_dealt, 0);
    }

    #[test]
    fn test_fight_identity_checks() {
        let mut a = Character::new(10, 1, Arc::new(Bow), Arc::new(Leather));
        a.set_nickname("A");
        let b = Character::new(10, 1, Arc::new(Bow), Arc::new(Leather));

        let fight = Fight::new(
            FightStats::default(),
            FighterRef::of(&b, Side::Enemy),
            FighterRef::of(&a, Side::Player),
        );
        assert!(fight.is_winner(&b));
        assert!(fight.is_loser(&a));
        assert!(!fight.player_won());
        assert_eq!(fight.loser().nickname, "A");
        assert!(fight.observer_failures().is_empty());
    }
}
