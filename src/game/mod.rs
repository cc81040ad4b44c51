//! Fight orchestration
//!
//! The player always swings first. Each round is one attack from each
//! side, checked for a kill after every hit. When someone drops to zero
//! health the fight is recorded and every subscribed observer is told,
//! in subscription order.

pub mod batch;
pub mod fight;
pub mod observer;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::character::{BuilderFactory, Character, CharacterType, PresetRegistry};
use crate::core::config::DuelConfig;
use crate::core::dice::{pick_index, Dice, RngDice};
use crate::core::error::{DuelError, ObserverError, Result};
use crate::core::types::Side;

pub use batch::{simulate_batch, BatchConfig, BatchReport};
pub use fight::{Fight, FightStats, FighterRef, ObserverFailure};
pub use observer::{
    FightLogObserver, FightObserver, FinishedFight, LevelXpCalculator, XpCalculator,
    XpEarnedObserver,
};

pub struct Game {
    config: DuelConfig,
    registry: PresetRegistry,
    builder_factory: BuilderFactory,
    dice: Box<dyn Dice>,
    observers: Vec<Arc<dyn FightObserver>>,
}

impl Game {
    pub fn new(config: DuelConfig, registry: PresetRegistry, dice: Box<dyn Dice>) -> Self {
        let builder_factory = BuilderFactory::new(config.greater_health_threshold);
        Self {
            config,
            registry,
            builder_factory,
            dice,
            observers: Vec::new(),
        }
    }

    /// Default config and presets with the given dice
    pub fn with_dice(dice: impl Dice + 'static) -> Self {
        Self::new(DuelConfig::default(), PresetRegistry::default(), Box::new(dice))
    }

    /// Default config and presets with reproducible dice
    pub fn seeded(seed: u64) -> Self {
        Self::with_dice(RngDice::seeded(seed))
    }

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    pub fn registry(&self) -> &PresetRegistry {
        &self.registry
    }

    /// Build a character of the given type, letting the builder factory
    /// decide whether it gets the greater-health bonus.
    pub fn create_character(&mut self, character_type: CharacterType) -> Result<Character> {
        let preset = self
            .registry
            .get(character_type)
            .ok_or_else(|| DuelError::UnknownCharacterType(character_type.to_string()))?;

        let builder = self.builder_factory.create_builder(self.dice.as_mut())?;
        preset
            .apply(builder)
            .nickname(character_type.name())
            .build()
    }

    /// Uniform pick among the registered types, used for AI opponents
    pub fn random_character_type(&mut self) -> Result<CharacterType> {
        let types = self.registry.types();
        let index = pick_index(self.dice.as_mut(), types.len())?;
        Ok(types[index])
    }

    /// Returns false if the observer was already subscribed
    pub fn subscribe(&mut self, observer: Arc<dyn FightObserver>) -> bool {
        if self.observers.iter().any(|o| same_observer(o, &observer)) {
            return false;
        }
        self.observers.push(observer);
        true
    }

    /// Returns false if the observer was not subscribed
    pub fn unsubscribe(&mut self, observer: &Arc<dyn FightObserver>) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| !same_observer(o, observer));
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Run a fight to completion.
    ///
    /// Only the player is rested beforehand; the enemy fights in whatever
    /// state it is in. Dice failures abort the fight and are returned
    /// unchanged. A fight still undecided after `max_rounds` rounds is
    /// aborted with [`DuelError::RoundLimitExceeded`].
    pub fn play(&mut self, player: &mut Character, enemy: &mut Character) -> Result<Fight> {
        let failures: Vec<ObserverFailure> = self
            .observers
            .iter()
            .filter_map(|observer| {
                run_isolated(observer.as_ref(), || {
                    observer.on_fight_starting(&*player, &*enemy);
                    Ok(())
                })
            })
            .collect();

        player.rest();

        let max_rounds = self.config.max_rounds;
        let dice = self.dice.as_mut();
        let mut stats = FightStats::default();

        let winner_side = loop {
            if stats.rounds >= max_rounds {
                tracing::warn!(
                    player = player.nickname(),
                    enemy = enemy.nickname(),
                    rounds = stats.rounds,
                    "Fight hit the round limit without a winner"
                );
                return Err(DuelError::RoundLimitExceeded {
                    rounds: stats.rounds,
                });
            }

            stats.add_round();

            let damage = player.attack(dice)?;
            if damage == 0 {
                stats.add_exhausted_turn();
            }

            let damage_dealt = enemy.receive_attack(damage, dice)?;
            stats.add_damage_dealt(damage_dealt);

            if enemy.is_defeated() {
                break Side::Player;
            }

            let enemy_damage = enemy.attack(dice)?;
            let damage_received = player.receive_attack(enemy_damage, dice)?;
            stats.add_damage_received(damage_received);

            tracing::debug!(
                round = stats.rounds,
                damage_dealt,
                damage_received,
                player_health = player.current_health(),
                enemy_health = enemy.current_health(),
                "Round resolved"
            );

            if player.is_defeated() {
                break Side::Enemy;
            }
        };

        Ok(self.finish(stats, winner_side, player, enemy, failures))
    }

    fn finish(
        &self,
        stats: FightStats,
        winner_side: Side,
        player: &mut Character,
        enemy: &mut Character,
        mut failures: Vec<ObserverFailure>,
    ) -> Fight {
        let (winner, loser) = match winner_side {
            Side::Player => (player, enemy),
            Side::Enemy => (enemy, player),
        };

        let mut fight = Fight::new(
            stats,
            FighterRef::of(winner, winner_side),
            FighterRef::of(loser, winner_side.opponent()),
        );

        let mut outcome = FinishedFight {
            fight: &fight,
            winner,
            loser,
        };

        for observer in &self.observers {
            failures.extend(run_isolated(observer.as_ref(), || {
                observer.on_fight_finished(&mut outcome)
            }));
        }

        fight.record_observer_failures(failures);
        fight
    }
}

fn same_observer(a: &Arc<dyn FightObserver>, b: &Arc<dyn FightObserver>) -> bool {
    // Compare data pointers only; vtable pointers are not guaranteed unique
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

/// Run one observer callback; an error or a panic becomes a recorded failure
fn run_isolated<F>(observer: &dyn FightObserver, call: F) -> Option<ObserverFailure>
where
    F: FnOnce() -> std::result::Result<(), ObserverError>,
{
    let message = match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(())) => return None,
        Ok(Err(err)) => err.to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };

    tracing::warn!(observer = observer.name(), error = %message, "Fight observer failed");
    Some(ObserverFailure {
        observer: observer.name().to_string(),
        message,
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("observer panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("observer panicked: {s}")
    } else {
        "observer panicked".to_string()
    }
}
