//! Attack strategies
//!
//! An attack turns a character's base damage into the damage of one hit.
//! Strategies hold no state and are shared between characters via `Arc`.

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    BOW_CRIT_MULTIPLIER, BOW_CRIT_THRESHOLD, BOW_DIE, FIRE_BOLT_DICE, FIRE_BOLT_DIE, SWORD_DICE,
    SWORD_DIE,
};
use crate::core::dice::{pick_index, Dice};
use crate::core::error::{DuelError, Result};

/// Anything that can produce the damage of a single hit
pub trait AttackStrategy: Debug + Send + Sync {
    /// Damage dealt for one attack. Never negative for non-negative input.
    fn perform_attack(&self, base_damage: i32, dice: &mut dyn Dice) -> Result<i32>;

    fn name(&self) -> &str;
}

/// Ranged attack with a 30% chance of tripling base damage
#[derive(Debug, Clone, Copy, Default)]
pub struct Bow;

impl AttackStrategy for Bow {
    fn perform_attack(&self, base_damage: i32, dice: &mut dyn Dice) -> Result<i32> {
        if dice.roll(BOW_DIE)? > BOW_CRIT_THRESHOLD {
            Ok(base_damage.saturating_mul(BOW_CRIT_MULTIPLIER))
        } else {
            Ok(base_damage)
        }
    }

    fn name(&self) -> &str {
        "Bow"
    }
}

/// 3d10 of fire, base damage plays no part
#[derive(Debug, Clone, Copy, Default)]
pub struct FireBolt;

impl AttackStrategy for FireBolt {
    fn perform_attack(&self, _base_damage: i32, dice: &mut dyn Dice) -> Result<i32> {
        roll_sum(dice, FIRE_BOLT_DICE, FIRE_BOLT_DIE)
    }

    fn name(&self) -> &str {
        "Fire Bolt"
    }
}

/// Base damage plus 2d12
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoHandedSword;

impl AttackStrategy for TwoHandedSword {
    fn perform_attack(&self, base_damage: i32, dice: &mut dyn Dice) -> Result<i32> {
        Ok(base_damage.saturating_add(roll_sum(dice, SWORD_DICE, SWORD_DIE)?))
    }

    fn name(&self) -> &str {
        "Two-Handed Sword"
    }
}

/// Picks one of several attacks at random on every call
#[derive(Debug, Clone)]
pub struct MultiAttack {
    attacks: Vec<Arc<dyn AttackStrategy>>,
}

impl MultiAttack {
    /// Fails on an empty list: there would be nothing to delegate to.
    pub fn new(attacks: Vec<Arc<dyn AttackStrategy>>) -> Result<Self> {
        if attacks.is_empty() {
            return Err(DuelError::InvalidConstruction(
                "multi-attack needs at least one attack".into(),
            ));
        }
        Ok(Self { attacks })
    }

    pub fn attacks(&self) -> &[Arc<dyn AttackStrategy>] {
        &self.attacks
    }
}

impl AttackStrategy for MultiAttack {
    fn perform_attack(&self, base_damage: i32, dice: &mut dyn Dice) -> Result<i32> {
        let index = pick_index(dice, self.attacks.len())?;
        self.attacks[index].perform_attack(base_damage, dice)
    }

    fn name(&self) -> &str {
        "Multi-Attack"
    }
}

/// Preset tag for an attack strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Bow,
    FireBolt,
    TwoHandedSword,
}

impl AttackKind {
    pub fn strategy(&self) -> Arc<dyn AttackStrategy> {
        match self {
            AttackKind::Bow => Arc::new(Bow),
            AttackKind::FireBolt => Arc::new(FireBolt),
            AttackKind::TwoHandedSword => Arc::new(TwoHandedSword),
        }
    }
}

/// Sum of `count` rolls, saturating at `i32::MAX`
pub(crate) fn roll_sum(dice: &mut dyn Dice, count: u32, sides: u32) -> Result<i32> {
    let mut total: i32 = 0;
    for _ in 0..count {
        let face = i32::try_from(dice.roll(sides)?).unwrap_or(i32::MAX);
        total = total.saturating_add(face);
    }
    Ok(total)
}
