//! Armor strategies
//!
//! Armor reports how much of an incoming hit it absorbs. The result is not
//! clamped here: an ice block can report more than the hit was worth, and
//! the defender clamps the net damage at zero.

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    ICE_BLOCK_DICE, ICE_BLOCK_DIE, LEATHER_REDUCTION, SHIELD_BLOCK_THRESHOLD, SHIELD_DIE,
};
use crate::combat::attack::roll_sum;
use crate::core::dice::Dice;
use crate::core::error::Result;

/// Anything that can soak part of an incoming hit
pub trait ArmorStrategy: Debug + Send + Sync {
    fn armor_reduction(&self, incoming_damage: i32, dice: &mut dyn Dice) -> Result<i32>;

    fn name(&self) -> &str;
}

/// Absorbs a quarter of every hit, rounded down
#[derive(Debug, Clone, Copy, Default)]
pub struct Leather;

impl ArmorStrategy for Leather {
    fn armor_reduction(&self, incoming_damage: i32, _dice: &mut dyn Dice) -> Result<i32> {
        Ok((f64::from(incoming_damage) * LEATHER_REDUCTION).floor() as i32)
    }

    fn name(&self) -> &str {
        "Leather"
    }
}

/// All or nothing: a 20% chance to block the whole hit
#[derive(Debug, Clone, Copy, Default)]
pub struct Shield;

impl ArmorStrategy for Shield {
    fn armor_reduction(&self, incoming_damage: i32, dice: &mut dyn Dice) -> Result<i32> {
        if dice.roll(SHIELD_DIE)? > SHIELD_BLOCK_THRESHOLD {
            Ok(incoming_damage)
        } else {
            Ok(0)
        }
    }

    fn name(&self) -> &str {
        "Shield"
    }
}

/// Flat 2d8 reduction regardless of the hit
#[derive(Debug, Clone, Copy, Default)]
pub struct IceBlock;

impl ArmorStrategy for IceBlock {
    fn armor_reduction(&self, _incoming_damage: i32, dice: &mut dyn Dice) -> Result<i32> {
        roll_sum(dice, ICE_BLOCK_DICE, ICE_BLOCK_DIE)
    }

    fn name(&self) -> &str {
        "Ice Block"
    }
}

/// Preset tag for an armor strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorKind {
    Leather,
    Shield,
    IceBlock,
}

impl ArmorKind {
    pub fn strategy(&self) -> Arc<dyn ArmorStrategy> {
        match self {
            ArmorKind::Leather => Arc::new(Leather),
            ArmorKind::Shield => Arc::new(Shield),
            ArmorKind::IceBlock => Arc::new(IceBlock),
        }
    }
}
