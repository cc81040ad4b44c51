//! Character assembly
//!
//! Every required part must be supplied before `build`. A missing part is a
//! construction error, never a silent default.

use std::sync::Arc;

use crate::character::{scale, Character};
use crate::combat::constants::{BUILDER_DIE, GREATER_HEALTH_PERCENT};
use crate::combat::{ArmorStrategy, AttackStrategy, MultiAttack};
use crate::core::dice::Dice;
use crate::core::error::{DuelError, Result};

/// Which flavor of builder assembles a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuilderVariant {
    #[default]
    Standard,
    /// Stores max health at 1.5x what it is given
    GreaterHealth,
}

impl BuilderVariant {
    /// Pure selection rule: a roll strictly above `threshold` picks the bonus
    pub fn from_roll(roll: u32, threshold: u32) -> Self {
        if roll > threshold {
            BuilderVariant::GreaterHealth
        } else {
            BuilderVariant::Standard
        }
    }

    pub fn builder(self) -> CharacterBuilder {
        CharacterBuilder::with_variant(self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CharacterBuilder {
    variant: BuilderVariant,
    max_health: Option<i32>,
    base_damage: Option<i32>,
    attacks: Option<Vec<Arc<dyn AttackStrategy>>>,
    armor: Option<Arc<dyn ArmorStrategy>>,
    nickname: Option<String>,
}

impl CharacterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn greater_health() -> Self {
        Self::with_variant(BuilderVariant::GreaterHealth)
    }

    pub fn with_variant(variant: BuilderVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    pub fn variant(&self) -> BuilderVariant {
        self.variant
    }

    pub fn max_health(mut self, max_health: i32) -> Self {
        self.max_health = Some(match self.variant {
            BuilderVariant::Standard => max_health,
            BuilderVariant::GreaterHealth => scale(max_health, GREATER_HEALTH_PERCENT),
        });
        self
    }

    pub fn base_damage(mut self, base_damage: i32) -> Self {
        self.base_damage = Some(base_damage);
        self
    }

    /// Use a single attack
    pub fn attack(self, attack: Arc<dyn AttackStrategy>) -> Self {
        self.attacks(vec![attack])
    }

    /// Use one or more attacks; several are combined into a multi-attack
    pub fn attacks(mut self, attacks: Vec<Arc<dyn AttackStrategy>>) -> Self {
        self.attacks = Some(attacks);
        self
    }

    pub fn armor(mut self, armor: Arc<dyn ArmorStrategy>) -> Self {
        self.armor = Some(armor);
        self
    }

    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn build(self) -> Result<Character> {
        let max_health = self.max_health.ok_or_else(|| missing("max health"))?;
        let base_damage = self.base_damage.ok_or_else(|| missing("base damage"))?;
        let mut attacks = self.attacks.ok_or_else(|| missing("attack"))?;
        let armor = self.armor.ok_or_else(|| missing("armor"))?;

        let attack: Arc<dyn AttackStrategy> = match attacks.len() {
            0 => return Err(missing("attack")),
            1 => attacks.remove(0),
            _ => Arc::new(MultiAttack::new(attacks)?),
        };

        let mut character = Character::new(max_health, base_damage, attack, armor);
        if let Some(nickname) = self.nickname {
            character.set_nickname(nickname);
        }
        Ok(character)
    }
}

fn missing(field: &str) -> DuelError {
    DuelError::InvalidConstruction(format!("character built without {field}"))
}

/// Chooses a builder variant for each new character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderFactory {
    /// A d100 above this picks the greater-health builder
    pub greater_health_threshold: u32,
}

impl Default for BuilderFactory {
    fn default() -> Self {
        Self {
            greater_health_threshold: 90,
        }
    }
}

impl BuilderFactory {
    pub fn new(greater_health_threshold: u32) -> Self {
        Self {
            greater_health_threshold,
        }
    }

    pub fn create_builder(&self, dice: &mut dyn Dice) -> Result<CharacterBuilder> {
        let roll = dice.roll(BUILDER_DIE)?;
        let variant = BuilderVariant::from_roll(roll, self.greater_health_threshold);
        if variant == BuilderVariant::GreaterHealth {
            tracing::debug!("Builder roll {} picked the greater-health builder", roll);
        }
        Ok(variant.builder())
    }
}
