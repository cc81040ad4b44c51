//! Character type presets
//!
//! Each character type maps to fixed base stats and gear. The built-in
//! table can be replaced by a TOML file keyed by type tag:
//!
//! ```toml
//! [fighter]
//! max_health = 90
//! base_damage = 12
//! attacks = ["two_handed_sword"]
//! armor = "shield"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::character::builder::CharacterBuilder;
use crate::combat::{ArmorKind, AttackKind};
use crate::core::error::{DuelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterType {
    Fighter,
    Archer,
    Mage,
    MageArcher,
}

impl CharacterType {
    pub const ALL: [CharacterType; 4] = [
        CharacterType::Fighter,
        CharacterType::Archer,
        CharacterType::Mage,
        CharacterType::MageArcher,
    ];

    /// Tag used in config files and on the command line
    pub fn tag(&self) -> &'static str {
        match self {
            CharacterType::Fighter => "fighter",
            CharacterType::Archer => "archer",
            CharacterType::Mage => "mage",
            CharacterType::MageArcher => "mage_archer",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            CharacterType::Fighter => "Fighter",
            CharacterType::Archer => "Archer",
            CharacterType::Mage => "Mage",
            CharacterType::MageArcher => "Mage Archer",
        }
    }

    pub fn choices() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.tag()).collect()
    }
}

impl fmt::Display for CharacterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CharacterType {
    type Err = DuelError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|t| t.tag() == tag)
            .ok_or_else(|| DuelError::UnknownCharacterType(s.to_string()))
    }
}

/// Stats and gear for one character type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPreset {
    pub max_health: i32,
    pub base_damage: i32,
    pub attacks: Vec<AttackKind>,
    pub armor: ArmorKind,
}

impl CharacterPreset {
    pub fn new(max_health: i32, base_damage: i32, attacks: Vec<AttackKind>, armor: ArmorKind) -> Self {
        Self {
            max_health,
            base_damage,
            attacks,
            armor,
        }
    }

    /// Feed this preset's parts into a builder
    pub fn apply(&self, builder: CharacterBuilder) -> CharacterBuilder {
        builder
            .max_health(self.max_health)
            .base_damage(self.base_damage)
            .attacks(self.attacks.iter().map(|kind| kind.strategy()).collect())
            .armor(self.armor.strategy())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_health <= 0 {
            return Err(DuelError::Config(format!(
                "max_health must be positive (got {})",
                self.max_health
            )));
        }
        if self.base_damage < 0 {
            return Err(DuelError::Config(format!(
                "base_damage must not be negative (got {})",
                self.base_damage
            )));
        }
        if self.attacks.is_empty() {
            return Err(DuelError::Config("a preset needs at least one attack".into()));
        }
        Ok(())
    }
}

/// Lookup table from character type to preset
#[derive(Debug, Clone)]
pub struct PresetRegistry {
    presets: AHashMap<CharacterType, CharacterPreset>,
}

impl Default for PresetRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.insert(
            CharacterType::Fighter,
            CharacterPreset::new(90, 12, vec![AttackKind::TwoHandedSword], ArmorKind::Shield),
        );
        registry.insert(
            CharacterType::Archer,
            CharacterPreset::new(80, 10, vec![AttackKind::Bow], ArmorKind::Leather),
        );
        registry.insert(
            CharacterType::Mage,
            CharacterPreset::new(70, 8, vec![AttackKind::FireBolt], ArmorKind::IceBlock),
        );
        registry.insert(
            CharacterType::MageArcher,
            CharacterPreset::new(
                75,
                9,
                vec![AttackKind::FireBolt, AttackKind::Bow],
                ArmorKind::Shield,
            ),
        );
        registry
    }
}

impl PresetRegistry {
    pub fn empty() -> Self {
        Self {
            presets: AHashMap::new(),
        }
    }

    pub fn get(&self, character_type: CharacterType) -> Option<&CharacterPreset> {
        self.presets.get(&character_type)
    }

    pub fn insert(&mut self, character_type: CharacterType, preset: CharacterPreset) {
        self.presets.insert(character_type, preset);
    }

    /// Registered types in declaration order
    pub fn types(&self) -> Vec<CharacterType> {
        CharacterType::ALL
            .into_iter()
            .filter(|t| self.presets.contains_key(t))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: BTreeMap<String, CharacterPreset> = toml::from_str(contents)?;

        let mut registry = Self::empty();
        for (tag, preset) in table {
            let character_type: CharacterType = tag.parse()?;
            preset.validate()?;
            registry.insert(character_type, preset);
        }
        Ok(registry)
    }

    /// Load presets from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let registry = Self::from_toml_str(&contents)?;
        tracing::info!("Loaded {} presets from {:?}", registry.len(), path);
        Ok(registry)
    }
}
