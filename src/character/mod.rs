//! Characters: health, stamina, progression, and the gear they fight with
//!
//! A character spends stamina on every attack. When an attack would
//! drain the bar to zero or below, the turn is lost and the bar refills.
//! Health may drop below zero on a lethal hit; the fight loop reads that
//! as death.

pub mod builder;
pub mod preset;

use std::sync::Arc;

use crate::combat::constants::{
    LEVEL_UP_PERCENT, MAX_STAMINA, STAMINA_COST_BASE, STAMINA_COST_DIE,
};
use crate::combat::{ArmorStrategy, AttackStrategy};
use crate::core::dice::Dice;
use crate::core::error::Result;
use crate::core::types::CharacterId;

pub use builder::{BuilderFactory, BuilderVariant, CharacterBuilder};
pub use preset::{CharacterPreset, CharacterType, PresetRegistry};

#[derive(Debug, Clone)]
pub struct Character {
    id: CharacterId,
    nickname: String,
    max_health: i32,
    base_damage: i32,
    current_health: i32,
    current_stamina: i32,
    level: u32,
    xp: u32,
    attack: Arc<dyn AttackStrategy>,
    armor: Arc<dyn ArmorStrategy>,
}

impl Character {
    /// A fresh level-1 character at full health and stamina
    pub fn new(
        max_health: i32,
        base_damage: i32,
        attack: Arc<dyn AttackStrategy>,
        armor: Arc<dyn ArmorStrategy>,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            nickname: String::new(),
            max_health,
            base_damage,
            current_health: max_health,
            current_stamina: MAX_STAMINA,
            level: 1,
            xp: 0,
            attack,
            armor,
        }
    }

    /// Attempt one attack.
    ///
    /// Costs `25 + d20` stamina. If that empties the bar the turn is
    /// skipped: stamina refills to full and the attack deals 0.
    pub fn attack(&mut self, dice: &mut dyn Dice) -> Result<i32> {
        self.current_stamina -= STAMINA_COST_BASE + dice.roll(STAMINA_COST_DIE)? as i32;

        if self.current_stamina <= 0 {
            self.current_stamina = MAX_STAMINA;
            return Ok(0);
        }

        self.attack.perform_attack(self.base_damage, dice)
    }

    /// Take a hit after armor. Returns the damage actually taken.
    pub fn receive_attack(&mut self, damage: i32, dice: &mut dyn Dice) -> Result<i32> {
        let reduction = self.armor.armor_reduction(damage, dice)?;
        let damage_taken = damage.saturating_sub(reduction).max(0);
        self.current_health = self.current_health.saturating_sub(damage_taken);
        Ok(damage_taken)
    }

    /// Back to full health and stamina
    pub fn rest(&mut self) {
        self.current_health = self.max_health;
        self.current_stamina = MAX_STAMINA;
    }

    /// Returns the new total
    pub fn add_xp(&mut self, amount: u32) -> u32 {
        self.xp = self.xp.saturating_add(amount);
        self.xp
    }

    /// Raise max health and base damage by 15%.
    ///
    /// Current health and stamina are untouched until the next `rest`.
    /// Gear does not improve with level.
    pub fn level_up(&mut self) {
        self.level += 1;
        self.max_health = scale(self.max_health, LEVEL_UP_PERCENT);
        self.base_damage = scale(self.base_damage, LEVEL_UP_PERCENT);
    }

    pub fn is_defeated(&self) -> bool {
        self.current_health <= 0
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn set_nickname(&mut self, nickname: impl Into<String>) {
        self.nickname = nickname.into();
    }

    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    pub fn current_stamina(&self) -> i32 {
        self.current_stamina
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn base_damage(&self) -> i32 {
        self.base_damage
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn attack_strategy(&self) -> &Arc<dyn AttackStrategy> {
        &self.attack
    }

    pub fn armor_strategy(&self) -> &Arc<dyn ArmorStrategy> {
        &self.armor
    }
}

/// `value * percent / 100`, floored and clamped into `i32`
pub(crate) fn scale(value: i32, percent: i32) -> i32 {
    let scaled = (i64::from(value) * i64::from(percent)).div_euclid(100);
    scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{Bow, IceBlock, Leather, Shield, TwoHandedSword};
    use crate::core::dice::{FixedDice, ScriptedDice};

    fn fighter() -> Character {
        Character::new(90, 12, Arc::new(TwoHandedSword), Arc::new(Shield))
    }

    #[test]
    fn test_new_character_starts_full() {
        let c = fighter();
        assert_eq!(c.current_health(), 90);
        assert_eq!(c.current_stamina(), MAX_STAMINA);
        assert_eq!(c.level(), 1);
        assert_eq!(c.xp(), 0);
        assert!(!c.is_defeated());
    }

    #[test]
    fn test_attack_spends_stamina_and_hits() {
        let mut c = fighter();
        // d20 cost roll, then two d12s
        let mut dice = ScriptedDice::new([10, 6, 6]);
        assert_eq!(c.attack(&mut dice).unwrap(), 24);
        assert_eq!(c.current_stamina(), 65);
    }

    #[test]
    fn test_exhausted_attack_refills_and_deals_nothing() {
        let mut c = fighter();
        let mut dice = FixedDice::max();
        assert_eq!(c.attack(&mut dice).unwrap(), 36);
        assert_eq!(c.current_stamina(), 55);
        assert_eq!(c.attack(&mut dice).unwrap(), 36);
        assert_eq!(c.current_stamina(), 10);
        assert_eq!(c.attack(&mut dice).unwrap(), 0);
        assert_eq!(c.current_stamina(), MAX_STAMINA);
    }

    #[test]
    fn test_stamina_exactly_zero_counts_as_exhausted() {
        let mut c = fighter();
        // 100 -> 55 -> 26 -> 0
        let mut dice = ScriptedDice::new([20, 12, 12, 4, 1, 1, 1]);
        assert_eq!(c.attack(&mut dice).unwrap(), 36);
        assert_eq!(c.attack(&mut dice).unwrap(), 14);
        assert_eq!(c.current_stamina(), 26);
        assert_eq!(c.attack(&mut dice).unwrap(), 0);
        assert_eq!(c.current_stamina(), MAX_STAMINA);
    }

    #[test]
    fn test_receive_attack_clamps_at_zero() {
        let mut mage = Character::new(70, 8, Arc::new(Bow), Arc::new(IceBlock));
        let mut dice = FixedDice::max();
        assert_eq!(mage.receive_attack(5, &mut dice).unwrap(), 0);
        assert_eq!(mage.current_health(), 70);
        assert_eq!(mage.receive_attack(20, &mut dice).unwrap(), 4);
        assert_eq!(mage.current_health(), 66);
    }

    #[test]
    fn test_health_can_go_negative() {
        let mut archer = Character::new(10, 10, Arc::new(Bow), Arc::new(Leather));
        let mut dice = FixedDice::max();
        assert_eq!(archer.receive_attack(40, &mut dice).unwrap(), 30);
        assert_eq!(archer.current_health(), -20);
        assert!(archer.is_defeated());
    }

    #[test]
    fn test_rest_restores_and_is_idempotent() {
        let mut c = fighter();
        let mut dice = FixedDice::min();
        c.attack(&mut dice).unwrap();
        c.receive_attack(30, &mut dice).unwrap();
        assert_eq!(c.current_health(), 60);

        c.rest();
        let once = (c.current_health(), c.current_stamina());
        c.rest();
        assert_eq!(once, (c.current_health(), c.current_stamina()));
        assert_eq!(once, (90, MAX_STAMINA));
    }

    #[test]
    fn test_add_xp_accumulates() {
        let mut c = fighter();
        assert_eq!(c.add_xp(2), 2);
        assert_eq!(c.add_xp(3), 5);
        assert_eq!(c.level(), 1);
    }

    #[test]
    fn test_level_up_scales_stats_only() {
        let mut c = fighter();
        let mut dice = FixedDice::min();
        c.receive_attack(10, &mut dice).unwrap();

        c.level_up();
        assert_eq!(c.level(), 2);
        assert_eq!(c.max_health(), 103);
        assert_eq!(c.base_damage(), 13);
        // Takes effect on the next rest
        assert_eq!(c.current_health(), 80);
        c.rest();
        assert_eq!(c.current_health(), 103);
    }

    #[test]
    fn test_level_up_is_exact_on_round_values() {
        for (before, after) in [(100, 115), (180, 207), (200, 230), (20, 23), (340, 391)] {
            let mut c = Character::new(before, before, Arc::new(Bow), Arc::new(Leather));
            c.level_up();
            assert_eq!(c.max_health(), after, "max health from {before}");
            assert_eq!(c.base_damage(), after, "base damage from {before}");
        }
    }

    #[test]
    fn test_scale_floors_and_clamps() {
        assert_eq!(scale(103, LEVEL_UP_PERCENT), 118);
        assert_eq!(scale(75, 150), 112);
        assert_eq!(scale(i32::MAX, LEVEL_UP_PERCENT), i32::MAX);
    }

    #[test]
    fn test_huge_hit_saturates_health() {
        let mut c = Character::new(10, 10, Arc::new(Bow), Arc::new(IceBlock));
        let mut dice = FixedDice::min();
        c.receive_attack(i32::MAX, &mut dice).unwrap();
        c.receive_attack(i32::MAX, &mut dice).unwrap();
        assert_eq!(c.current_health(), i32::MIN);
        assert!(c.is_defeated());
    }
}
