//! Combat system constants - all tunable values in one place

// Stamina
pub const MAX_STAMINA: i32 = 100;
pub const STAMINA_COST_BASE: i32 = 25;
pub const STAMINA_COST_DIE: u32 = 20;

// Bow: a d100 above the threshold triples base damage
pub const BOW_DIE: u32 = 100;
pub const BOW_CRIT_THRESHOLD: u32 = 70;
pub const BOW_CRIT_MULTIPLIER: i32 = 3;

// Fire bolt: 3d10, ignores base damage
pub const FIRE_BOLT_DICE: u32 = 3;
pub const FIRE_BOLT_DIE: u32 = 10;

// Two-handed sword: base + 2d12
pub const SWORD_DICE: u32 = 2;
pub const SWORD_DIE: u32 = 12;

// Leather absorbs a fixed share of each hit
pub const LEATHER_REDUCTION: f64 = 0.25;

// Shield: a d100 above the threshold blocks the whole hit
pub const SHIELD_DIE: u32 = 100;
pub const SHIELD_BLOCK_THRESHOLD: u32 = 80;

// Ice block: flat 2d8
pub const ICE_BLOCK_DICE: u32 = 2;
pub const ICE_BLOCK_DIE: u32 = 8;

// Progression, in percent so scaling stays in integer math
pub const LEVEL_UP_PERCENT: i32 = 115;
pub const GREATER_HEALTH_PERCENT: i32 = 150;
pub const BUILDER_DIE: u32 = 100;
