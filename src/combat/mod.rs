pub mod armor;
pub mod attack;
pub mod constants;

pub use armor::{ArmorKind, ArmorStrategy, IceBlock, Leather, Shield};
pub use attack::{AttackKind, AttackStrategy, Bow, FireBolt, MultiAttack, TwoHandedSword};
