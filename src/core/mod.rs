pub mod config;
pub mod dice;
pub mod error;
pub mod types;

pub use config::DuelConfig;
pub use dice::{pick_index, Dice, FixedDice, RngDice, ScriptedDice};
pub use error::{DuelError, ObserverError, Result};
pub use types::{CharacterId, Side};
