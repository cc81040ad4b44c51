//! Duel Arena - turn-based duel simulation

pub mod character;
pub mod combat;
pub mod core;
pub mod game;
