//! Dice: the single source of randomness for the whole engine
//!
//! Every random decision (damage rolls, stamina costs, armor blocks,
//! builder selection, opponent selection) goes through a [`Dice`] value
//! that is passed in explicitly. Swap in [`FixedDice`] or [`ScriptedDice`]
//! to make a fight fully deterministic.

use std::collections::VecDeque;

use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::error::{DuelError, Result};

/// Uniform integer draws in `[1, sides]`
pub trait Dice: Send {
    /// Roll a die with `sides` faces.
    ///
    /// A failing entropy source is returned as [`DuelError::Entropy`] and
    /// must be propagated as-is: retrying would skew the distribution.
    fn roll(&mut self, sides: u32) -> Result<u32>;
}

/// Draw a uniform index into a collection of `len` items
pub fn pick_index(dice: &mut dyn Dice, len: usize) -> Result<usize> {
    let sides = u32::try_from(len)
        .map_err(|_| DuelError::InvalidConstruction(format!("cannot pick among {len} items")))?;
    if sides == 0 {
        return Err(DuelError::InvalidConstruction(
            "cannot pick from an empty collection".into(),
        ));
    }
    Ok(dice.roll(sides)? as usize - 1)
}

/// Dice backed by any `rand` generator
///
/// Uses rejection sampling so every face is equally likely regardless of
/// the die size.
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: RngCore> RngDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn next_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.rng
            .try_fill_bytes(&mut buf)
            .map_err(|e| DuelError::Entropy(e.to_string()))?;
        Ok(u32::from_le_bytes(buf))
    }
}

impl RngDice<ChaCha8Rng> {
    /// Reproducible dice for simulations and tests
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl RngDice<OsRng> {
    /// Dice drawing straight from the operating system
    pub fn entropy() -> Self {
        Self::new(OsRng)
    }
}

impl<R: RngCore + Send> Dice for RngDice<R> {
    fn roll(&mut self, sides: u32) -> Result<u32> {
        if sides == 0 {
            return Err(DuelError::InvalidDie(sides));
        }

        let sides = u64::from(sides);
        // Largest multiple of `sides` below 2^32; draws past it would bias low faces
        let zone = (1u64 << 32) / sides * sides;

        loop {
            let draw = u64::from(self.next_u32()?);
            if draw < zone {
                return Ok((draw % sides) as u32 + 1);
            }
        }
    }
}

/// Dice that always land on the same face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDice {
    /// `None` means "always the highest face"
    face: Option<u32>,
}

impl FixedDice {
    /// Every roll returns `sides`
    pub fn max() -> Self {
        Self { face: None }
    }

    /// Every roll returns 1
    pub fn min() -> Self {
        Self { face: Some(1) }
    }

    /// Every roll returns `face`, clamped into `[1, sides]`
    pub fn face(face: u32) -> Self {
        Self { face: Some(face) }
    }
}

impl Dice for FixedDice {
    fn roll(&mut self, sides: u32) -> Result<u32> {
        if sides == 0 {
            return Err(DuelError::InvalidDie(sides));
        }
        Ok(self.face.map_or(sides, |face| face.clamp(1, sides)))
    }
}

/// Dice that replay a prepared sequence of faces
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u32>,
}

impl ScriptedDice {
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
        }
    }

    /// Faces not yet rolled
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, sides: u32) -> Result<u32> {
        if sides == 0 {
            return Err(DuelError::InvalidDie(sides));
        }
        let face = self
            .faces
            .pop_front()
            .ok_or_else(|| DuelError::Entropy("scripted dice ran out of faces".into()))?;
        if face == 0 || face > sides {
            return Err(DuelError::Entropy(format!(
                "scripted face {face} is not on a d{sides}"
            )));
        }
        Ok(face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rolls_stay_in_range() {
        let mut dice = RngDice::seeded(7);
        for sides in [1, 2, 6, 8, 10, 12, 20, 100] {
            for _ in 0..500 {
                let face = dice.roll(sides).unwrap();
                assert!((1..=sides).contains(&face));
            }
        }
    }

    #[test]
    fn test_seeded_dice_are_reproducible() {
        let mut a = RngDice::seeded(42);
        let mut b = RngDice::seeded(42);
        let left: Vec<u32> = (0..50).map(|_| a.roll(20).unwrap()).collect();
        let right: Vec<u32> = (0..50).map(|_| b.roll(20).unwrap()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_every_face_appears() {
        let mut dice = RngDice::seeded(3);
        let mut seen = [false; 8];
        for _ in 0..1000 {
            seen[dice.roll(8).unwrap() as usize - 1] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_zero_sided_die_rejected() {
        let mut dice = RngDice::seeded(1);
        assert!(matches!(dice.roll(0), Err(DuelError::InvalidDie(0))));
        assert!(matches!(FixedDice::max().roll(0), Err(DuelError::InvalidDie(0))));
    }

    #[test]
    fn test_fixed_dice() {
        let mut max = FixedDice::max();
        assert_eq!(max.roll(12).unwrap(), 12);
        assert_eq!(max.roll(100).unwrap(), 100);

        let mut min = FixedDice::min();
        assert_eq!(min.roll(20).unwrap(), 1);

        let mut seven = FixedDice::face(7);
        assert_eq!(seven.roll(20).unwrap(), 7);
        assert_eq!(seven.roll(4).unwrap(), 4);
    }

    #[test]
    fn test_scripted_dice_replay_then_fail() {
        let mut dice = ScriptedDice::new([3, 1]);
        assert_eq!(dice.roll(6).unwrap(), 3);
        assert_eq!(dice.remaining(), 1);
        assert_eq!(dice.roll(6).unwrap(), 1);
        assert!(matches!(dice.roll(6), Err(DuelError::Entropy(_))));
    }

    #[test]
    fn test_scripted_face_out_of_range() {
        let mut dice = ScriptedDice::new([9]);
        assert!(matches!(dice.roll(8), Err(DuelError::Entropy(_))));
    }

    #[test]
    fn test_pick_index() {
        let mut dice = ScriptedDice::new([1, 3]);
        assert_eq!(pick_index(&mut dice, 3).unwrap(), 0);
        assert_eq!(pick_index(&mut dice, 3).unwrap(), 2);
        assert!(pick_index(&mut dice, 0).is_err());
    }
}
