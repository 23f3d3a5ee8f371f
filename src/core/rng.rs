//! Injectable random number generation.
//!
//! Every probabilistic branch in combat (damage spread, flee rolls, reward
//! drops, enemy ability choice) draws from a [`RandomSource`] that the caller
//! hands to the session. Nothing in the crate touches a process-wide RNG.
//!
//! ## Sources
//!
//! - [`CombatRng`]: seeded ChaCha8. Same seed, same combat.
//! - [`ScriptedRng`]: replays a fixed list of unit samples. Lets a test pin
//!   a random factor to exactly `1.0` or force a flee roll to fail.
//!
//! ```
//! use creature_combat::core::{CombatRng, RandomSource};
//!
//! let mut a = CombatRng::new(42);
//! let mut b = CombatRng::new(42);
//! assert_eq!(a.range_i32(0, 100), b.range_i32(0, 100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A source of uniform samples in `[0, 1)`.
///
/// Only [`next_unit`](RandomSource::next_unit) is required; the derived
/// helpers are expressed in terms of it so scripted sources stay exact.
pub trait RandomSource {
    /// Next sample, uniform in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform float in `[low, high)`.
    fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }

    /// Uniform integer in `[low, high]` (inclusive).
    fn range_i32(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        let span = i64::from(high) - i64::from(low) + 1;
        let offset = ((self.next_unit() * span as f64) as i64).min(span - 1);
        (i64::from(low) + offset) as i32
    }

    /// Bernoulli trial with the given probability of `true`.
    fn chance(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        self.next_unit() < probability
    }

    /// Uniform index into a collection of `len` items.
    ///
    /// Returns `None` for an empty collection.
    fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let idx = (self.next_unit() * len as f64) as usize;
        Some(idx.min(len - 1))
    }

    /// Choose an index with weighted probability.
    ///
    /// Weights do not need to sum to 1.0.
    /// Returns `None` if weights are empty or all zero.
    fn weighted_index(&mut self, weights: &[f32]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }

        let total: f32 = weights.iter().sum();
        if total <= 0.0 {
            return None;
        }

        let mut threshold = self.next_unit() as f32 * total;

        for (i, &weight) in weights.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            threshold -= weight;
            if threshold < 0.0 {
                return Some(i);
            }
        }

        // Floating point edge case - return last non-zero weight
        weights.iter().rposition(|&w| w > 0.0)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn range_i32(&mut self, low: i32, high: i32) -> i32 {
        (**self).range_i32(low, high)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn range_i32(&mut self, low: i32, high: i32) -> i32 {
        (**self).range_i32(low, high)
    }
}

/// Deterministic seeded RNG for combat sessions.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct CombatRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl CombatRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Derive an independent RNG, e.g. for a capture collaborator.
    ///
    /// Deterministic: the same parent state yields the same child.
    #[must_use]
    pub fn derive(&mut self) -> Self {
        let child_seed = self.inner.gen::<u64>() ^ self.seed.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self::new(child_seed)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> CombatRngState {
        CombatRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &CombatRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for CombatRng {
    fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn range_i32(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.inner.gen_range(low..=high)
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed sequence of unit samples, cycling when exhausted.
///
/// Values are clamped into `[0, 1)`. An empty script always yields `0.0`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    samples: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    /// Create a source replaying `samples` in order.
    #[must_use]
    pub fn new(samples: impl Into<Vec<f64>>) -> Self {
        Self {
            samples: samples.into(),
            cursor: 0,
        }
    }

    /// A source that always returns the same sample.
    #[must_use]
    pub fn constant(sample: f64) -> Self {
        Self::new(vec![sample])
    }

    /// The sample that maps `range_f64(low, high)` to exactly `value`.
    #[must_use]
    pub fn sample_for(value: f64, low: f64, high: f64) -> f64 {
        (value - low) / (high - low)
    }

    /// Number of samples drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = CombatRng::new(42);
        let mut rng2 = CombatRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.range_i32(0, 1000), rng2.range_i32(0, 1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = CombatRng::new(1);
        let mut rng2 = CombatRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.range_i32(0, 1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.range_i32(0, 1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_derive_is_deterministic() {
        let mut rng1 = CombatRng::new(42);
        let mut rng2 = CombatRng::new(42);

        let mut child1 = rng1.derive();
        let mut child2 = rng2.derive();

        assert_eq!(child1.next_unit(), child2.next_unit());
    }

    #[test]
    fn test_range_f64_bounds() {
        let mut rng = CombatRng::new(7);
        for _ in 0..1000 {
            let v = rng.range_f64(0.85, 1.15);
            assert!((0.85..1.15).contains(&v));
        }
    }

    #[test]
    fn test_range_i32_inclusive() {
        let mut rng = CombatRng::new(7);
        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..2000 {
            let v = rng.range_i32(-2, 2);
            assert!((-2..=2).contains(&v));
            seen_low |= v == -2;
            seen_high |= v == 2;
        }
        assert!(seen_low && seen_high);

        assert_eq!(rng.range_i32(5, 5), 5);
        assert_eq!(rng.range_i32(5, 1), 5);
    }

    #[test]
    fn test_chance_edges() {
        let mut rng = CombatRng::new(3);
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn test_index() {
        let mut rng = CombatRng::new(42);
        assert_eq!(rng.index(0), None);
        for _ in 0..100 {
            assert!(rng.index(4).unwrap() < 4);
        }
    }

    #[test]
    fn test_weighted_index() {
        let mut rng = CombatRng::new(42);

        // Heavily weighted towards index 0
        let weights = vec![100.0, 0.0, 0.0];
        for _ in 0..10 {
            assert_eq!(rng.weighted_index(&weights), Some(0));
        }

        assert_eq!(rng.weighted_index(&[]), None);
        assert_eq!(rng.weighted_index(&[0.0, 0.0]), None);
    }

    #[test]
    fn test_weighted_index_scripted() {
        let weights = [50.0, 30.0, 20.0];
        assert_eq!(ScriptedRng::constant(0.0).weighted_index(&weights), Some(0));
        assert_eq!(ScriptedRng::constant(0.6).weighted_index(&weights), Some(1));
        assert_eq!(ScriptedRng::constant(0.99).weighted_index(&weights), Some(2));
    }

    #[test]
    fn test_scripted_cycles() {
        let mut rng = ScriptedRng::new(vec![0.1, 0.2]);
        assert_eq!(rng.next_unit(), 0.1);
        assert_eq!(rng.next_unit(), 0.2);
        assert_eq!(rng.next_unit(), 0.1);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn test_scripted_sample_for() {
        let sample = ScriptedRng::sample_for(1.0, 0.85, 1.15);
        let mut rng = ScriptedRng::constant(sample);
        assert!((rng.range_f64(0.85, 1.15) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_state_serialization() {
        let mut rng = CombatRng::new(42);

        for _ in 0..100 {
            rng.range_i32(0, 1000);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.range_i32(0, 1000)).collect();

        let mut restored = CombatRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.range_i32(0, 1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = CombatRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: CombatRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
