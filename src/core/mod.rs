//! Core types shared by every combat module: RNG, configuration, errors,
//! elemental types.

pub mod config;
pub mod element;
pub mod error;
pub mod rng;

pub use config::{CombatConfig, RewardConfig};
pub use element::ElementType;
pub use error::{CombatError, Result};
pub use rng::{CombatRng, CombatRngState, RandomSource, ScriptedRng};
