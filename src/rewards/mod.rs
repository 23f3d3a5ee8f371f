//! Post-victory rewards.
//!
//! - `RewardGenerator`: rolls crystals and the independent bonus drops
//! - `tables`: fixed element-keyed lookups

mod generator;
pub mod tables;

pub use generator::{base_crystals, crystal_range, Reward, RewardGenerator};
