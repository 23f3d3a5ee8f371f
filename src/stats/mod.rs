//! Combatant stat blocks.
//!
//! - `Stat`, `StatModifier`: stat identifiers and the changes applied to them
//! - `StatBlock`: health, shields, stats, cooldowns and active status effects

mod block;
mod stat;

pub use block::{ActiveStatus, DamageReport, StatBlock, ABILITY_SLOTS};
pub use stat::{AppliedChange, Change, Stat, StatModifier};
