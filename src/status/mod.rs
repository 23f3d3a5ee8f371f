//! Status effects: a data-only catalog plus the stat-delta dispatch table.
//!
//! - `catalog`: names, descriptions, max durations and categories
//! - `delta`: which stats each statistical entry changes
//!
//! Behavioral entries are dispatched by the combat orchestrator
//! (`combat::behavior`), not here.

pub mod catalog;
pub mod delta;

pub use catalog::{BehaviorTag, EffectCategory, StatusEffectDefinition, StatusEffectKind, CATALOG};
pub use delta::stat_delta;
