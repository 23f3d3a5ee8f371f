//! # creature-combat
//!
//! Turn-based combat core for a creature-collecting RPG.
//!
//! ## Design Principles
//!
//! 1. **Headless**: No rendering, input polling or persistence. Those sit
//!    behind the `Inventory`, `Presentation` and `CaptureService` traits.
//!
//! 2. **Injected Randomness**: Every roll goes through a `RandomSource`.
//!    Seeded `CombatRng` for play, `ScriptedRng` for exact replays in tests.
//!
//! 3. **Exact Reversal**: Status effects record the concrete amounts they
//!    added and subtract exactly those on removal.
//!
//! ## Architecture
//!
//! - **Tick-Driven**: `CombatSession::update(dt)` is called once per frame.
//!   Suspension points are countdowns, never blocking waits.
//!
//! - **Silent Rejection**: Invalid operations return `false` and change
//!   nothing; the `try_*` forms name the reason.
//!
//! - **Persistent Log**: The combat log is an `im::Vector`, so snapshots
//!   share it with the session instead of copying.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors, elemental types
//! - `stats`: Stat identifiers and the per-combatant `StatBlock`
//! - `status`: Status effect catalog and stat-delta table
//! - `damage`: Damage formulas
//! - `items`: Consumables, materials, capture stones
//! - `equipment`: Equipment, special effects, elemental generators
//! - `rewards`: Post-victory reward generation
//! - `combat`: Combatants, behavior dispatch, collaborators, the session

pub mod combat;
pub mod core;
pub mod damage;
pub mod equipment;
pub mod items;
pub mod rewards;
pub mod stats;
pub mod status;

// Re-export commonly used types
pub use crate::core::{
    CombatConfig, CombatError, CombatRng, CombatRngState, ElementType, RandomSource, Result, RewardConfig,
    ScriptedRng,
};

pub use crate::stats::{DamageReport, Stat, StatBlock, StatModifier, ABILITY_SLOTS};

pub use crate::status::{BehaviorTag, EffectCategory, StatusEffectDefinition, StatusEffectKind};

pub use crate::damage::{ability_damage, basic_attack_damage, DamageKind};

pub use crate::items::{CaptureStone, Consumable, Item, Material, StoneAffinity, StoneMaterial};

pub use crate::equipment::{Equipment, EquipmentSlot, Rarity, SideEffect, SpecialEffect, SpecialEffectKind, StatBonus};

pub use crate::rewards::{Reward, RewardGenerator};

pub use crate::combat::{
    Ability, CaptureReply, CaptureRequest, CaptureResult, CaptureService, ChanceCapture, CombatOutcome,
    CombatSession, CombatSnapshot, CombatState, Combatant, CombatantSnapshot, InputEvent, Inventory,
    NullPresentation, Party, PlayerCommand, PlayerMenu, PlayerProfile, Presentation,
};
