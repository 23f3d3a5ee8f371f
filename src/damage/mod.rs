//! Damage resolution.
//!
//! Pure formulas for ability and basic-attack damage plus the small helpers
//! (penetration, hit chance, critical multiplier) the orchestrator rolls
//! around them.

mod formula;

pub use formula::{
    ability_damage, basic_attack_damage, critical_multiplier, effective_defense, hit_chance,
    roll_ability_damage, roll_basic_attack_damage, ABILITY_FACTOR_RANGE, BASIC_FACTOR_RANGE,
};

use serde::{Deserialize, Serialize};

/// Damage channel. Decides which attack/defense pair is read and which
/// shields absorb the hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    #[default]
    Physical,
    Magical,
    /// Ignores every shield. Scales off physical attack against physical defense.
    True,
}

impl DamageKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DamageKind::Physical => "physical",
            DamageKind::Magical => "magical",
            DamageKind::True => "true",
        }
    }
}
