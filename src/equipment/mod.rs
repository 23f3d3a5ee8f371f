//! Equipment: flat stat bonuses plus an optional special effect.
//!
//! Special effects are data (name, description, trigger chance, what they
//! do) and a pure [`SpecialEffect::resolve`] that turns wearer/target stats
//! into [`SideEffect`]s. Whoever owns turn resolution rolls activation and
//! applies the side effects; nothing here mutates combat state or logs.

mod generators;

pub use generators::{forge, generate, roll_rarity, roll_slot};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ElementType, RandomSource};
use crate::damage::DamageKind;
use crate::stats::{Stat, StatBlock};
use crate::status::StatusEffectKind;

/// Equipment slot category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
    Charm,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 4] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Armor,
        EquipmentSlot::Accessory,
        EquipmentSlot::Charm,
    ];

    /// Noun used in generated names.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Blade",
            EquipmentSlot::Armor => "Mail",
            EquipmentSlot::Accessory => "Ring",
            EquipmentSlot::Charm => "Charm",
        }
    }
}

/// Equipment rarity, lowest to highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// 0 for Common up to 4 for Legendary.
    #[must_use]
    pub const fn rank(self) -> u32 {
        self as u32
    }

    /// Lowest creature level that can drop this rarity.
    #[must_use]
    pub const fn min_level(self) -> u32 {
        match self {
            Rarity::Common => 0,
            Rarity::Uncommon => 5,
            Rarity::Rare => 10,
            Rarity::Epic => 20,
            Rarity::Legendary => 30,
        }
    }

    /// Relative drop weight among the rarities a level allows.
    #[must_use]
    pub const fn weight(self) -> f32 {
        match self {
            Rarity::Common => 50.0,
            Rarity::Uncommon => 30.0,
            Rarity::Rare => 15.0,
            Rarity::Epic => 4.0,
            Rarity::Legendary => 1.0,
        }
    }

    /// Multiplier on base stat bonuses.
    #[must_use]
    pub const fn scale(self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 1.5,
            Rarity::Rare => 2.0,
            Rarity::Epic => 3.0,
            Rarity::Legendary => 4.0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// A flat stat bonus granted while equipped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatBonus {
    pub stat: Stat,
    pub amount: f64,
}

impl StatBonus {
    #[must_use]
    pub const fn new(stat: Stat, amount: f64) -> Self {
        Self { stat, amount }
    }
}

/// What a special effect does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpecialEffectKind {
    /// True damage as a percentage of the target's max health.
    TrueDamage { percent_of_target_max: f64 },
    /// Heal the wearer by a percentage of its max health.
    HealWearer { percent_of_max: f64 },
    /// Inflict a status effect on the target.
    Inflict { effect: StatusEffectKind, duration: u32 },
    /// Adaptive shield on the wearer, as a percentage of its max health.
    AdaptiveShield { percent_of_max: f64 },
}

/// Outcome of a special effect, applied by the turn resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideEffect {
    DamageTarget { kind: DamageKind, amount: u32 },
    HealWearer(u32),
    ShieldWearer(u32),
    InflictTarget { effect: StatusEffectKind, duration: u32 },
}

/// Named, chance-gated special effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialEffect {
    pub name: String,
    pub description: String,
    /// Activation probability in `[0, 1]`.
    pub trigger_chance: f64,
    pub kind: SpecialEffectKind,
}

impl SpecialEffect {
    /// Side effects for a wearer hitting a target. Pure.
    #[must_use]
    pub fn resolve(&self, wearer: &StatBlock, target: &StatBlock) -> SmallVec<[SideEffect; 2]> {
        let percent = |max: u32, pct: f64| ((f64::from(max) * pct / 100.0).floor() as u32).max(1);
        let mut out = SmallVec::new();
        match self.kind {
            SpecialEffectKind::TrueDamage { percent_of_target_max } => out.push(SideEffect::DamageTarget {
                kind: DamageKind::True,
                amount: percent(target.max_health, percent_of_target_max),
            }),
            SpecialEffectKind::HealWearer { percent_of_max } => {
                out.push(SideEffect::HealWearer(percent(wearer.max_health, percent_of_max)));
            }
            SpecialEffectKind::Inflict { effect, duration } => {
                out.push(SideEffect::InflictTarget { effect, duration });
            }
            SpecialEffectKind::AdaptiveShield { percent_of_max } => {
                out.push(SideEffect::ShieldWearer(percent(wearer.max_health, percent_of_max)));
            }
        }
        out
    }
}

/// A piece of equipment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    pub slot: EquipmentSlot,
    pub rarity: Rarity,
    pub element: ElementType,
    pub bonuses: SmallVec<[StatBonus; 4]>,
    pub special: Option<SpecialEffect>,
}

impl Equipment {
    /// Add this item's bonuses to a stat block.
    pub fn apply_to(&self, stats: &mut StatBlock) {
        for bonus in &self.bonuses {
            stats.adjust(bonus.stat, bonus.amount);
        }
    }

    /// Take this item's bonuses back off a stat block.
    pub fn remove_from(&self, stats: &mut StatBlock) {
        for bonus in self.bonuses.iter().rev() {
            stats.adjust(bonus.stat, -bonus.amount);
        }
    }

    /// Roll whether the special effect fires. Items without one never fire.
    pub fn roll_activation(&self, rng: &mut impl RandomSource) -> bool {
        match &self.special {
            Some(special) => rng.chance(special.trigger_chance),
            None => false,
        }
    }
}
