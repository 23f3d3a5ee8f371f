//! Elementally flavored equipment generators.
//!
//! `forge` is deterministic given its inputs; `generate` rolls rarity and
//! slot first. Each mapped element has its own flavor (name prefix, extra
//! bonus, special effect); everything else goes through the generic one.

use smallvec::SmallVec;

use super::{Equipment, EquipmentSlot, Rarity, SpecialEffect, SpecialEffectKind, StatBonus};
use crate::core::{ElementType, RandomSource};
use crate::stats::Stat;
use crate::status::StatusEffectKind;

/// Trigger chance added per rarity rank.
const TRIGGER_PER_RANK: f64 = 0.02;

struct Flavor {
    prefix: &'static str,
    extra: StatBonus,
    special: SpecialEffect,
}

/// Roll a rarity allowed at `level`.
pub fn roll_rarity(level: u32, rng: &mut impl RandomSource) -> Rarity {
    let allowed: SmallVec<[Rarity; 5]> = Rarity::ALL
        .into_iter()
        .filter(|r| level >= r.min_level())
        .collect();
    let weights: SmallVec<[f32; 5]> = allowed.iter().map(|r| r.weight()).collect();
    rng.weighted_index(&weights)
        .and_then(|i| allowed.get(i).copied())
        .unwrap_or(Rarity::Common)
}

/// Pick a slot uniformly.
pub fn roll_slot(rng: &mut impl RandomSource) -> EquipmentSlot {
    rng.index(EquipmentSlot::ALL.len())
        .map_or(EquipmentSlot::Weapon, |i| EquipmentSlot::ALL[i])
}

/// Roll rarity and slot, then forge.
pub fn generate(level: u32, element: ElementType, rng: &mut impl RandomSource) -> Equipment {
    let rarity = roll_rarity(level, rng);
    let slot = roll_slot(rng);
    forge(level, rarity, slot, element)
}

/// Build an item from fully decided parameters.
#[must_use]
pub fn forge(level: u32, rarity: Rarity, slot: EquipmentSlot, element: ElementType) -> Equipment {
    let magnitude = (f64::from(3 + level / 5) * rarity.scale()).round();
    let rank = f64::from(rarity.rank());

    let mut bonuses: SmallVec<[StatBonus; 4]> = match slot {
        EquipmentSlot::Weapon => SmallVec::from_slice(&[
            StatBonus::new(Stat::PhysicalAttack, magnitude),
            StatBonus::new(Stat::MagicalAttack, magnitude),
        ]),
        EquipmentSlot::Armor => SmallVec::from_slice(&[
            StatBonus::new(Stat::PhysicalDefense, magnitude),
            StatBonus::new(Stat::MagicalDefense, magnitude),
        ]),
        EquipmentSlot::Accessory => SmallVec::from_slice(&[
            StatBonus::new(Stat::Speed, (magnitude / 2.0).floor().max(1.0)),
            StatBonus::new(Stat::CriticalChance, 3.0 + 2.0 * rank),
        ]),
        EquipmentSlot::Charm => SmallVec::from_slice(&[
            StatBonus::new(Stat::MaxHealth, magnitude * 3.0),
            StatBonus::new(Stat::HealingBonus, 5.0 * (rank + 1.0)),
        ]),
    };

    let mut flavor = flavor_for(element, rarity, magnitude);
    flavor.special.trigger_chance += TRIGGER_PER_RANK * rank;
    bonuses.push(flavor.extra);

    Equipment {
        name: format!("{} {} {}", rarity.as_str(), flavor.prefix, slot.noun()),
        slot,
        rarity,
        element,
        bonuses,
        special: Some(flavor.special),
    }
}

fn flavor_for(element: ElementType, rarity: Rarity, magnitude: f64) -> Flavor {
    match element {
        ElementType::Fire => fire(rarity),
        ElementType::Water => water(),
        ElementType::Grass => grass(rarity),
        ElementType::Electric => electric(rarity),
        ElementType::Ice => ice(magnitude),
        _ => generic(),
    }
}

fn fire(rarity: Rarity) -> Flavor {
    Flavor {
        prefix: "Blazing",
        extra: StatBonus::new(Stat::ArmorPenetration, 5.0 * f64::from(rarity.rank() + 1)),
        special: SpecialEffect {
            name: "Searing".to_string(),
            description: "Scorches the target for 5% of its max health as true damage.".to_string(),
            trigger_chance: 0.15,
            kind: SpecialEffectKind::TrueDamage {
                percent_of_target_max: 5.0,
            },
        },
    }
}

fn water() -> Flavor {
    Flavor {
        prefix: "Tidal",
        extra: StatBonus::new(Stat::HealingBonus, 10.0),
        special: SpecialEffect {
            name: "Tidal".to_string(),
            description: "Restores 8% of the wearer's max health.".to_string(),
            trigger_chance: 0.20,
            kind: SpecialEffectKind::HealWearer { percent_of_max: 8.0 },
        },
    }
}

fn grass(rarity: Rarity) -> Flavor {
    Flavor {
        prefix: "Verdant",
        extra: StatBonus::new(Stat::LifeSteal, 3.0 * f64::from(rarity.rank() + 1)),
        special: SpecialEffect {
            name: "Thorned".to_string(),
            description: "Entangles the target, weakening it for 2 turns.".to_string(),
            trigger_chance: 0.15,
            kind: SpecialEffectKind::Inflict {
                effect: StatusEffectKind::Weakened,
                duration: 2,
            },
        },
    }
}

fn electric(rarity: Rarity) -> Flavor {
    Flavor {
        prefix: "Charged",
        extra: StatBonus::new(Stat::Speed, 2.0 * f64::from(rarity.rank() + 1)),
        special: SpecialEffect {
            name: "Static".to_string(),
            description: "Jolts the target, stunning it for a turn.".to_string(),
            trigger_chance: 0.10,
            kind: SpecialEffectKind::Inflict {
                effect: StatusEffectKind::Stunned,
                duration: 1,
            },
        },
    }
}

fn ice(magnitude: f64) -> Flavor {
    Flavor {
        prefix: "Frozen",
        extra: StatBonus::new(Stat::MagicalDefense, (magnitude / 2.0).floor().max(1.0)),
        special: SpecialEffect {
            name: "Frostbite".to_string(),
            description: "Chills the target, slowing it for 2 turns.".to_string(),
            trigger_chance: 0.20,
            kind: SpecialEffectKind::Inflict {
                effect: StatusEffectKind::Slowed,
                duration: 2,
            },
        },
    }
}

fn generic() -> Flavor {
    Flavor {
        prefix: "Sturdy",
        extra: StatBonus::new(Stat::ShieldStrength, 10.0),
        special: SpecialEffect {
            name: "Sturdy".to_string(),
            description: "Grants an adaptive shield worth 5% of the wearer's max health.".to_string(),
            trigger_chance: 0.10,
            kind: SpecialEffectKind::AdaptiveShield { percent_of_max: 5.0 },
        },
    }
}
