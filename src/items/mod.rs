//! Inventory items: consumables, crafting materials, capture stones and
//! equipment.

use serde::{Deserialize, Serialize};

use crate::core::ElementType;
use crate::equipment::Equipment;

/// Anything that can sit in the player's inventory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Item {
    Consumable(Consumable),
    Material(Material),
    CaptureStone(CaptureStone),
    Equipment(Equipment),
}

impl Item {
    /// Display name.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Item::Consumable(c) => c.name.clone(),
            Item::Material(m) => m.name.clone(),
            Item::CaptureStone(s) => s.name(),
            Item::Equipment(e) => e.name.clone(),
        }
    }

    #[must_use]
    pub fn as_consumable(&self) -> Option<&Consumable> {
        match self {
            Item::Consumable(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_capture_stone(&self) -> Option<CaptureStone> {
        match self {
            Item::CaptureStone(s) => Some(*s),
            _ => None,
        }
    }
}

/// A single-use healing item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumable {
    pub name: String,
    /// Health restored before healing bonus.
    pub heal: u32,
}

impl Consumable {
    /// The generic healing drop.
    #[must_use]
    pub fn potion() -> Self {
        Self {
            name: "Potion".to_string(),
            heal: 30,
        }
    }
}

/// A crafting material dropped by a creature of some element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub element: ElementType,
}

/// Capture stone material tier, lowest to highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StoneMaterial {
    Basic,
    Silver,
    Gold,
    Mythril,
}

impl StoneMaterial {
    /// Tier dropped by a creature of the given level.
    #[must_use]
    pub const fn for_level(level: u32) -> Self {
        if level >= 30 {
            StoneMaterial::Mythril
        } else if level >= 20 {
            StoneMaterial::Gold
        } else if level >= 10 {
            StoneMaterial::Silver
        } else {
            StoneMaterial::Basic
        }
    }

    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            StoneMaterial::Basic => 1.0,
            StoneMaterial::Silver => 1.25,
            StoneMaterial::Gold => 1.5,
            StoneMaterial::Mythril => 2.0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StoneMaterial::Basic => "Basic",
            StoneMaterial::Silver => "Silver",
            StoneMaterial::Gold => "Gold",
            StoneMaterial::Mythril => "Mythril",
        }
    }
}

/// Elemental affinity of a capture stone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoneAffinity {
    Neutral,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Earth,
    Wind,
    Light,
    Dark,
}

impl StoneAffinity {
    /// Affinity mirroring an element. Elements without a stone map to Neutral.
    #[must_use]
    pub const fn for_element(element: ElementType) -> Self {
        match element {
            ElementType::Fire => StoneAffinity::Fire,
            ElementType::Water => StoneAffinity::Water,
            ElementType::Grass => StoneAffinity::Grass,
            ElementType::Electric => StoneAffinity::Electric,
            ElementType::Ice => StoneAffinity::Ice,
            ElementType::Earth => StoneAffinity::Earth,
            ElementType::Wind => StoneAffinity::Wind,
            ElementType::Light => StoneAffinity::Light,
            ElementType::Dark => StoneAffinity::Dark,
            ElementType::Normal | ElementType::Poison | ElementType::Psychic => StoneAffinity::Neutral,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StoneAffinity::Neutral => "Neutral",
            StoneAffinity::Fire => "Fire",
            StoneAffinity::Water => "Water",
            StoneAffinity::Grass => "Grass",
            StoneAffinity::Electric => "Electric",
            StoneAffinity::Ice => "Ice",
            StoneAffinity::Earth => "Earth",
            StoneAffinity::Wind => "Wind",
            StoneAffinity::Light => "Light",
            StoneAffinity::Dark => "Dark",
        }
    }
}

/// Bonus when a stone's affinity matches the target's element.
pub const AFFINITY_MATCH_BONUS: f64 = 1.5;

/// A consumable used to capture weakened wild creatures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaptureStone {
    pub material: StoneMaterial,
    pub affinity: StoneAffinity,
}

impl CaptureStone {
    #[must_use]
    pub const fn new(material: StoneMaterial, affinity: StoneAffinity) -> Self {
        Self { material, affinity }
    }

    /// The stone a creature of this level and element drops.
    #[must_use]
    pub const fn dropped_by(level: u32, element: ElementType) -> Self {
        Self::new(StoneMaterial::for_level(level), StoneAffinity::for_element(element))
    }

    /// Capture chance multiplier against a target element.
    #[must_use]
    pub fn multiplier_against(&self, target: ElementType) -> f64 {
        let affinity = StoneAffinity::for_element(target);
        let matches = self.affinity != StoneAffinity::Neutral && self.affinity == affinity;
        let bonus = if matches { AFFINITY_MATCH_BONUS } else { 1.0 };
        self.material.multiplier() * bonus
    }

    #[must_use]
    pub fn name(&self) -> String {
        format!("{} {} Stone", self.material.as_str(), self.affinity.as_str())
    }
}
