//! Elemental types carried by creatures, abilities and loot.

use serde::{Deserialize, Serialize};

/// Elemental type of a creature.
///
/// Reward tables key off this; types they don't map fall back to a
/// generic branch rather than failing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementType {
    #[default]
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Earth,
    Wind,
    Light,
    Dark,
    Poison,
    Psychic,
}

impl ElementType {
    /// Every element, in declaration order.
    pub const ALL: [ElementType; 12] = [
        ElementType::Normal,
        ElementType::Fire,
        ElementType::Water,
        ElementType::Grass,
        ElementType::Electric,
        ElementType::Ice,
        ElementType::Earth,
        ElementType::Wind,
        ElementType::Light,
        ElementType::Dark,
        ElementType::Poison,
        ElementType::Psychic,
    ];

    /// Display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ElementType::Normal => "Normal",
            ElementType::Fire => "Fire",
            ElementType::Water => "Water",
            ElementType::Grass => "Grass",
            ElementType::Electric => "Electric",
            ElementType::Ice => "Ice",
            ElementType::Earth => "Earth",
            ElementType::Wind => "Wind",
            ElementType::Light => "Light",
            ElementType::Dark => "Dark",
            ElementType::Poison => "Poison",
            ElementType::Psychic => "Psychic",
        }
    }

    /// Parse a type name case-insensitively.
    ///
    /// Unknown names resolve to [`ElementType::Normal`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
