//! Stat identifiers and modifiers.

use serde::{Deserialize, Serialize};

/// Every adjustable stat on a [`StatBlock`](super::StatBlock).
///
/// Integer stats hold whole values; percentage stats hold percentage points
/// (`25.0` means 25%).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stat {
    MaxHealth,
    PhysicalAttack,
    MagicalAttack,
    PhysicalDefense,
    MagicalDefense,
    Speed,
    Accuracy,
    Evasion,
    CriticalChance,
    CriticalDamage,
    LifeSteal,
    SpellVamp,
    Omnivamp,
    Tenacity,
    ArmorPenetration,
    MagicPenetration,
    HealingBonus,
    ShieldStrength,
}

impl Stat {
    pub const ALL: [Stat; 18] = [
        Stat::MaxHealth,
        Stat::PhysicalAttack,
        Stat::MagicalAttack,
        Stat::PhysicalDefense,
        Stat::MagicalDefense,
        Stat::Speed,
        Stat::Accuracy,
        Stat::Evasion,
        Stat::CriticalChance,
        Stat::CriticalDamage,
        Stat::LifeSteal,
        Stat::SpellVamp,
        Stat::Omnivamp,
        Stat::Tenacity,
        Stat::ArmorPenetration,
        Stat::MagicPenetration,
        Stat::HealingBonus,
        Stat::ShieldStrength,
    ];

    /// Whether the stat holds whole values.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Stat::MaxHealth
                | Stat::PhysicalAttack
                | Stat::MagicalAttack
                | Stat::PhysicalDefense
                | Stat::MagicalDefense
                | Stat::Speed
                | Stat::Accuracy
                | Stat::Evasion
        )
    }

    /// Short display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Stat::MaxHealth => "Max HP",
            Stat::PhysicalAttack => "ATK",
            Stat::MagicalAttack => "MATK",
            Stat::PhysicalDefense => "DEF",
            Stat::MagicalDefense => "MDEF",
            Stat::Speed => "SPD",
            Stat::Accuracy => "ACC",
            Stat::Evasion => "EVA",
            Stat::CriticalChance => "Crit%",
            Stat::CriticalDamage => "CritDmg%",
            Stat::LifeSteal => "Lifesteal%",
            Stat::SpellVamp => "Spellvamp%",
            Stat::Omnivamp => "Omnivamp%",
            Stat::Tenacity => "Tenacity%",
            Stat::ArmorPenetration => "ArmorPen%",
            Stat::MagicPenetration => "MagicPen%",
            Stat::HealingBonus => "Healing%",
            Stat::ShieldStrength => "Shield%",
        }
    }
}

/// How a modifier changes a stat.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Change {
    /// Relative to the stat's value at the moment of application.
    Percent(f64),
    /// Absolute amount.
    Flat(f64),
}

/// A single stat change, as listed in the status delta table or on equipment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: Stat,
    pub change: Change,
}

impl StatModifier {
    #[must_use]
    pub const fn percent(stat: Stat, percent: f64) -> Self {
        Self {
            stat,
            change: Change::Percent(percent),
        }
    }

    #[must_use]
    pub const fn flat(stat: Stat, amount: f64) -> Self {
        Self {
            stat,
            change: Change::Flat(amount),
        }
    }

    /// Concrete amount this modifier adds given the stat's current value.
    ///
    /// Integer stats get whole amounts so that subtracting the same amount
    /// later restores the stat exactly.
    #[must_use]
    pub fn resolve(&self, current: f64) -> f64 {
        let raw = match self.change {
            Change::Percent(p) => current * p / 100.0,
            Change::Flat(amount) => amount,
        };
        if self.stat.is_integer() {
            raw.round()
        } else {
            raw
        }
    }
}

/// A change that was actually applied to a stat block.
///
/// `before` and `after` are the stat's values around the change. Reversal
/// restores `before` while the stat still reads `after`, and otherwise
/// subtracts `amount`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedChange {
    pub stat: Stat,
    pub amount: f64,
    pub before: f64,
    pub after: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_stats() {
        assert!(Stat::Speed.is_integer());
        assert!(Stat::MaxHealth.is_integer());
        assert!(!Stat::CriticalChance.is_integer());
        assert!(!Stat::ShieldStrength.is_integer());
    }

    #[test]
    fn test_resolve_percent_rounds_integer_stats() {
        let halve = StatModifier::percent(Stat::Speed, -50.0);
        assert_eq!(halve.resolve(40.0), -20.0);
        assert_eq!(halve.resolve(7.0), -4.0);

        let crit = StatModifier::percent(Stat::CriticalChance, 50.0);
        assert_eq!(crit.resolve(5.0), 2.5);
    }

    #[test]
    fn test_resolve_flat() {
        let m = StatModifier::flat(Stat::CriticalChance, 20.0);
        assert_eq!(m.resolve(3.0), 20.0);
    }
}
