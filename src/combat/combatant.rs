//! Combatants and their abilities.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ElementType, RandomSource};
use crate::damage::DamageKind;
use crate::equipment::Equipment;
use crate::stats::{StatBlock, ABILITY_SLOTS};
use crate::status::StatusEffectKind;

/// A status effect an ability may inflict on hit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusInfliction {
    pub effect: StatusEffectKind,
    pub duration: u32,
    /// Probability in `[0, 1]`.
    pub chance: f64,
}

/// A learned ability. Its index in the combatant's list is its cooldown slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub power: u32,
    pub kind: DamageKind,
    /// Turns the slot stays locked after use.
    pub cooldown: u32,
    pub inflicts: Option<StatusInfliction>,
}

impl Ability {
    #[must_use]
    pub fn new(name: impl Into<String>, power: u32, kind: DamageKind) -> Self {
        Self {
            name: name.into(),
            power,
            kind,
            cooldown: 0,
            inflicts: None,
        }
    }

    #[must_use]
    pub fn with_cooldown(mut self, turns: u32) -> Self {
        self.cooldown = turns;
        self
    }

    #[must_use]
    pub fn with_inflicts(mut self, effect: StatusEffectKind, duration: u32, chance: f64) -> Self {
        self.inflicts = Some(StatusInfliction {
            effect,
            duration,
            chance,
        });
        self
    }
}

/// Who is fighting for the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub level: u32,
}

impl PlayerProfile {
    #[must_use]
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

/// A creature on either side of a fight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub level: u32,
    pub element: ElementType,
    pub stats: StatBlock,
    pub abilities: SmallVec<[Ability; ABILITY_SLOTS]>,
    pub equipment: SmallVec<[Equipment; 4]>,
}

impl Combatant {
    #[must_use]
    pub fn new(name: impl Into<String>, level: u32, element: ElementType, stats: StatBlock) -> Self {
        Self {
            name: name.into(),
            level,
            element,
            stats,
            abilities: SmallVec::new(),
            equipment: SmallVec::new(),
        }
    }

    /// Builder form of [`learn`](Self::learn). A fifth ability is dropped.
    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.learn(ability);
        self
    }

    /// Builder form of [`equip`](Self::equip).
    #[must_use]
    pub fn with_equipment(mut self, item: Equipment) -> Self {
        self.equip(item);
        self
    }

    /// Learn an ability into the next free slot. Returns false when full.
    pub fn learn(&mut self, ability: Ability) -> bool {
        if self.abilities.len() >= ABILITY_SLOTS {
            return false;
        }
        self.abilities.push(ability);
        true
    }

    /// Equip an item, replacing and returning whatever held its slot.
    pub fn equip(&mut self, item: Equipment) -> Option<Equipment> {
        let previous = self
            .equipment
            .iter()
            .position(|e| e.slot == item.slot)
            .map(|i| self.equipment.remove(i));
        if let Some(old) = &previous {
            old.remove_from(&mut self.stats);
        }
        item.apply_to(&mut self.stats);
        self.equipment.push(item);
        previous
    }

    /// Unequip by index, taking its bonuses back off.
    pub fn unequip(&mut self, index: usize) -> Option<Equipment> {
        if index >= self.equipment.len() {
            return None;
        }
        let item = self.equipment.remove(index);
        item.remove_from(&mut self.stats);
        Some(item)
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.stats.is_defeated()
    }

    /// Slots whose ability is off cooldown.
    #[must_use]
    pub fn ready_abilities(&self) -> SmallVec<[usize; ABILITY_SLOTS]> {
        (0..self.abilities.len())
            .filter(|&slot| self.stats.is_skill_ready(slot))
            .collect()
    }

    /// Pick an ability slot uniformly at random.
    ///
    /// With `respect_cooldowns` only ready slots are candidates. `None`
    /// means fall back to a basic attack.
    pub fn choose_ability(&self, respect_cooldowns: bool, rng: &mut impl RandomSource) -> Option<usize> {
        let candidates: SmallVec<[usize; ABILITY_SLOTS]> = if respect_cooldowns {
            self.ready_abilities()
        } else {
            (0..self.abilities.len()).collect()
        };
        rng.index(candidates.len()).map(|i| candidates[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedRng;
    use crate::equipment::{forge, EquipmentSlot, Rarity};

    fn creature() -> Combatant {
        Combatant::new("Sparkit", 5, ElementType::Electric, StatBlock::new(60))
            .with_ability(Ability::new("Zap", 40, DamageKind::Magical).with_cooldown(2))
            .with_ability(Ability::new("Tackle", 30, DamageKind::Physical))
    }

    #[test]
    fn test_learn_caps_at_four() {
        let mut c = creature();
        assert!(c.learn(Ability::new("A", 10, DamageKind::Physical)));
        assert!(c.learn(Ability::new("B", 10, DamageKind::Physical)));
        assert!(!c.learn(Ability::new("C", 10, DamageKind::Physical)));
        assert_eq!(c.abilities.len(), ABILITY_SLOTS);
    }

    #[test]
    fn test_ready_abilities_skip_cooldowns() {
        let mut c = creature();
        c.stats.set_cooldown(0, 2);
        assert_eq!(c.ready_abilities().as_slice(), &[1]);
    }

    #[test]
    fn test_choose_ability() {
        let mut c = creature();
        c.stats.set_cooldown(0, 1);
        let mut rng = ScriptedRng::constant(0.0);
        assert_eq!(c.choose_ability(true, &mut rng), Some(1));
        assert_eq!(c.choose_ability(false, &mut rng), Some(0));

        c.stats.set_cooldown(1, 1);
        assert_eq!(c.choose_ability(true, &mut rng), None);
    }

    #[test]
    fn test_choose_ability_without_abilities() {
        let c = Combatant::new("Blob", 1, ElementType::Normal, StatBlock::new(10));
        let mut rng = ScriptedRng::constant(0.3);
        assert_eq!(c.choose_ability(false, &mut rng), None);
    }

    #[test]
    fn test_equip_replaces_same_slot() {
        let mut c = creature();
        let base_attack = c.stats.physical_attack;

        let first = forge(5, Rarity::Common, EquipmentSlot::Weapon, ElementType::Fire);
        let second = forge(5, Rarity::Uncommon, EquipmentSlot::Weapon, ElementType::Fire);
        assert!(c.equip(first.clone()).is_none());
        assert_eq!(c.stats.physical_attack, base_attack + 4);

        assert_eq!(c.equip(second), Some(first));
        assert_eq!(c.equipment.len(), 1);
        assert_eq!(c.stats.physical_attack, base_attack + 6);

        c.unequip(0);
        assert_eq!(c.stats.physical_attack, base_attack);
        assert!(c.unequip(0).is_none());
    }
}
