//! Per-combatant mutable resource state.
//!
//! ## Shields
//!
//! Damage is absorbed in a fixed order per channel:
//!
//! | channel  | order                                   |
//! |----------|-----------------------------------------|
//! | untyped  | adaptive → health                        |
//! | physical | physical → adaptive → health             |
//! | magical  | magical → adaptive → health              |
//! | true     | health                                   |
//!
//! ## Status effects
//!
//! Only the remaining duration is stored per kind, alongside the concrete
//! amounts that were added when the effect first activated. Refreshing an
//! active effect never touches stats; removal subtracts exactly what was
//! added.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::stat::{AppliedChange, Stat};
use crate::core::Result;
use crate::damage::DamageKind;
use crate::status::{delta, StatusEffectKind};

/// Number of ability slots, and therefore cooldown slots.
pub const ABILITY_SLOTS: usize = 4;

/// How a hit was split between shields and health.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    /// Amount soaked by shields.
    pub absorbed: u32,
    /// Amount removed from health.
    pub dealt: u32,
}

impl DamageReport {
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.absorbed + self.dealt
    }
}

/// Bookkeeping for one active status effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveStatus {
    /// Turns left. Always > 0 while stored.
    pub remaining: u32,
    /// What activation added to the stats. Empty for behavioral kinds.
    pub applied: SmallVec<[AppliedChange; 4]>,
}

/// Health, stats, shields, cooldowns and status effects of one combatant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    pub max_health: u32,
    current_health: u32,

    pub physical_attack: i32,
    pub magical_attack: i32,
    pub physical_defense: i32,
    pub magical_defense: i32,
    pub speed: i32,
    pub accuracy: i32,
    pub evasion: i32,

    pub critical_chance: f32,
    pub critical_damage: f32,
    pub life_steal: f32,
    pub spell_vamp: f32,
    pub omnivamp: f32,
    pub tenacity: f32,
    pub armor_penetration: f32,
    pub magic_penetration: f32,
    pub healing_bonus: f32,
    pub shield_strength: f32,

    physical_shield: u32,
    magical_shield: u32,
    adaptive_shield: u32,

    cooldowns: [u32; ABILITY_SLOTS],

    #[serde(default)]
    status_effects: FxHashMap<StatusEffectKind, ActiveStatus>,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            max_health: 100,
            current_health: 100,
            physical_attack: 10,
            magical_attack: 10,
            physical_defense: 10,
            magical_defense: 10,
            speed: 10,
            accuracy: 100,
            evasion: 0,
            critical_chance: 0.0,
            critical_damage: 50.0,
            life_steal: 0.0,
            spell_vamp: 0.0,
            omnivamp: 0.0,
            tenacity: 0.0,
            armor_penetration: 0.0,
            magic_penetration: 0.0,
            healing_bonus: 0.0,
            shield_strength: 0.0,
            physical_shield: 0,
            magical_shield: 0,
            adaptive_shield: 0,
            cooldowns: [0; ABILITY_SLOTS],
            status_effects: FxHashMap::default(),
        }
    }
}

impl StatBlock {
    /// Create a stat block at full health with default stats.
    #[must_use]
    pub fn new(max_health: u32) -> Self {
        Self::default().with_health(max_health)
    }

    /// Set max health and fill current health to it.
    #[must_use]
    pub fn with_health(mut self, max_health: u32) -> Self {
        self.max_health = max_health;
        self.current_health = max_health;
        self
    }

    #[must_use]
    pub fn with_attack(mut self, physical: i32, magical: i32) -> Self {
        self.physical_attack = physical;
        self.magical_attack = magical;
        self
    }

    #[must_use]
    pub fn with_defense(mut self, physical: i32, magical: i32) -> Self {
        self.physical_defense = physical;
        self.magical_defense = magical;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_accuracy(mut self, accuracy: i32, evasion: i32) -> Self {
        self.accuracy = accuracy;
        self.evasion = evasion;
        self
    }

    /// Set any stat directly. Setting max health also refills health.
    #[must_use]
    pub fn with_stat(mut self, stat: Stat, value: f64) -> Self {
        self.set_stat(stat, value);
        if stat == Stat::MaxHealth {
            self.current_health = self.max_health;
        }
        self
    }

    // === Health ===

    #[must_use]
    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    /// Set current health, clamped to `[0, max_health]`.
    pub fn set_current_health(&mut self, value: u32) {
        self.current_health = value.min(self.max_health);
    }

    /// Fraction of health remaining in `[0, 1]`.
    #[must_use]
    pub fn health_fraction(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        f64::from(self.current_health) / f64::from(self.max_health)
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.current_health == 0
    }

    /// Restore health scaled by the healing bonus. Returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let scaled = (f64::from(amount) * (1.0 + f64::from(self.healing_bonus) / 100.0))
            .floor()
            .max(0.0) as u64;
        let before = self.current_health;
        let healed = (u64::from(before) + scaled).min(u64::from(self.max_health)) as u32;
        self.current_health = healed.max(before.min(self.max_health));
        let restored = self.current_health.saturating_sub(before);
        trace!(amount, restored, health = self.current_health, "heal");
        restored
    }

    /// Refill health to max.
    pub fn restore_full(&mut self) {
        self.current_health = self.max_health;
    }

    // === Damage ===

    /// Untyped damage: adaptive shield, then health.
    pub fn take_damage(&mut self, amount: u32) -> DamageReport {
        let mut report = DamageReport::default();
        let rest = Self::drain(&mut self.adaptive_shield, amount, &mut report);
        self.drain_health(rest, &mut report);
        trace!(amount, ?report, "take_damage");
        report
    }

    /// Physical damage: physical shield, adaptive shield, then health.
    pub fn take_physical_damage(&mut self, amount: u32) -> DamageReport {
        let mut report = DamageReport::default();
        let rest = Self::drain(&mut self.physical_shield, amount, &mut report);
        let rest = Self::drain(&mut self.adaptive_shield, rest, &mut report);
        self.drain_health(rest, &mut report);
        trace!(amount, ?report, "take_physical_damage");
        report
    }

    /// Magical damage: magical shield, adaptive shield, then health.
    pub fn take_magical_damage(&mut self, amount: u32) -> DamageReport {
        let mut report = DamageReport::default();
        let rest = Self::drain(&mut self.magical_shield, amount, &mut report);
        let rest = Self::drain(&mut self.adaptive_shield, rest, &mut report);
        self.drain_health(rest, &mut report);
        trace!(amount, ?report, "take_magical_damage");
        report
    }

    /// True damage: straight to health.
    pub fn take_true_damage(&mut self, amount: u32) -> DamageReport {
        let mut report = DamageReport::default();
        self.drain_health(amount, &mut report);
        trace!(amount, ?report, "take_true_damage");
        report
    }

    /// Route damage through the channel matching `kind`.
    pub fn take_damage_of(&mut self, kind: DamageKind, amount: u32) -> DamageReport {
        match kind {
            DamageKind::Physical => self.take_physical_damage(amount),
            DamageKind::Magical => self.take_magical_damage(amount),
            DamageKind::True => self.take_true_damage(amount),
        }
    }

    fn drain(pool: &mut u32, amount: u32, report: &mut DamageReport) -> u32 {
        let soaked = amount.min(*pool);
        *pool -= soaked;
        report.absorbed += soaked;
        amount - soaked
    }

    fn drain_health(&mut self, amount: u32, report: &mut DamageReport) {
        let dealt = amount.min(self.current_health);
        self.current_health -= dealt;
        report.dealt += dealt;
    }

    // === Shields ===

    #[must_use]
    pub fn physical_shield(&self) -> u32 {
        self.physical_shield
    }

    #[must_use]
    pub fn magical_shield(&self) -> u32 {
        self.magical_shield
    }

    #[must_use]
    pub fn adaptive_shield(&self) -> u32 {
        self.adaptive_shield
    }

    #[must_use]
    pub fn total_shield(&self) -> u32 {
        self.physical_shield
            .saturating_add(self.magical_shield)
            .saturating_add(self.adaptive_shield)
    }

    /// Add a physical shield scaled by shield strength. Returns the amount added.
    pub fn add_physical_shield(&mut self, amount: u32) -> u32 {
        let added = self.scaled_shield(amount);
        self.physical_shield = self.physical_shield.saturating_add(added);
        added
    }

    /// Add a magical shield scaled by shield strength. Returns the amount added.
    pub fn add_magical_shield(&mut self, amount: u32) -> u32 {
        let added = self.scaled_shield(amount);
        self.magical_shield = self.magical_shield.saturating_add(added);
        added
    }

    /// Add an adaptive shield scaled by shield strength. Returns the amount added.
    pub fn add_adaptive_shield(&mut self, amount: u32) -> u32 {
        let added = self.scaled_shield(amount);
        self.adaptive_shield = self.adaptive_shield.saturating_add(added);
        added
    }

    /// Drop every shield.
    pub fn clear_shields(&mut self) {
        self.physical_shield = 0;
        self.magical_shield = 0;
        self.adaptive_shield = 0;
    }

    fn scaled_shield(&self, amount: u32) -> u32 {
        let scaled = f64::from(amount) * (1.0 + f64::from(self.shield_strength) / 100.0);
        scaled.floor().clamp(0.0, f64::from(u32::MAX)) as u32
    }

    // === Cooldowns ===

    /// Set a slot's cooldown. Out-of-range slots are ignored (returns false).
    pub fn set_cooldown(&mut self, slot: usize, turns: u32) -> bool {
        match self.cooldowns.get_mut(slot) {
            Some(cd) => {
                *cd = turns;
                true
            }
            None => false,
        }
    }

    /// Remaining cooldown for a slot; 0 for out-of-range slots.
    #[must_use]
    pub fn cooldown(&self, slot: usize) -> u32 {
        self.cooldowns.get(slot).copied().unwrap_or(0)
    }

    /// Whether a slot exists and is off cooldown.
    #[must_use]
    pub fn is_skill_ready(&self, slot: usize) -> bool {
        self.cooldowns.get(slot).is_some_and(|&cd| cd == 0)
    }

    #[must_use]
    pub fn cooldowns(&self) -> [u32; ABILITY_SLOTS] {
        self.cooldowns
    }

    /// Tick every cooldown down by one, flooring at zero.
    pub fn update_cooldowns(&mut self) {
        for cd in &mut self.cooldowns {
            *cd = cd.saturating_sub(1);
        }
    }

    pub fn reset_cooldowns(&mut self) {
        self.cooldowns = [0; ABILITY_SLOTS];
    }

    // === Status effects ===

    /// Add or refresh a status effect.
    ///
    /// - Active: duration becomes `max(existing, duration)`; stats untouched.
    /// - Inactive: duration becomes `min(duration, max_duration)` and the
    ///   kind's delta is applied once.
    ///
    /// A zero duration on an inactive kind is rejected (returns false).
    pub fn add_status_effect(&mut self, kind: StatusEffectKind, duration: u32) -> bool {
        if let Some(active) = self.status_effects.get_mut(&kind) {
            active.remaining = active.remaining.max(duration);
            trace!(%kind, remaining = active.remaining, "status refreshed");
            return true;
        }

        let remaining = duration.min(kind.max_duration());
        if remaining == 0 {
            return false;
        }

        let applied = delta::apply(kind, self);
        trace!(%kind, remaining, "status applied");
        self.status_effects.insert(kind, ActiveStatus { remaining, applied });
        true
    }

    /// Remove a status effect, reversing its delta. Returns false if inactive.
    pub fn remove_status_effect(&mut self, kind: StatusEffectKind) -> bool {
        match self.status_effects.remove(&kind) {
            Some(active) => {
                delta::reverse(&active.applied, self);
                trace!(%kind, "status removed");
                true
            }
            None => false,
        }
    }

    /// Tick every status effect down by one turn.
    ///
    /// Effects reaching zero have their delta reversed and are removed.
    /// Returns the expired kinds in catalog order.
    pub fn update_status_effects(&mut self) -> SmallVec<[StatusEffectKind; 4]> {
        let mut expired: SmallVec<[StatusEffectKind; 4]> = SmallVec::new();
        for (kind, active) in self.status_effects.iter_mut() {
            active.remaining = active.remaining.saturating_sub(1);
            if active.remaining == 0 {
                expired.push(*kind);
            }
        }
        expired.sort();
        for kind in &expired {
            self.remove_status_effect(*kind);
        }
        expired
    }

    #[must_use]
    pub fn has_status_effect(&self, kind: StatusEffectKind) -> bool {
        self.status_effects.contains_key(&kind)
    }

    /// Remaining turns for a kind; 0 if inactive.
    #[must_use]
    pub fn status_duration(&self, kind: StatusEffectKind) -> u32 {
        self.status_effects.get(&kind).map_or(0, |a| a.remaining)
    }

    /// Active effects with remaining turns, in catalog order.
    #[must_use]
    pub fn active_status_effects(&self) -> SmallVec<[(StatusEffectKind, u32); 4]> {
        let mut active: SmallVec<[(StatusEffectKind, u32); 4]> = self
            .status_effects
            .iter()
            .map(|(kind, a)| (*kind, a.remaining))
            .collect();
        active.sort();
        active
    }

    /// Remove every status effect, reversing all deltas.
    pub fn clear_status_effects(&mut self) {
        let mut kinds: SmallVec<[StatusEffectKind; 4]> = self.status_effects.keys().copied().collect();
        kinds.sort();
        for kind in kinds {
            self.remove_status_effect(kind);
        }
    }

    /// Reset session-scoped state when the creature leaves the field.
    pub fn reset_for_swap(&mut self) {
        self.clear_status_effects();
        self.clear_shields();
        self.reset_cooldowns();
    }

    // === Generic stat access ===

    /// Read a stat as a float.
    #[must_use]
    pub fn stat(&self, stat: Stat) -> f64 {
        match stat {
            Stat::MaxHealth => f64::from(self.max_health),
            Stat::PhysicalAttack => f64::from(self.physical_attack),
            Stat::MagicalAttack => f64::from(self.magical_attack),
            Stat::PhysicalDefense => f64::from(self.physical_defense),
            Stat::MagicalDefense => f64::from(self.magical_defense),
            Stat::Speed => f64::from(self.speed),
            Stat::Accuracy => f64::from(self.accuracy),
            Stat::Evasion => f64::from(self.evasion),
            Stat::CriticalChance => f64::from(self.critical_chance),
            Stat::CriticalDamage => f64::from(self.critical_damage),
            Stat::LifeSteal => f64::from(self.life_steal),
            Stat::SpellVamp => f64::from(self.spell_vamp),
            Stat::Omnivamp => f64::from(self.omnivamp),
            Stat::Tenacity => f64::from(self.tenacity),
            Stat::ArmorPenetration => f64::from(self.armor_penetration),
            Stat::MagicPenetration => f64::from(self.magic_penetration),
            Stat::HealingBonus => f64::from(self.healing_bonus),
            Stat::ShieldStrength => f64::from(self.shield_strength),
        }
    }

    /// Add `delta` to a stat. Integer stats take the rounded delta.
    ///
    /// Lowering max health clamps current health to the new max.
    pub fn adjust(&mut self, stat: Stat, delta: f64) {
        let whole = delta.round() as i64;
        let float = delta as f32;
        match stat {
            Stat::MaxHealth => {
                let max = (i64::from(self.max_health) + whole).clamp(0, i64::from(u32::MAX));
                self.max_health = max as u32;
                self.current_health = self.current_health.min(self.max_health);
            }
            Stat::PhysicalAttack => self.physical_attack = add_i32(self.physical_attack, whole),
            Stat::MagicalAttack => self.magical_attack = add_i32(self.magical_attack, whole),
            Stat::PhysicalDefense => self.physical_defense = add_i32(self.physical_defense, whole),
            Stat::MagicalDefense => self.magical_defense = add_i32(self.magical_defense, whole),
            Stat::Speed => self.speed = add_i32(self.speed, whole),
            Stat::Accuracy => self.accuracy = add_i32(self.accuracy, whole),
            Stat::Evasion => self.evasion = add_i32(self.evasion, whole),
            Stat::CriticalChance => self.critical_chance += float,
            Stat::CriticalDamage => self.critical_damage += float,
            Stat::LifeSteal => self.life_steal += float,
            Stat::SpellVamp => self.spell_vamp += float,
            Stat::Omnivamp => self.omnivamp += float,
            Stat::Tenacity => self.tenacity += float,
            Stat::ArmorPenetration => self.armor_penetration += float,
            Stat::MagicPenetration => self.magic_penetration += float,
            Stat::HealingBonus => self.healing_bonus += float,
            Stat::ShieldStrength => self.shield_strength += float,
        }
    }

    /// Overwrite a stat. Integer stats take the rounded value.
    ///
    /// Lowering max health clamps current health to the new max.
    pub fn set_stat(&mut self, stat: Stat, value: f64) {
        let whole = value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32;
        let float = value as f32;
        match stat {
            Stat::MaxHealth => {
                self.max_health = value.round().clamp(0.0, f64::from(u32::MAX)) as u32;
                self.current_health = self.current_health.min(self.max_health);
            }
            Stat::PhysicalAttack => self.physical_attack = whole,
            Stat::MagicalAttack => self.magical_attack = whole,
            Stat::PhysicalDefense => self.physical_defense = whole,
            Stat::MagicalDefense => self.magical_defense = whole,
            Stat::Speed => self.speed = whole,
            Stat::Accuracy => self.accuracy = whole,
            Stat::Evasion => self.evasion = whole,
            Stat::CriticalChance => self.critical_chance = float,
            Stat::CriticalDamage => self.critical_damage = float,
            Stat::LifeSteal => self.life_steal = float,
            Stat::SpellVamp => self.spell_vamp = float,
            Stat::Omnivamp => self.omnivamp = float,
            Stat::Tenacity => self.tenacity = float,
            Stat::ArmorPenetration => self.armor_penetration = float,
            Stat::MagicPenetration => self.magic_penetration = float,
            Stat::HealingBonus => self.healing_bonus = float,
            Stat::ShieldStrength => self.shield_strength = float,
        }
    }

    /// Attack stat read by a damage channel.
    #[must_use]
    pub fn attack_for(&self, kind: DamageKind) -> i32 {
        match kind {
            DamageKind::Physical | DamageKind::True => self.physical_attack,
            DamageKind::Magical => self.magical_attack,
        }
    }

    /// Defense stat read by a damage channel.
    #[must_use]
    pub fn defense_for(&self, kind: DamageKind) -> i32 {
        match kind {
            DamageKind::Physical | DamageKind::True => self.physical_defense,
            DamageKind::Magical => self.magical_defense,
        }
    }

    /// Penetration applied against the defender's defense.
    #[must_use]
    pub fn penetration_for(&self, kind: DamageKind) -> f32 {
        match kind {
            DamageKind::Physical => self.armor_penetration,
            DamageKind::Magical => self.magic_penetration,
            DamageKind::True => 0.0,
        }
    }

    /// Percentage of dealt damage healed back for a channel.
    #[must_use]
    pub fn vamp_for(&self, kind: DamageKind) -> f32 {
        let channel = match kind {
            DamageKind::Physical => self.life_steal,
            DamageKind::Magical => self.spell_vamp,
            DamageKind::True => 0.0,
        };
        (channel + self.omnivamp).max(0.0)
    }

    // === Persistence ===

    /// Encode for the external save subsystem.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by [`encode`](Self::encode).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

fn add_i32(value: i32, delta: i64) -> i32 {
    (i64::from(value) + delta).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CombatError;

    fn block() -> StatBlock {
        StatBlock::new(100)
            .with_attack(40, 30)
            .with_defense(20, 25)
            .with_speed(30)
    }

    #[test]
    fn test_new_is_full_health() {
        let stats = StatBlock::new(80);
        assert_eq!(stats.current_health(), 80);
        assert_eq!(stats.max_health, 80);
        assert!(!stats.is_defeated());
        assert_eq!(stats.health_fraction(), 1.0);
    }

    #[test]
    fn test_take_damage_uses_adaptive_then_health() {
        let mut stats = block();
        stats.add_adaptive_shield(15);
        let report = stats.take_damage(20);
        assert_eq!(report, DamageReport { absorbed: 15, dealt: 5 });
        assert_eq!(stats.adaptive_shield(), 0);
        assert_eq!(stats.current_health(), 95);
    }

    #[test]
    fn test_take_damage_ignores_typed_shields() {
        let mut stats = block();
        stats.add_physical_shield(50);
        stats.add_magical_shield(50);
        stats.take_damage(10);
        assert_eq!(stats.current_health(), 90);
        assert_eq!(stats.physical_shield(), 50);
        assert_eq!(stats.magical_shield(), 50);
    }

    #[test]
    fn test_physical_shield_order() {
        let mut stats = block();
        stats.add_physical_shield(10);
        stats.add_magical_shield(10);
        stats.add_adaptive_shield(10);

        let report = stats.take_physical_damage(25);
        assert_eq!(report, DamageReport { absorbed: 20, dealt: 5 });
        assert_eq!(stats.physical_shield(), 0);
        assert_eq!(stats.adaptive_shield(), 0);
        assert_eq!(stats.magical_shield(), 10);
        assert_eq!(stats.current_health(), 95);
    }

    #[test]
    fn test_magical_shield_order() {
        let mut stats = block();
        stats.add_physical_shield(10);
        stats.add_magical_shield(10);
        stats.add_adaptive_shield(10);

        stats.take_magical_damage(15);
        assert_eq!(stats.magical_shield(), 0);
        assert_eq!(stats.adaptive_shield(), 5);
        assert_eq!(stats.physical_shield(), 10);
        assert_eq!(stats.current_health(), 100);
    }

    #[test]
    fn test_true_damage_bypasses_shields() {
        let mut stats = block();
        stats.add_adaptive_shield(50);
        stats.add_physical_shield(50);
        let report = stats.take_true_damage(30);
        assert_eq!(report, DamageReport { absorbed: 0, dealt: 30 });
        assert_eq!(stats.total_shield(), 100);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut stats = block();
        let report = stats.take_true_damage(500);
        assert_eq!(report.dealt, 100);
        assert_eq!(stats.current_health(), 0);
        assert!(stats.is_defeated());
    }

    #[test]
    fn test_heal_with_bonus_caps_at_max() {
        let mut stats = block();
        stats.take_true_damage(50);
        stats.healing_bonus = 50.0;
        assert_eq!(stats.heal(20), 30);
        assert_eq!(stats.current_health(), 80);
        assert_eq!(stats.heal(100), 20);
        assert_eq!(stats.current_health(), 100);
    }

    #[test]
    fn test_shield_strength_scales() {
        let mut stats = block();
        stats.shield_strength = 25.0;
        assert_eq!(stats.add_adaptive_shield(40), 50);
        assert_eq!(stats.adaptive_shield(), 50);
    }

    #[test]
    fn test_negative_shield_strength_never_negative() {
        let mut stats = block();
        stats.shield_strength = -300.0;
        assert_eq!(stats.add_physical_shield(40), 0);
        assert_eq!(stats.physical_shield(), 0);
    }

    #[test]
    fn test_cooldowns() {
        let mut stats = block();
        assert!(stats.set_cooldown(1, 2));
        assert!(!stats.set_cooldown(ABILITY_SLOTS, 2));
        assert_eq!(stats.cooldown(1), 2);
        assert_eq!(stats.cooldown(99), 0);
        assert!(!stats.is_skill_ready(1));
        assert!(stats.is_skill_ready(0));
        assert!(!stats.is_skill_ready(99));

        stats.update_cooldowns();
        assert_eq!(stats.cooldown(1), 1);
        stats.update_cooldowns();
        stats.update_cooldowns();
        assert_eq!(stats.cooldown(1), 0);
        assert!(stats.is_skill_ready(1));
    }

    #[test]
    fn test_add_status_caps_at_max_duration() {
        let mut stats = block();
        assert!(stats.add_status_effect(StatusEffectKind::Slowed, 10));
        assert_eq!(stats.status_duration(StatusEffectKind::Slowed), 3);
        assert_eq!(stats.speed, 15);
    }

    #[test]
    fn test_refresh_takes_max_without_reapplying() {
        let mut stats = block();
        stats.add_status_effect(StatusEffectKind::Slowed, 1);
        assert_eq!(stats.speed, 15);

        stats.add_status_effect(StatusEffectKind::Slowed, 3);
        assert_eq!(stats.status_duration(StatusEffectKind::Slowed), 3);
        assert_eq!(stats.speed, 15);

        stats.add_status_effect(StatusEffectKind::Slowed, 1);
        assert_eq!(stats.status_duration(StatusEffectKind::Slowed), 3);
        assert_eq!(stats.speed, 15);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut stats = block();
        assert!(!stats.add_status_effect(StatusEffectKind::Blinded, 0));
        assert!(!stats.has_status_effect(StatusEffectKind::Blinded));
        assert_eq!(stats.accuracy, 100);
    }

    #[test]
    fn test_update_expires_and_reverses() {
        let mut stats = block();
        stats.add_status_effect(StatusEffectKind::Blinded, 2);
        assert_eq!(stats.accuracy, 70);

        assert!(stats.update_status_effects().is_empty());
        assert_eq!(stats.accuracy, 70);

        let expired = stats.update_status_effects();
        assert_eq!(expired.as_slice(), &[StatusEffectKind::Blinded]);
        assert_eq!(stats.accuracy, 100);
        assert!(!stats.has_status_effect(StatusEffectKind::Blinded));
    }

    #[test]
    fn test_remove_inactive_is_noop() {
        let mut stats = block();
        let before = stats.clone();
        assert!(!stats.remove_status_effect(StatusEffectKind::Enraged));
        assert_eq!(stats, before);
    }

    #[test]
    fn test_reversal_exact_after_base_change() {
        let mut stats = block();
        stats.add_status_effect(StatusEffectKind::Enraged, 2);
        assert_eq!(stats.physical_attack, 52);
        stats.physical_attack += 10; // equipment equipped mid-effect
        stats.remove_status_effect(StatusEffectKind::Enraged);
        assert_eq!(stats.physical_attack, 50);
    }

    #[test]
    fn test_reset_for_swap() {
        let mut stats = block();
        stats.add_status_effect(StatusEffectKind::Hastened, 3);
        stats.add_adaptive_shield(10);
        stats.set_cooldown(0, 3);
        stats.take_true_damage(10);

        stats.reset_for_swap();
        assert_eq!(stats.speed, 30);
        assert_eq!(stats.total_shield(), 0);
        assert_eq!(stats.cooldowns(), [0; ABILITY_SLOTS]);
        // Damage persists.
        assert_eq!(stats.current_health(), 90);
    }

    #[test]
    fn test_lowering_max_health_clamps_current() {
        let mut stats = block();
        stats.adjust(Stat::MaxHealth, -40.0);
        assert_eq!(stats.max_health, 60);
        assert_eq!(stats.current_health(), 60);
    }

    #[test]
    fn test_with_stat() {
        let stats = StatBlock::default()
            .with_stat(Stat::MaxHealth, 250.0)
            .with_stat(Stat::LifeSteal, 12.0);
        assert_eq!(stats.max_health, 250);
        assert_eq!(stats.current_health(), 250);
        assert_eq!(stats.life_steal, 12.0);
    }

    #[test]
    fn test_vamp_for() {
        let mut stats = block();
        stats.life_steal = 10.0;
        stats.spell_vamp = 5.0;
        stats.omnivamp = 2.0;
        assert_eq!(stats.vamp_for(DamageKind::Physical), 12.0);
        assert_eq!(stats.vamp_for(DamageKind::Magical), 7.0);
        assert_eq!(stats.vamp_for(DamageKind::True), 2.0);
    }

    #[test]
    fn test_codec_round_trip_keeps_status_bookkeeping() {
        let mut stats = block();
        stats.add_status_effect(StatusEffectKind::Weakened, 2);
        stats.set_cooldown(2, 1);

        let bytes = stats.encode().unwrap();
        let mut decoded = StatBlock::decode(&bytes).unwrap();
        assert_eq!(decoded, stats);

        decoded.remove_status_effect(StatusEffectKind::Weakened);
        assert_eq!(decoded.physical_attack, 40);
    }

    #[test]
    fn test_decode_garbage_is_codec_error() {
        let err = StatBlock::decode(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, CombatError::Codec(_)));
    }
}
