//! Damage formulas.
//!
//! The `*_damage` functions are pure: every random input is a parameter.
//! The `roll_*` variants draw that input from a [`RandomSource`].

use crate::core::RandomSource;

/// Spread of the ability random factor.
pub const ABILITY_FACTOR_RANGE: (f64, f64) = (0.85, 1.15);

/// Spread of the basic-attack random factor.
pub const BASIC_FACTOR_RANGE: (f64, f64) = (0.8, 1.2);

// Absorbs float noise so a factor of 0.9999999999 on 8 still floors to 8.
const FLOOR_EPSILON: f64 = 1e-9;

/// Ability damage.
///
/// `floor((level*0.4 + 2) * power * (attack/defense) / 50 + 2) * random_factor`,
/// floored, minimum 1. A defense of zero or less counts as 1.
///
/// ```
/// use creature_combat::damage::ability_damage;
///
/// assert_eq!(ability_damage(10, 50, 50, 50, 1.0), 8);
/// ```
#[must_use]
pub fn ability_damage(level: u32, power: u32, attack: i32, defense: i32, random_factor: f64) -> u32 {
    let defense = f64::from(defense.max(1));
    let attack = f64::from(attack.max(0));
    let base = ((f64::from(level) * 0.4 + 2.0) * f64::from(power) * (attack / defense) / 50.0 + 2.0).floor();
    let damage = (base * random_factor + FLOOR_EPSILON).floor();
    damage.max(1.0) as u32
}

/// Basic-attack damage: `max(1, round((attack - defense/2) * random_factor))`.
#[must_use]
pub fn basic_attack_damage(attack: i32, defense: i32, random_factor: f64) -> u32 {
    let raw = (f64::from(attack) - f64::from(defense) / 2.0) * random_factor;
    raw.round().max(1.0) as u32
}

/// Ability damage with a rolled factor in `[0.85, 1.15)`.
pub fn roll_ability_damage(
    level: u32,
    power: u32,
    attack: i32,
    defense: i32,
    rng: &mut impl RandomSource,
) -> u32 {
    let factor = rng.range_f64(ABILITY_FACTOR_RANGE.0, ABILITY_FACTOR_RANGE.1);
    ability_damage(level, power, attack, defense, factor)
}

/// Basic-attack damage with a rolled factor in `[0.8, 1.2)`.
pub fn roll_basic_attack_damage(attack: i32, defense: i32, rng: &mut impl RandomSource) -> u32 {
    let factor = rng.range_f64(BASIC_FACTOR_RANGE.0, BASIC_FACTOR_RANGE.1);
    basic_attack_damage(attack, defense, factor)
}

/// Defense after penetration: `defense * (1 - penetration/100)`, minimum 1.
#[must_use]
pub fn effective_defense(defense: i32, penetration: f32) -> i32 {
    let pen = f64::from(penetration).clamp(0.0, 100.0);
    let reduced = (f64::from(defense) * (1.0 - pen / 100.0)).round() as i32;
    reduced.max(1)
}

/// Hit chance: `clamp((accuracy - evasion) / 100, 0.05, 1.0)`.
#[must_use]
pub fn hit_chance(accuracy: i32, evasion: i32) -> f64 {
    ((f64::from(accuracy) - f64::from(evasion)) / 100.0).clamp(0.05, 1.0)
}

/// Critical multiplier: `1 + critical_damage/100`.
#[must_use]
pub fn critical_multiplier(critical_damage: f32) -> f64 {
    1.0 + f64::from(critical_damage.max(0.0)) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedRng;

    #[test]
    fn test_reference_ability_damage() {
        assert_eq!(ability_damage(10, 50, 50, 50, 1.0), 8);
        assert_eq!(ability_damage(10, 50, 50, 50, 0.85), 6);
        assert_eq!(ability_damage(10, 50, 50, 50, 1.15), 9);
    }

    #[test]
    fn test_ability_damage_minimum() {
        assert_eq!(ability_damage(1, 0, 0, 500, 0.85), 1);
    }

    #[test]
    fn test_zero_defense_counts_as_one() {
        assert_eq!(ability_damage(10, 50, 50, 0, 1.0), ability_damage(10, 50, 50, 1, 1.0));
    }

    #[test]
    fn test_basic_attack_damage() {
        // (30 - 10) * 1.0 = 20
        assert_eq!(basic_attack_damage(30, 20, 1.0), 20);
        // (30 - 10) * 0.8 = 16
        assert_eq!(basic_attack_damage(30, 20, 0.8), 16);
        // Attack below half defense still deals 1
        assert_eq!(basic_attack_damage(5, 40, 1.2), 1);
    }

    #[test]
    fn test_roll_uses_factor() {
        let mut rng = ScriptedRng::constant(ScriptedRng::sample_for(1.0, 0.85, 1.15));
        assert_eq!(roll_ability_damage(10, 50, 50, 50, &mut rng), 8);

        let mut rng = ScriptedRng::constant(0.0);
        assert_eq!(roll_basic_attack_damage(30, 20, &mut rng), 16);
    }

    #[test]
    fn test_effective_defense() {
        assert_eq!(effective_defense(50, 0.0), 50);
        assert_eq!(effective_defense(50, 40.0), 30);
        assert_eq!(effective_defense(50, 100.0), 1);
    }

    #[test]
    fn test_hit_chance() {
        assert_eq!(hit_chance(100, 0), 1.0);
        assert_eq!(hit_chance(70, 0), 0.7);
        assert_eq!(hit_chance(10, 90), 0.05);
    }

    /// Test that hit chance stays clamped at the ends of the `i32` range.
    #[test]
    fn test_hit_chance_extreme_stats() {
        assert_eq!(hit_chance(i32::MAX, i32::MIN), 1.0);
        assert_eq!(hit_chance(i32::MIN, i32::MAX), 0.05);
        assert_eq!(hit_chance(i32::MAX, 0), 1.0);
    }

    #[test]
    fn test_critical_multiplier() {
        assert_eq!(critical_multiplier(50.0), 1.5);
        assert_eq!(critical_multiplier(-10.0), 1.0);
    }
}
