//! Resolution of a single attack.
//!
//! Draw order per strike: hit roll (only when the hit chance is below 1),
//! damage factor, critical roll (only with a positive critical chance),
//! on-hit status roll, then one activation roll per equipped special.
//! A miss stops after the hit roll.

use smallvec::SmallVec;
use tracing::trace;

use super::combatant::{Ability, Combatant};
use crate::core::RandomSource;
use crate::damage::{
    critical_multiplier, effective_defense, hit_chance, roll_ability_damage, roll_basic_attack_damage,
    DamageKind,
};
use crate::equipment::SideEffect;
use crate::stats::{DamageReport, StatBlock};
use crate::status::StatusEffectKind;

/// What is being swung.
#[derive(Clone, Copy, Debug)]
pub enum Strike<'a> {
    Ability(&'a Ability),
    Basic,
}

impl Strike<'_> {
    fn kind(&self) -> DamageKind {
        match self {
            Strike::Ability(ability) => ability.kind,
            Strike::Basic => DamageKind::Physical,
        }
    }
}

/// Everything that happened during one strike.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrikeOutcome {
    pub hit: bool,
    pub critical: bool,
    pub report: DamageReport,
    pub healed: u32,
    pub inflicted: Option<StatusEffectKind>,
    /// Names of equipment specials that fired.
    pub specials: SmallVec<[String; 2]>,
}

/// Resolve `strike` from `attacker` against `defender`.
pub fn resolve_strike(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    strike: Strike<'_>,
    rng: &mut impl RandomSource,
) -> StrikeOutcome {
    let mut outcome = StrikeOutcome::default();
    let kind = strike.kind();

    let chance = hit_chance(attacker.stats.accuracy, defender.stats.evasion);
    if chance < 1.0 && !rng.chance(chance) {
        trace!(attacker = %attacker.name, chance, "strike missed");
        return outcome;
    }
    outcome.hit = true;

    let attack = attacker.stats.attack_for(kind);
    let defense = effective_defense(defender.stats.defense_for(kind), attacker.stats.penetration_for(kind));
    let mut damage = match strike {
        Strike::Ability(ability) => roll_ability_damage(attacker.level, ability.power, attack, defense, rng),
        Strike::Basic => roll_basic_attack_damage(attack, defense, rng),
    };

    let crit_chance = f64::from(attacker.stats.critical_chance) / 100.0;
    if crit_chance > 0.0 && rng.chance(crit_chance) {
        outcome.critical = true;
        damage = (f64::from(damage) * critical_multiplier(attacker.stats.critical_damage)).floor() as u32;
    }

    outcome.report = defender.stats.take_damage_of(kind, damage);

    if let Strike::Ability(Ability {
        inflicts: Some(infliction),
        ..
    }) = strike
    {
        if rng.chance(infliction.chance) && defender.stats.add_status_effect(infliction.effect, infliction.duration) {
            outcome.inflicted = Some(infliction.effect);
        }
    }

    for item in &attacker.equipment {
        let Some(special) = &item.special else {
            continue;
        };
        if !item.roll_activation(rng) {
            continue;
        }
        for effect in special.resolve(&attacker.stats, &defender.stats) {
            apply_side_effect(effect, &mut attacker.stats, &mut defender.stats);
        }
        outcome.specials.push(special.name.clone());
    }

    let vamp = f64::from(attacker.stats.vamp_for(kind));
    let drained = (f64::from(outcome.report.dealt) * vamp / 100.0).floor() as u32;
    if drained > 0 {
        outcome.healed = attacker.stats.heal(drained);
    }

    trace!(
        attacker = %attacker.name,
        defender = %defender.name,
        kind = kind.as_str(),
        damage,
        critical = outcome.critical,
        "strike resolved"
    );
    outcome
}

/// A confused combatant hitting itself with a basic attack. No crit, no vamp.
pub fn resolve_self_hit(combatant: &mut Combatant, rng: &mut impl RandomSource) -> DamageReport {
    let defense = combatant.stats.physical_defense;
    let damage = roll_basic_attack_damage(combatant.stats.physical_attack, defense, rng);
    combatant.stats.take_physical_damage(damage)
}

fn apply_side_effect(effect: SideEffect, wearer: &mut StatBlock, target: &mut StatBlock) {
    match effect {
        SideEffect::DamageTarget { kind, amount } => {
            target.take_damage_of(kind, amount);
        }
        SideEffect::HealWearer(amount) => {
            wearer.heal(amount);
        }
        SideEffect::ShieldWearer(amount) => {
            wearer.add_adaptive_shield(amount);
        }
        SideEffect::InflictTarget { effect, duration } => {
            target.add_status_effect(effect, duration);
        }
    }
}
