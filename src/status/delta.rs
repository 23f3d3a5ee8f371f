//! Stat-delta dispatch table for statistical status effects.
//!
//! Pure data: which stats a kind changes and by how much. Behavioral kinds
//! map to an empty delta.

use smallvec::SmallVec;

use super::catalog::StatusEffectKind;
use crate::stats::{AppliedChange, Stat, StatBlock, StatModifier};

const BLINDED: &[StatModifier] = &[StatModifier::percent(Stat::Accuracy, -30.0)];

const ENRAGED: &[StatModifier] = &[
    StatModifier::percent(Stat::PhysicalAttack, 30.0),
    StatModifier::percent(Stat::MagicalAttack, 30.0),
    StatModifier::percent(Stat::PhysicalDefense, -20.0),
    StatModifier::percent(Stat::MagicalDefense, -20.0),
];

const SLOWED: &[StatModifier] = &[StatModifier::percent(Stat::Speed, -50.0)];

const WEAKENED: &[StatModifier] = &[
    StatModifier::percent(Stat::PhysicalAttack, -25.0),
    StatModifier::percent(Stat::MagicalAttack, -25.0),
];

const EXPOSED: &[StatModifier] = &[
    StatModifier::percent(Stat::PhysicalDefense, -30.0),
    StatModifier::percent(Stat::MagicalDefense, -30.0),
];

const HASTENED: &[StatModifier] = &[StatModifier::percent(Stat::Speed, 50.0)];

const FORTIFIED: &[StatModifier] = &[
    StatModifier::percent(Stat::PhysicalDefense, 25.0),
    StatModifier::percent(Stat::MagicalDefense, 25.0),
];

const FOCUSED: &[StatModifier] = &[
    StatModifier::flat(Stat::CriticalChance, 20.0),
    StatModifier::percent(Stat::Accuracy, 15.0),
];

/// Stat changes for a kind. Empty for behavioral kinds.
#[must_use]
pub fn stat_delta(kind: StatusEffectKind) -> &'static [StatModifier] {
    match kind {
        StatusEffectKind::Blinded => BLINDED,
        StatusEffectKind::Enraged => ENRAGED,
        StatusEffectKind::Slowed => SLOWED,
        StatusEffectKind::Weakened => WEAKENED,
        StatusEffectKind::Exposed => EXPOSED,
        StatusEffectKind::Hastened => HASTENED,
        StatusEffectKind::Fortified => FORTIFIED,
        StatusEffectKind::Focused => FOCUSED,
        StatusEffectKind::Confused
        | StatusEffectKind::Stunned
        | StatusEffectKind::Asleep
        | StatusEffectKind::Unstable => &[],
    }
}

/// Apply a kind's delta to `stats`, returning what was actually added.
pub fn apply(kind: StatusEffectKind, stats: &mut StatBlock) -> SmallVec<[AppliedChange; 4]> {
    stat_delta(kind)
        .iter()
        .map(|modifier| {
            let before = stats.stat(modifier.stat);
            let amount = modifier.resolve(before);
            stats.adjust(modifier.stat, amount);
            AppliedChange {
                stat: modifier.stat,
                amount,
                before,
                after: stats.stat(modifier.stat),
            }
        })
        .collect()
}

/// Undo changes previously returned by [`apply`].
pub fn reverse(changes: &[AppliedChange], stats: &mut StatBlock) {
    for change in changes.iter().rev() {
        if stats.stat(change.stat) == change.after {
            stats.set_stat(change.stat, change.before);
        } else {
            stats.adjust(change.stat, -change.amount);
        }
    }
}
