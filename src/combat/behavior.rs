//! Behavioral status dispatch.
//!
//! Statistical effects are fully handled by the stat block. Behavioral ones
//! change what a combatant does with its action, and that is decided here
//! at the start of each action:
//!
//! | tag          | effect                                             |
//! |--------------|----------------------------------------------------|
//! | Incapacitate | action lost, no roll                               |
//! | Alternating  | Enraged on even remaining turns, Weakened on odd   |
//! | Confusion    | may strike itself with a basic attack              |

use crate::core::RandomSource;
use crate::stats::StatBlock;
use crate::status::{BehaviorTag, StatusEffectKind};

/// Turns a phase effect from an Alternating status lasts.
pub const PHASE_DURATION: u32 = 1;

/// What a combatant does with this action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnAction {
    /// Proceeds as chosen.
    Act,
    /// Loses the action to the given effect.
    Skip(StatusEffectKind),
    /// Strikes itself instead of the target.
    HitSelf,
}

/// Plan for one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnPlan {
    pub action: TurnAction,
    /// Phase effect to apply before acting.
    pub phase_effect: Option<StatusEffectKind>,
}

/// Decide how a combatant's behavioral statuses shape its next action.
///
/// Only draws from `rng` when the combatant is confused.
pub fn plan_turn(stats: &StatBlock, self_hit_chance: f64, rng: &mut impl RandomSource) -> TurnPlan {
    let active = stats.active_status_effects();
    let with_tag = |tag: BehaviorTag| {
        active
            .iter()
            .find(|(kind, _)| kind.definition().behavior() == Some(tag))
            .copied()
    };

    if let Some((kind, _)) = with_tag(BehaviorTag::Incapacitate) {
        return TurnPlan {
            action: TurnAction::Skip(kind),
            phase_effect: None,
        };
    }

    let phase_effect = with_tag(BehaviorTag::Alternating).map(|(_, remaining)| phase_for(remaining));

    let action = match with_tag(BehaviorTag::Confusion) {
        Some(_) if rng.chance(self_hit_chance) => TurnAction::HitSelf,
        _ => TurnAction::Act,
    };

    TurnPlan { action, phase_effect }
}

/// Phase of an alternating effect with `remaining` turns left.
#[must_use]
pub const fn phase_for(remaining: u32) -> StatusEffectKind {
    if remaining % 2 == 0 {
        StatusEffectKind::Enraged
    } else {
        StatusEffectKind::Weakened
    }
}
