//! Read-only views handed to the presentation.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::combatant::Combatant;
use super::state::{CombatState, PlayerMenu};
use crate::core::ElementType;
use crate::stats::ABILITY_SLOTS;
use crate::status::StatusEffectKind;

/// One side of the fight as the presentation sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub name: String,
    pub level: u32,
    pub element: ElementType,
    pub current_health: u32,
    pub max_health: u32,
    pub shield: u32,
    pub statuses: SmallVec<[(StatusEffectKind, u32); 4]>,
    pub abilities: SmallVec<[String; ABILITY_SLOTS]>,
    pub cooldowns: [u32; ABILITY_SLOTS],
}

impl CombatantSnapshot {
    #[must_use]
    pub fn of(combatant: &Combatant) -> Self {
        Self {
            name: combatant.name.clone(),
            level: combatant.level,
            element: combatant.element,
            current_health: combatant.stats.current_health(),
            max_health: combatant.stats.max_health,
            shield: combatant.stats.total_shield(),
            statuses: combatant.stats.active_status_effects(),
            abilities: combatant.abilities.iter().map(|a| a.name.clone()).collect(),
            cooldowns: combatant.stats.cooldowns(),
        }
    }
}

/// Everything the presentation needs to draw one frame.
///
/// The log is a persistent vector, so snapshots share it with the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub state: CombatState,
    pub menu: PlayerMenu,
    pub message: Option<String>,
    pub turn: u32,
    pub player_turn: bool,
    pub capture_in_progress: bool,
    pub player: Option<CombatantSnapshot>,
    pub enemy: Option<CombatantSnapshot>,
    pub log: Vector<String>,
}
