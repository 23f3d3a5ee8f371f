//! Orchestrator states.

use serde::{Deserialize, Serialize};

/// Where the combat session is in its turn cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatState {
    /// No combat in progress.
    #[default]
    Inactive,
    /// A timed message is showing; the session moves on when it expires.
    Message,
    /// Waiting for the player to act.
    PlayerTurn,
    /// The enemy acts once its delay expires.
    EnemyTurn,
    /// A non-damaging player action (item, swap) is on display.
    ActionExecution,
    Capture,
    Victory,
    Defeat,
    Flee,
    /// Combat is over; idles until `end_combat`.
    Completed,
}

impl CombatState {
    /// Victory, Capture, Defeat and Flee show a closing message and then
    /// move to Completed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            CombatState::Victory | CombatState::Capture | CombatState::Defeat | CombatState::Flee
        )
    }

    /// Whether combat is over (terminal or completed).
    #[must_use]
    pub const fn is_finished(self) -> bool {
        self.is_terminal() || matches!(self, CombatState::Completed)
    }
}

/// Menu shown while the player owns the turn.
///
/// Purely presentational; every menu accepts the same commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerMenu {
    #[default]
    Main,
    AbilitySelect,
    CaptureSelect,
    ItemSelect,
}

/// How a finished combat ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatOutcome {
    Victory,
    Captured,
    Defeat,
    Fled,
}
