//! Rejection reasons for combat operations.
//!
//! The orchestrator's boolean API never surfaces these; they exist so the
//! `try_*` forms and the debug log can say *why* something was refused.

use thiserror::Error;

use crate::combat::CombatState;

/// Why a combat operation was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("no combat is in progress")]
    Inactive,

    #[error("operation not allowed in state {state:?}")]
    WrongState { state: CombatState },

    #[error("player roster is empty")]
    EmptyRoster,

    #[error("no creature in the roster is able to fight")]
    NoHealthyCreature,

    #[error("ability slot {0} is out of range")]
    InvalidAbility(usize),

    #[error("ability slot {slot} is on cooldown for {remaining} more turns")]
    AbilityOnCooldown { slot: usize, remaining: u32 },

    #[error("item index {0} is out of range")]
    InvalidItem(usize),

    #[error("item {0} cannot be used in combat")]
    UnusableItem(String),

    #[error("roster slot {0} cannot be swapped in")]
    InvalidSwap(usize),

    #[error("a capture attempt is already in progress")]
    CaptureInProgress,

    #[error("capture collaborator rejected the attempt")]
    CaptureRejected,

    #[error("capture stone is not in the inventory")]
    StoneNotOwned,

    #[error("stat block codec error: {0}")]
    Codec(String),
}

impl From<bincode::Error> for CombatError {
    fn from(err: bincode::Error) -> Self {
        CombatError::Codec(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CombatError>;
