//! Combat orchestration.
//!
//! - `CombatSession`: the turn state machine
//! - `Combatant`, `Ability`: who fights and with what
//! - `behavior`: behavioral status dispatch
//! - `odds`: flee and capture probabilities
//! - `Inventory`, `Presentation`, `CaptureService`: collaborator seams
//! - `Party`, `NullPresentation`, `ChanceCapture`: in-crate implementations

pub mod behavior;
mod capture;
mod collaborators;
mod combatant;
pub mod odds;
mod party;
mod session;
mod snapshot;
mod state;
pub mod strike;

pub use behavior::{plan_turn, TurnAction, TurnPlan};
pub use capture::{CaptureReply, CaptureRequest, CaptureResult, CaptureService, ChanceCapture, DEFAULT_SHAKE_DURATION};
pub use collaborators::{Button, InputEvent, Inventory, NullPresentation, PlayerCommand, Presentation};
pub use combatant::{Ability, Combatant, PlayerProfile, StatusInfliction};
pub use odds::{capture_chance, capture_chance_with_stone, flee_chance};
pub use party::Party;
pub use session::CombatSession;
pub use snapshot::{CombatSnapshot, CombatantSnapshot};
pub use state::{CombatOutcome, CombatState, PlayerMenu};
pub use strike::{resolve_self_hit, resolve_strike, Strike, StrikeOutcome};
