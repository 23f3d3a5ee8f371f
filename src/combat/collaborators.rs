//! Collaborator traits the session drives.
//!
//! - [`Inventory`]: roster, items and currency
//! - [`Presentation`]: whatever draws combat and turns input into commands
//!
//! The capture collaborator lives in `capture`.

use serde::{Deserialize, Serialize};

use super::combatant::Combatant;
use super::snapshot::CombatSnapshot;
use super::state::PlayerMenu;
use crate::items::{CaptureStone, Item};

/// The player's roster and bag.
pub trait Inventory {
    /// Owned creatures, in roster order.
    fn creatures(&self) -> &[Combatant];

    /// Mutable access to one owned creature.
    fn creature_mut(&mut self, index: usize) -> Option<&mut Combatant>;

    /// Add a captured creature to the roster.
    fn add_creature(&mut self, creature: Combatant);

    fn items(&self) -> &[Item];

    fn add_item(&mut self, item: Item);

    /// Remove one item equal to `item`. Returns false if none was held.
    fn remove_item(&mut self, item: &Item) -> bool;

    fn add_crystals(&mut self, amount: u32);

    /// Whether the bag holds this stone.
    fn has_capture_stone(&self, stone: &CaptureStone) -> bool {
        self.items().iter().any(|i| i.as_capture_stone() == Some(*stone))
    }
}

/// Something that draws combat and reads player input.
pub trait Presentation {
    fn show(&mut self) {}

    fn hide(&mut self) {}

    /// Called after every state-affecting operation.
    fn refresh(&mut self, snapshot: &CombatSnapshot);

    /// Translate forwarded input into a command, if any.
    fn handle_input(&mut self, _event: &InputEvent) -> Option<PlayerCommand> {
        None
    }
}

/// Headless presentation. Draws nothing, issues no commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresentation;

impl Presentation for NullPresentation {
    fn refresh(&mut self, _snapshot: &CombatSnapshot) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Confirm,
    Cancel,
    Up,
    Down,
    Left,
    Right,
}

/// Raw input forwarded during the player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    PointerPressed { x: f32, y: f32 },
    ButtonPressed(Button),
}

/// A player decision, as produced by the presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    UseAbility(usize),
    BasicAttack,
    Flee,
    Capture,
    CaptureWithStone(CaptureStone),
    UseItem(usize),
    Swap(usize),
    OpenMenu(PlayerMenu),
}
