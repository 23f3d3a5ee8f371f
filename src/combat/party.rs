//! In-memory [`Inventory`].

use serde::{Deserialize, Serialize};

use super::collaborators::Inventory;
use super::combatant::Combatant;
use crate::items::Item;

/// A roster, a bag and a crystal purse.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub creatures: Vec<Combatant>,
    pub items: Vec<Item>,
    pub crystals: u64,
}

impl Party {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_creature(mut self, creature: Combatant) -> Self {
        self.creatures.push(creature);
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Number of held items equal to `item`.
    #[must_use]
    pub fn count(&self, item: &Item) -> usize {
        self.items.iter().filter(|i| *i == item).count()
    }
}

impl Inventory for Party {
    fn creatures(&self) -> &[Combatant] {
        &self.creatures
    }

    fn creature_mut(&mut self, index: usize) -> Option<&mut Combatant> {
        self.creatures.get_mut(index)
    }

    fn add_creature(&mut self, creature: Combatant) {
        self.creatures.push(creature);
    }

    fn items(&self) -> &[Item] {
        &self.items
    }

    fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    fn remove_item(&mut self, item: &Item) -> bool {
        match self.items.iter().position(|i| i == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    fn add_crystals(&mut self, amount: u32) {
        self.crystals += u64::from(amount);
    }
}
