//! Fixed reward lookup tables.

use crate::core::ElementType;
use crate::items::{Consumable, Item, Material};

/// Name of the common material a creature of this element drops.
#[must_use]
pub fn material_name(element: ElementType) -> &'static str {
    match element {
        ElementType::Fire => "Ember Dust",
        ElementType::Water => "Tide Pearl",
        ElementType::Grass => "Verdant Leaf",
        ElementType::Electric => "Static Shard",
        ElementType::Ice => "Frost Crystal",
        ElementType::Earth => "Stone Fragment",
        ElementType::Wind => "Gale Feather",
        ElementType::Light => "Radiant Mote",
        ElementType::Dark => "Shadow Essence",
        ElementType::Normal | ElementType::Poison | ElementType::Psychic => "Creature Fang",
    }
}

/// The type-keyed common item.
#[must_use]
pub fn common_item(element: ElementType) -> Item {
    Item::Material(Material {
        name: material_name(element).to_string(),
        element,
    })
}

/// The generic healing drop.
#[must_use]
pub fn healing_item() -> Item {
    Item::Consumable(Consumable::potion())
}
