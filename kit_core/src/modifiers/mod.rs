//! Trait modifiers - personality rescales generated equipment and loot

mod equipment;
mod loot;

pub use equipment::apply_equipment_modifiers;
pub use loot::{LootModifierTable, LootRule, Rounding};
