//! Item system

pub mod forge;
pub mod item;

pub use forge::{forge_item, roll_attunement, roll_effect, roll_rarity, NO_ATTUNEMENT};
pub use item::{ItemCategory, ItemRecord, LoreEnhancement, Rarity, Theme};
