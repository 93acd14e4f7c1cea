//! Arcane Armory - a tiny D&D magic item forge
//!
//! Rolls weighted random magic items and prints them as framed terminal
//! cards. The AI-enhanced forge can also enrich the lore, paint item art,
//! and show it inline through sixel.

pub mod ai;
pub mod cli;
pub mod config;
pub mod data;
pub mod display;
pub mod items;
pub mod pipeline;
pub mod render;
pub mod stage;

// Re-export commonly used types
pub use config::Config;
pub use data::TableSet;
pub use items::{forge_item, ItemRecord, Rarity};
pub use stage::{StageError, StageOutcome};
