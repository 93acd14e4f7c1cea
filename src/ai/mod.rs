//! AI-backed enrichment
//!
//! The lore and art stages talk to the hosted models through the
//! [`TextModel`] and [`ImageModel`] traits so the pipeline can run against
//! any backend (or none).

pub mod art;
pub mod lore;
pub mod openai;

pub use art::{art_prompt, generate_art, slugify};
pub use lore::{enhance_lore, lore_note};
pub use openai::OpenAiClient;

use crate::stage::StageError;

/// A chat model that answers with a JSON object
pub trait TextModel {
    /// Model name shown in notes
    fn name(&self) -> &str;

    /// Send a system and user prompt, returning the raw JSON text of the reply
    fn complete_json(&self, system: &str, user: &str) -> Result<String, StageError>;
}

/// An image model returning base64-encoded image data
pub trait ImageModel {
    fn name(&self) -> &str;

    /// Generate one square image for `prompt`
    fn generate_image(&self, prompt: &str) -> Result<String, StageError>;
}
