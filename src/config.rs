//! Runtime configuration
//!
//! Assembled once at startup from the environment and passed explicitly to
//! the stages that need it.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default target height for inline images, in pixels
pub const DEFAULT_IMAGE_HEIGHT: u32 = 350;

/// Default per-line reveal delay, in milliseconds
pub const DEFAULT_REVEAL_MS: u64 = 4;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEXT_MODEL: &str = "gpt-5.1";
pub const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1";

/// Forge configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Credential for the text/image service; `None` disables AI stages
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,

    /// Whether generated art is printed inline after the card
    pub inline_display: bool,
    /// Target pixel height for the image post-processor
    pub image_height: u32,
    /// Directory generated images are written to
    pub image_dir: PathBuf,

    /// Optional RON file replacing the built-in tables
    pub tables_path: Option<PathBuf>,
    /// Delay between card lines during the reveal
    pub reveal_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            inline_display: true,
            image_height: DEFAULT_IMAGE_HEIGHT,
            image_dir: PathBuf::from("images"),
            tables_path: None,
            reveal_delay: Duration::from_millis(DEFAULT_REVEAL_MS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            api_key: get("OPENAI_API_KEY"),
            base_url: get("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            text_model: get("DNDGEN_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: get("DNDGEN_IMAGE_MODEL").unwrap_or(defaults.image_model),
            inline_display: !get("DNDGEN_NO_INLINE").is_some_and(|v| is_truthy(&v)),
            image_height: get("DNDGEN_IMG_HEIGHT")
                .map(|v| parse_height(&v))
                .unwrap_or(DEFAULT_IMAGE_HEIGHT),
            image_dir: get("DNDGEN_IMAGE_DIR").map(PathBuf::from).unwrap_or(defaults.image_dir),
            tables_path: get("DNDGEN_TABLES").map(PathBuf::from),
            reveal_delay: get("DNDGEN_REVEAL_MS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.reveal_delay),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

/// `1`, `true` and `yes` (any case) count as set
pub fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

fn parse_height(value: &str) -> u32 {
    match value.parse::<u32>() {
        Ok(h) if h > 0 => h,
        _ => {
            log::warn!(
                "Ignoring DNDGEN_IMG_HEIGHT={:?}, using {}",
                value,
                DEFAULT_IMAGE_HEIGHT
            );
            DEFAULT_IMAGE_HEIGHT
        }
    }
}
