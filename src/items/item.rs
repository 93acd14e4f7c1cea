//! Item definitions
//!
//! Core item record, rarities, and categories.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Item rarity tiers, ordered from most to least common
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    VeryRare,
    Legendary,
    Artifact,
}

impl Rarity {
    /// All tiers in ascending order
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::VeryRare,
        Rarity::Legendary,
        Rarity::Artifact,
    ];

    /// Get display color RGB
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Rarity::Common => (150, 150, 150),
            Rarity::Uncommon => (100, 255, 100),
            Rarity::Rare => (100, 150, 255),
            Rarity::VeryRare => (200, 100, 255),
            Rarity::Legendary => (255, 220, 80),
            Rarity::Artifact => (255, 90, 90),
        }
    }

    /// Get rarity name
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::VeryRare => "Very Rare",
            Rarity::Legendary => "Legendary",
            Rarity::Artifact => "Artifact",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Rarity::Common => "⚪",
            Rarity::Uncommon => "🟢",
            Rarity::Rare => "🔵",
            Rarity::VeryRare => "🟣",
            Rarity::Legendary => "🟡",
            Rarity::Artifact => "🔴",
        }
    }

    /// Get numeric tier (higher = rarer)
    pub fn tier(&self) -> u8 {
        match self {
            Rarity::Common => 0,
            Rarity::Uncommon => 1,
            Rarity::Rare => 2,
            Rarity::VeryRare => 3,
            Rarity::Legendary => 4,
            Rarity::Artifact => 5,
        }
    }

    /// Chance that an item of this tier demands attunement
    pub fn attunement_chance(&self) -> f64 {
        match self {
            Rarity::Common => 0.10,
            Rarity::Uncommon => 0.25,
            Rarity::Rare => 0.50,
            Rarity::VeryRare => 0.70,
            Rarity::Legendary => 0.90,
            Rarity::Artifact => 1.0,
        }
    }

    /// Flat bonus substituted into `{bonus}` effect templates
    pub fn bonus(&self) -> u8 {
        match self {
            Rarity::Common | Rarity::Uncommon => 1,
            Rarity::Rare => 2,
            Rarity::VeryRare | Rarity::Legendary | Rarity::Artifact => 3,
        }
    }

    /// Number of dice substituted into `{dice}` effect templates
    pub fn dice(&self) -> u8 {
        self.tier() + 1
    }
}

/// Coarse grouping of item types, used to pick fitting mechanics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Weapon,
    Armor,
    Wondrous,
}

impl ItemCategory {
    pub fn name(&self) -> &'static str {
        match self {
            ItemCategory::Weapon => "weapon",
            ItemCategory::Armor => "armor",
            ItemCategory::Wondrous => "wondrous item",
        }
    }
}

/// Loose flavor theme inferred from an item's descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    Fire,
    Cold,
    Shadow,
    Storm,
    Fey,
    Radiant,
    Necrotic,
    Arcane,
    Generic,
}

impl Theme {
    /// Keyword lists checked in order; the first theme with a hit wins
    const KEYWORDS: [(Theme, &'static [&'static str]); 8] = [
        (Theme::Fire, &["flame", "fire", "ember", "ash", "inferno", "lava", "scorch", "burn", "sun"]),
        (Theme::Cold, &["frost", "ice", "icy", "cold", "winter", "snow"]),
        (Theme::Shadow, &["shadow", "night", "dark", "gloom", "umbral", "void", "shade", "ghost", "spectral"]),
        (Theme::Storm, &["storm", "lightning", "thunder", "tempest", "squall"]),
        (Theme::Fey, &["vine", "root", "moss", "leaf", "petal", "forest", "druid", "beast", "animal", "nature", "wood", "fey"]),
        (Theme::Radiant, &["holy", "divine", "radiant", "saint", "angel", "celestial", "blessed", "hallowed"]),
        (Theme::Necrotic, &["blood", "bone", "grave", "death", "corpse", "skull", "necrotic", "wither"]),
        (Theme::Arcane, &["arcane", "spell", "wizard", "mage", "rune", "sigil", "glyph", "scroll", "tome"]),
    ];

    /// Infer a theme from free-text descriptors
    pub fn infer(descriptors: &[&str]) -> Theme {
        let text = descriptors.join(" ").to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| text.contains(w)))
            .map(|(theme, _)| *theme)
            .unwrap_or(Theme::Generic)
    }
}

/// Fields merged in by a successful lore enhancement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoreEnhancement {
    /// Refined name; `None` keeps the composed one
    pub name: Option<String>,
    pub lore: String,
    pub quirk: String,
    pub mechanical_note: String,
}

/// One generated magic item and its optional enrichments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub rarity: Rarity,
    pub item_type: String,
    pub category: ItemCategory,
    pub material: String,
    pub quality: String,
    pub enchantment: String,
    pub origin: String,
    pub quirk: String,
    pub theme: Theme,
    pub mechanical_effect: String,
    pub attunement_required: bool,
    /// Human-readable attunement requirement
    pub attunement: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced_lore: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced_quirk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanical_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<PathBuf>,
}

impl ItemRecord {
    /// "<quality> <material> <type>" line shown on the card and in prompts
    pub fn type_line(&self) -> String {
        format!("{} {} {}", self.quality, self.material, self.item_type)
    }

    /// Check that every mandatory field is populated
    pub fn is_complete(&self) -> bool {
        [
            &self.name,
            &self.item_type,
            &self.material,
            &self.quality,
            &self.enchantment,
            &self.origin,
            &self.quirk,
            &self.mechanical_effect,
            &self.attunement,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }

    pub fn is_enhanced(&self) -> bool {
        self.enhanced_lore.is_some()
    }

    /// Merge a lore enhancement; all three text fields land together
    pub fn apply_lore(&mut self, lore: LoreEnhancement) {
        if let Some(name) = lore.name.filter(|n| !n.trim().is_empty()) {
            self.name = name;
        }
        self.enhanced_lore = Some(lore.lore);
        self.enhanced_quirk = Some(lore.quirk);
        self.mechanical_note = Some(lore.mechanical_note);
    }
}
