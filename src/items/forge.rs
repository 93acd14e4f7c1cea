//! Item composition
//!
//! Rolls every field of an [`ItemRecord`] from the content tables. Pure
//! function of the random source; no I/O.

use rand::Rng;

use crate::data::TableSet;
use super::item::{ItemCategory, ItemRecord, Rarity, Theme};

/// Chance of the "<Quality> <Type> of <Epithet>" naming style
const EPITHET_NAME_CHANCE: f64 = 0.4;

/// Chance of drawing from the theme pool when one exists
const THEMED_EFFECT_CHANCE: f64 = 0.5;

/// Chance of drawing from the category pool (when the theme pool wasn't used)
const CATEGORY_EFFECT_CHANCE: f64 = 0.6;

/// Requirement text for items without attunement
pub const NO_ATTUNEMENT: &str = "No attunement required";

/// Roll a rarity tier from the weighted table
pub fn roll_rarity(tables: &TableSet, rng: &mut impl Rng) -> Rarity {
    *tables.rarities.pick(rng)
}

/// Roll whether the item needs attunement, and the requirement text
pub fn roll_attunement(tables: &TableSet, rarity: Rarity, rng: &mut impl Rng) -> (bool, String) {
    if rng.gen_bool(rarity.attunement_chance()) {
        (true, tables.attunements.pick(rng).clone())
    } else {
        (false, NO_ATTUNEMENT.to_string())
    }
}

/// Pick a mechanical effect, preferring theme- and category-matched pools
pub fn roll_effect(
    tables: &TableSet,
    rarity: Rarity,
    category: ItemCategory,
    theme: Theme,
    rng: &mut impl Rng,
) -> String {
    let effects = &tables.effects;

    let themed = effects.by_theme.get(&theme);
    let template = match themed {
        Some(pool) if rng.gen_bool(THEMED_EFFECT_CHANCE) => pool.pick(rng),
        _ => match effects.by_category.get(&category) {
            Some(pool) if rng.gen_bool(CATEGORY_EFFECT_CHANCE) => pool.pick(rng),
            _ => effects.generic.pick(rng),
        },
    };

    fill_template(template, rarity)
}

/// Substitute rarity-scaled numbers into an effect template
pub fn fill_template(template: &str, rarity: Rarity) -> String {
    template
        .replace("{bonus}", &rarity.bonus().to_string())
        .replace("{dice}", &rarity.dice().to_string())
        .replace("{dc}", &(12 + rarity.tier()).to_string())
}

/// Build the display name for a freshly rolled item
pub fn build_name(
    tables: &TableSet,
    rarity: Rarity,
    quality: &str,
    material: &str,
    item_type: &str,
    rng: &mut impl Rng,
) -> String {
    if rng.gen_bool(EPITHET_NAME_CHANCE) {
        let epithet = tables.epithets.pick(rng);
        format!("{} {} of {}", title_case(quality), title_case(item_type), epithet)
    } else {
        format!("{} {} {} {}", rarity.name(), quality, material, item_type)
    }
}

/// Capitalize the first letter of every word, including hyphenated parts
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch.is_whitespace() || ch == '-';
    }
    out
}

/// Compose one complete item record
pub fn forge_item(tables: &TableSet, rng: &mut impl Rng) -> ItemRecord {
    let rarity = roll_rarity(tables, rng);
    let item_type = tables.item_types.pick(rng).clone();
    let material = tables.materials.pick(rng).clone();
    let quality = tables.qualities.pick(rng).clone();
    let enchantment = tables.enchantments.pick(rng).clone();
    let origin = tables.origins.pick(rng).clone();
    let quirk = tables.quirks.pick(rng).clone();

    let (attunement_required, attunement) = roll_attunement(tables, rarity, rng);
    let theme = Theme::infer(&[material.as_str(), quality.as_str(), enchantment.as_str()]);
    let mechanical_effect = roll_effect(tables, rarity, item_type.category, theme, rng);
    let name = build_name(tables, rarity, &quality, &material, &item_type.name, rng);

    log::debug!("Forged {} ({}, {:?})", name, rarity.name(), theme);

    ItemRecord {
        name,
        rarity,
        item_type: item_type.name,
        category: item_type.category,
        material,
        quality,
        enchantment,
        origin,
        quirk,
        theme,
        mechanical_effect,
        attunement_required,
        attunement,
        enhanced_lore: None,
        enhanced_quirk: None,
        mechanical_note: None,
        image_path: None,
    }
}
