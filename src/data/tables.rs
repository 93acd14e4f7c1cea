//! Built-in content tables
//!
//! Feel free to expand these to flavor the forge for your own setting.
//! Any table can also be replaced wholesale from a RON file, see
//! [`super::loader`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::items::{ItemCategory, Rarity, Theme};
use super::weighted::{Weighted, WeightedTable};
use super::TableError;

/// An item type together with its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTypeDef {
    pub name: String,
    pub category: ItemCategory,
}

/// Mechanical effect templates.
///
/// Templates may contain `{bonus}`, `{dice}` and `{dc}` placeholders which
/// are filled in from the rolled rarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectTables {
    pub generic: WeightedTable<String>,
    #[serde(default)]
    pub by_category: HashMap<ItemCategory, WeightedTable<String>>,
    #[serde(default)]
    pub by_theme: HashMap<Theme, WeightedTable<String>>,
}

/// Every table the item composer draws from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSet {
    pub rarities: WeightedTable<Rarity>,
    pub item_types: WeightedTable<ItemTypeDef>,
    pub materials: WeightedTable<String>,
    pub qualities: WeightedTable<String>,
    pub enchantments: WeightedTable<String>,
    pub origins: WeightedTable<String>,
    pub quirks: WeightedTable<String>,
    /// Requirement text used when an item rolls attunement
    pub attunements: WeightedTable<String>,
    pub epithets: WeightedTable<String>,
    pub effects: EffectTables,
}

impl TableSet {
    /// The tables compiled into the binary
    pub fn builtin() -> Result<Self, TableError> {
        Ok(Self {
            rarities: WeightedTable::from_pairs([
                (Rarity::Common, 40),
                (Rarity::Uncommon, 28),
                (Rarity::Rare, 17),
                (Rarity::VeryRare, 9),
                (Rarity::Legendary, 5),
                (Rarity::Artifact, 1),
            ])
            .map_err(|e| e.in_table("rarities"))?,
            item_types: item_types().map_err(|e| e.in_table("item_types"))?,
            materials: strings(&[
                ("iron", 10),
                ("steel", 10),
                ("cold iron", 5),
                ("obsidian", 5),
                ("mithral", 4),
                ("crystalline", 4),
                ("ghostwood", 4),
                ("adamantine", 3),
                ("shadowglass", 3),
                ("runic stone", 3),
                ("moonsteel", 3),
                ("bloodstone", 3),
                ("sunforged bronze", 3),
                ("dragonbone", 2),
                ("star metal", 2),
                ("eldritch ivory", 2),
                ("void crystal", 1),
                ("wyrmscale", 1),
            ])
            .map_err(|e| e.in_table("materials"))?,
            qualities: strings(&[
                ("weathered", 8),
                ("ornate", 7),
                ("etched", 7),
                ("gleaming", 6),
                ("runed", 6),
                ("ancient", 5),
                ("elegant", 5),
                ("jagged", 5),
                ("barbaric", 4),
                ("ceremonial", 4),
                ("frostbitten", 3),
                ("ember-forged", 3),
                ("sunglow", 3),
                ("rootbound", 3),
                ("cursed", 2),
                ("saintly", 2),
                ("mirrorbright", 2),
                ("prismatic", 1),
            ])
            .map_err(|e| e.in_table("qualities"))?,
            enchantments: strings(&[
                ("it hums softly when danger is near", 6),
                ("it radiates a soothing warmth", 6),
                ("it glows faintly under the light of the moon 🌙", 5),
                ("flames dance along its edge 🔥", 5),
                ("it crackles with latent storm energy ⚡", 5),
                ("its surface drinks in surrounding light", 4),
                ("it sings in battle with eerie harmony", 4),
                ("it leaves faint spectral afterimages when swung", 4),
                ("it leaves behind the scent of rain on stone", 4),
                ("it bends shadows around the wielder", 3),
                ("it briefly reveals invisible runes on nearby surfaces", 3),
                ("tiny motes of starlight drift from it when drawn ✨", 3),
                ("a faint chorus of distant voices echoes inside it", 2),
                ("its reflection sometimes moves a heartbeat out of sync", 2),
                ("it whispers the names of the dead in a chilling murmur 💀", 1),
            ])
            .map_err(|e| e.in_table("enchantments"))?,
            origins: strings(&[
                ("recovered from the depths of an ancient ruin", 8),
                ("crafted by a forgotten archmage", 7),
                ("found in the shattered vaults beneath a ruined city", 6),
                ("blessed in the waters of a sacred spring", 5),
                ("hammered on an anvil of dragonfire", 4),
                ("pieced together from relics scattered across a dozen battlefields", 4),
                ("sung into being by a circle of druids at solstice", 4),
                ("traded for a single whispered secret in a midnight market", 4),
                ("gifted by the fey courts at a terrible price", 3),
                ("stolen from the hoard of a jealous demon", 3),
                ("excavated from a meteorite that never cooled", 3),
                ("salvaged from the armor of a fallen celestial", 2),
                ("recovered from a time-locked vault that should never have opened", 2),
                ("woven from the dreams of sleeping gods", 1),
                ("forged in the heart of a dying star", 1),
            ])
            .map_err(|e| e.in_table("origins"))?,
            quirks: strings(&[
                ("occasionally changes weight at random", 6),
                ("emits the scent of ozone when used", 6),
                ("slowly repairs itself from any damage", 5),
                ("causes faint spectral motes to orbit the wielder", 5),
                ("occasionally giggles softly when no one is looking", 5),
                ("attracts small harmless animals that refuse to leave", 5),
                ("causes nearby candles to burn with colored flames 🕯️", 4),
                ("leaves footprints of light wherever it goes", 4),
                ("rings like crystal when lies are spoken nearby", 4),
                ("casts a shadow that sometimes points in the wrong direction", 4),
                ("seems slightly heavier in the presence of dragons 🐉", 3),
                ("refuses to be drawn against the innocent", 3),
                ("sometimes speaks in riddles only the wielder can hear", 3),
                ("its reflection is always a little older than reality", 2),
                ("is invisible to anyone who has lied in the last hour", 1),
            ])
            .map_err(|e| e.in_table("quirks"))?,
            attunements: strings(&[
                ("Attunement required", 10),
                ("Attunement required by a spellcaster", 5),
                ("Attunement required by a proficient martial weapon user", 4),
                ("Attunement required by a creature proficient with heavy armor", 3),
                ("Attunement required by a bard, cleric, or paladin", 3),
                ("Attunement required by a creature of good alignment", 2),
                ("Attunement required by a creature of non-lawful alignment", 2),
                ("Attunement required by a creature who has made a pact with a patron", 2),
                ("Attunement required by a creature bearing a notable scar", 1),
                ("Attunement required by a creature who has slain a dragon", 1),
            ])
            .map_err(|e| e.in_table("attunements"))?,
            epithets: strings(&[
                ("the Dragonsong", 1),
                ("the Starforged", 1),
                ("the Umbral Edge", 1),
                ("the Dawnbreaker", 1),
                ("the Soulbound", 1),
                ("the Dreamweaver", 1),
                ("the Gravewhisper", 1),
                ("the Stormcall", 1),
                ("the Night's Embrace", 1),
                ("the Sunshard", 1),
                ("the Last Oath", 1),
                ("the Silent Choir", 1),
            ])
            .map_err(|e| e.in_table("epithets"))?,
            effects: effect_tables()?,
        })
    }

    /// Every `(name, table)` pair holding free text, for checks and tooling
    pub fn text_tables(&self) -> Vec<(&'static str, &WeightedTable<String>)> {
        vec![
            ("materials", &self.materials),
            ("qualities", &self.qualities),
            ("enchantments", &self.enchantments),
            ("origins", &self.origins),
            ("quirks", &self.quirks),
            ("attunements", &self.attunements),
            ("epithets", &self.epithets),
            ("effects.generic", &self.effects.generic),
        ]
    }

    /// Reject tables holding blank entries
    pub fn validate(&self) -> Result<(), TableError> {
        for (name, table) in self.text_tables() {
            if table.values().any(|v| v.trim().is_empty()) {
                return Err(TableError::BlankEntry(name.to_string()));
            }
        }
        if self.item_types.values().any(|t| t.name.trim().is_empty()) {
            return Err(TableError::BlankEntry("item_types".to_string()));
        }
        let pools = self
            .effects
            .by_category
            .values()
            .chain(self.effects.by_theme.values());
        for pool in pools {
            if pool.values().any(|v| v.trim().is_empty()) {
                return Err(TableError::BlankEntry("effects".to_string()));
            }
        }
        Ok(())
    }
}

fn strings(pairs: &[(&str, u32)]) -> Result<WeightedTable<String>, TableError> {
    WeightedTable::from_pairs(pairs.iter().map(|&(v, w)| (v.to_string(), w)))
}

fn item_types() -> Result<WeightedTable<ItemTypeDef>, TableError> {
    use ItemCategory::*;

    let defs: [(&str, ItemCategory, u32); 29] = [
        ("sword", Weapon, 8),
        ("dagger", Weapon, 8),
        ("mace", Weapon, 5),
        ("longbow", Weapon, 5),
        ("shortbow", Weapon, 5),
        ("greatsword", Weapon, 4),
        ("warhammer", Weapon, 4),
        ("battleaxe", Weapon, 4),
        ("crossbow", Weapon, 4),
        ("flail", Weapon, 3),
        ("maul", Weapon, 2),
        ("chakram", Weapon, 2),
        ("shield", Armor, 6),
        ("leather armor", Armor, 6),
        ("breastplate", Armor, 4),
        ("helm", Armor, 4),
        ("gauntlets", Armor, 4),
        ("ring", Wondrous, 7),
        ("amulet", Wondrous, 6),
        ("cloak", Wondrous, 6),
        ("boots", Wondrous, 5),
        ("wand", Wondrous, 5),
        ("staff", Wondrous, 4),
        ("belt", Wondrous, 4),
        ("orb", Wondrous, 3),
        ("tome", Wondrous, 3),
        ("instrument", Wondrous, 3),
        ("lantern", Wondrous, 3),
        ("spellbook", Wondrous, 2),
    ];

    WeightedTable::new(
        defs.iter()
            .map(|&(name, category, weight)| Weighted {
                value: ItemTypeDef { name: name.to_string(), category },
                weight,
            })
            .collect(),
    )
}

fn effect_tables() -> Result<EffectTables, TableError> {
    let generic = strings(&[
        ("advantage on saving throws against being charmed", 4),
        ("you can cast Detect Magic at will", 4),
        ("your walking speed increases by 10 ft.", 4),
        ("you gain darkvision out to 60 ft.", 4),
        ("you have advantage on Initiative rolls", 3),
        ("you can speak, read, and write Draconic", 3),
        ("you can breathe underwater", 3),
        ("you can cast Misty Step once per short rest", 2),
        ("once per long rest, you can turn invisible for 1 minute", 2),
        ("your spell save DC for one class increases by 1", 1),
    ])
    .map_err(|e| e.in_table("effects.generic"))?;

    let mut by_category = HashMap::new();
    by_category.insert(
        ItemCategory::Weapon,
        strings(&[
            ("+{bonus} bonus to attack and damage rolls", 6),
            ("once per day, you can reroll a failed attack roll", 3),
            ("on a critical hit, the target takes an extra {dice}d6 damage", 2),
        ])
        .map_err(|e| e.in_table("effects.by_category.Weapon"))?,
    );
    by_category.insert(
        ItemCategory::Armor,
        strings(&[
            ("+{bonus} bonus to AC while worn", 6),
            ("you can't be surprised while you wear it", 2),
            ("once per long rest, reduce the damage of one hit by {dice}d10", 2),
        ])
        .map_err(|e| e.in_table("effects.by_category.Armor"))?,
    );
    by_category.insert(
        ItemCategory::Wondrous,
        strings(&[
            ("+{bonus} bonus to spell attack rolls", 4),
            ("+{bonus} bonus to saving throws while attuned", 3),
            ("once per long rest, regain one expended spell slot of level {bonus} or lower", 2),
        ])
        .map_err(|e| e.in_table("effects.by_category.Wondrous"))?,
    );

    let themed: [(Theme, &[(&str, u32)]); 8] = [
        (Theme::Fire, &[
            ("resistance to fire damage", 4),
            ("your weapon attacks deal an extra {dice}d4 fire damage", 2),
            ("once per day, you can cast Burning Hands (save DC {dc})", 2),
        ]),
        (Theme::Cold, &[
            ("resistance to cold damage", 4),
            ("creatures you hit lose 10 ft. of speed until your next turn", 2),
            ("once per day, you can cast Ice Knife (save DC {dc})", 2),
        ]),
        (Theme::Shadow, &[
            ("you have advantage on Stealth checks in dim light or darkness", 4),
            ("once per short rest, you can teleport up to {dice}0 ft. between shadows", 2),
            ("you can cast Darkness once per long rest", 2),
        ]),
        (Theme::Storm, &[
            ("resistance to lightning damage", 4),
            ("once per day, you can cast Thunderwave (save DC {dc})", 2),
            ("your first hit each turn deals an extra {dice}d4 thunder damage", 2),
        ]),
        (Theme::Fey, &[
            ("you can speak with animals at will", 4),
            ("once per day, you can cast Entangle (save DC {dc})", 2),
            ("difficult terrain made of plants doesn't slow you", 2),
        ]),
        (Theme::Radiant, &[
            ("resistance to necrotic damage", 3),
            ("once per day, you can heal a creature you touch for {dice}d8 hit points", 3),
            ("undead have disadvantage on attack rolls against you", 2),
        ]),
        (Theme::Necrotic, &[
            ("resistance to necrotic damage", 4),
            ("when you reduce a creature to 0 hit points, you gain {dice}d6 temporary hit points", 2),
            ("once per day, you can cast Ray of Sickness (save DC {dc})", 2),
        ]),
        (Theme::Arcane, &[
            ("you can cast Detect Magic at will", 3),
            ("+{bonus} bonus to spell save DC", 3),
            ("once per day, you can cast Shield as a reaction", 2),
        ]),
    ];

    let mut by_theme = HashMap::new();
    for (theme, pairs) in themed {
        by_theme.insert(theme, strings(pairs).map_err(|e| e.in_table("effects.by_theme"))?);
    }

    Ok(EffectTables { generic, by_category, by_theme })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_valid() {
        let tables = TableSet::builtin().unwrap();
        assert!(tables.validate().is_ok());
        assert_eq!(tables.rarities.len(), Rarity::ALL.len());
        assert_eq!(tables.rarities.total_weight(), 100);
    }

    #[test]
    fn test_rarer_tiers_weigh_less() {
        let tables = TableSet::builtin().unwrap();
        for pair in Rarity::ALL.windows(2) {
            assert!(tables.rarities.probability(&pair[0]) > tables.rarities.probability(&pair[1]));
        }
    }

    #[test]
    fn test_every_category_and_theme_has_effects() {
        let tables = TableSet::builtin().unwrap();
        for category in [ItemCategory::Weapon, ItemCategory::Armor, ItemCategory::Wondrous] {
            assert!(tables.effects.by_category.contains_key(&category));
        }
        assert_eq!(tables.effects.by_theme.len(), 8);
        assert!(!tables.effects.by_theme.contains_key(&Theme::Generic));
    }

    #[test]
    fn test_builtin_tables_serialize_to_ron() {
        let tables = TableSet::builtin().unwrap();
        let text = ron::ser::to_string_pretty(&tables, ron::ser::PrettyConfig::default()).unwrap();
        let parsed: TableSet = ron::from_str(&text).unwrap();
        assert_eq!(parsed.materials.len(), tables.materials.len());
        assert_eq!(parsed.effects.by_theme.len(), tables.effects.by_theme.len());
    }
}
