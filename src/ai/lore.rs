//! Lore enhancement
//!
//! Asks a text model to enrich a composed item with a refined name, lore,
//! quirk text, and a GM note. All four land together or not at all.

use serde::{Deserialize, Serialize};

use crate::items::{ItemRecord, LoreEnhancement};
use crate::stage::{StageError, StageOutcome};
use super::TextModel;

pub const SYSTEM_PROMPT: &str = "You are a seasoned Dungeons & Dragons item designer. \
Given a base magic item, you elaborate its lore and quirks in a vivid but table-usable way. \
Keep it roughly 5e balanced, grounded in fantasy tone (no modern tech), \
and avoid contradicting the core concept.";

const TASK: &str = "Task:\n\
- Enrich the lore into 2-4 sentences of evocative description.\n\
- Provide 1-2 quirky behaviors or narrative oddities.\n\
- Optionally refine the item name and mechanical effect to be a bit more flavorful, \
but keep them mechanically close to the original.\n\n\
Respond ONLY as a JSON object with keys:\n\
  name: string (final item name, can reuse the original)\n\
  enhanced_lore: string (2-4 sentences)\n\
  enhanced_quirk: string (1-2 sentences; can combine multiple quirks)\n\
  mechanical_note: string (short note about how to interpret or keep it balanced)\n\
No extra commentary, no markdown.";

/// Note shown when no credentials are configured
pub const NOT_CONFIGURED_NOTE: &str = "🔒 OpenAI not configured; showing base generator output.";

/// The base item as sent to the model
#[derive(Debug, Serialize)]
struct LoreRequest<'a> {
    name: &'a str,
    rarity: &'a str,
    #[serde(rename = "type")]
    item_type: &'a str,
    material: &'a str,
    quality: &'a str,
    enchantment: &'a str,
    origin: &'a str,
    quirk: &'a str,
    effect: &'a str,
    attune: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoreResponse {
    name: Option<String>,
    enhanced_lore: Option<String>,
    enhanced_quirk: Option<String>,
    mechanical_note: Option<String>,
}

/// Build the user prompt embedding the item as JSON
pub fn build_user_prompt(item: &ItemRecord) -> Result<String, StageError> {
    let request = LoreRequest {
        name: &item.name,
        rarity: item.rarity.name(),
        item_type: &item.item_type,
        material: &item.material,
        quality: &item.quality,
        enchantment: &item.enchantment,
        origin: &item.origin,
        quirk: &item.quirk,
        effect: &item.mechanical_effect,
        attune: &item.attunement,
    };
    let json = serde_json::to_string(&request)?;
    Ok(format!("Here is a base item description as JSON:\n{}\n\n{}", json, TASK))
}

/// Parse the model's reply. Lore, quirk, and note must all be present.
pub fn parse_lore(reply: &str) -> Result<LoreEnhancement, StageError> {
    let response: LoreResponse = serde_json::from_str(strip_code_fence(reply))?;

    let required = |field: Option<String>, key: &str| {
        field
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| StageError::Malformed(format!("missing `{}`", key)))
    };

    Ok(LoreEnhancement {
        name: response.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        lore: required(response.enhanced_lore, "enhanced_lore")?,
        quirk: required(response.enhanced_quirk, "enhanced_quirk")?,
        mechanical_note: required(response.mechanical_note, "mechanical_note")?,
    })
}

/// Models sometimes wrap JSON in a markdown fence despite being told not to
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}

/// Run the lore stage. `None` means no model is configured.
pub fn enhance_lore(model: Option<&dyn TextModel>, item: &ItemRecord) -> StageOutcome<LoreEnhancement> {
    let Some(model) = model else {
        log::info!("Lore enhancement skipped: no text model configured");
        return StageOutcome::skipped(NOT_CONFIGURED_NOTE);
    };

    let result = build_user_prompt(item)
        .and_then(|prompt| model.complete_json(SYSTEM_PROMPT, &prompt))
        .and_then(|reply| parse_lore(&reply));

    match result {
        Ok(lore) => {
            log::info!("Lore enhanced by {}", model.name());
            StageOutcome::Enhanced(lore)
        }
        Err(e) => {
            log::warn!("Lore enhancement failed: {}", e);
            StageOutcome::skipped(format!("⚠️ Lore enhancement failed: {}", e))
        }
    }
}

/// Card note describing how the lore stage went
pub fn lore_note(outcome: &StageOutcome<LoreEnhancement>, model_name: &str) -> String {
    match outcome {
        StageOutcome::Enhanced(_) => format!("🤖 {} enhancement applied.", model_name),
        StageOutcome::Skipped(reason) => reason.clone(),
    }
}
