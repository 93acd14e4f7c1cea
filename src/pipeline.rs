//! Forge pipelines
//!
//! The local forge composes and prints a card. The enhanced forge runs the
//! optional lore, art, resize, and display stages around it; each of those
//! either contributes or is skipped with a reason.

use std::io::{self, Write};
use std::path::PathBuf;

use rand::Rng;
use ratatui::text::Line;

use crate::ai::{enhance_lore, generate_art, lore_note, ImageModel, TextModel};
use crate::config::Config;
use crate::data::TableSet;
use crate::display::{fallback_notice, show_inline, CommandRunner};
use crate::items::{forge_item, ItemRecord, LoreEnhancement};
use crate::render::{notice, print_lines, reveal, tip, Card};
use crate::stage::StageOutcome;

/// External collaborators of the enhanced forge
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub text: Option<&'a dyn TextModel>,
    pub image: Option<&'a dyn ImageModel>,
    pub runner: &'a dyn CommandRunner,
}

/// Everything one enhanced forge produced
#[derive(Debug, Clone)]
pub struct ForgeReport {
    pub item: ItemRecord,
    pub card: Card,
    /// Stage notes, joined into one line under the card
    pub notes: Vec<String>,
    pub lore: StageOutcome<LoreEnhancement>,
    pub art: StageOutcome<PathBuf>,
    pub display: StageOutcome<PathBuf>,
}

/// Compose one item and print its card
pub fn forge_local(
    config: &Config,
    tables: &TableSet,
    rng: &mut impl Rng,
    out: &mut impl Write,
) -> io::Result<ItemRecord> {
    let item = forge_item(tables, rng);
    let card = Card::new(&item, &[]);

    reveal(out, &card.ansi_lines(), config.reveal_delay)?;
    writeln!(out)?;
    print_lines(out, &[tip(), Line::default()])?;

    Ok(item)
}

/// Compose one item, run every optional stage, and print the result.
///
/// Only writes to `out` can fail; stage failures end up in the report.
pub fn forge_enhanced(
    config: &Config,
    tables: &TableSet,
    services: Services<'_>,
    rng: &mut impl Rng,
    out: &mut impl Write,
) -> io::Result<ForgeReport> {
    let mut item = forge_item(tables, rng);
    let mut notes = Vec::new();

    let lore = enhance_lore(services.text, &item);
    let text_model = services.text.map(|m| m.name()).unwrap_or_default();
    notes.push(lore_note(&lore, text_model));
    if let StageOutcome::Enhanced(enhancement) = &lore {
        item.apply_lore(enhancement.clone());
    }

    let art = generate_art(services.image, &item, &config.image_dir, rng);
    match &art {
        StageOutcome::Enhanced(path) => {
            let image_model = services.image.map(|m| m.name()).unwrap_or_default();
            notes.push(format!(
                "🧙 Item art generated via {}. Saved to {}.",
                image_model,
                path.display()
            ));
            item.image_path = Some(path.clone());
        }
        StageOutcome::Skipped(reason) => notes.push(reason.clone()),
    }

    let card = Card::new(&item, &notes);
    reveal(out, &card.ansi_lines(), config.reveal_delay)?;

    let display = match &item.image_path {
        Some(path) => {
            writeln!(out)?;
            out.flush()?;
            let display = show_inline(config, path, services.runner);
            if config.inline_display {
                if let Some(reason) = display.skip_reason() {
                    print_lines(out, &[notice(fallback_notice(reason, path))])?;
                }
            }
            display
        }
        None => StageOutcome::skipped("no image to display"),
    };

    writeln!(out)?;
    print_lines(out, &[tip(), Line::default()])?;

    Ok(ForgeReport {
        item,
        card,
        notes,
        lore,
        art,
        display,
    })
}
