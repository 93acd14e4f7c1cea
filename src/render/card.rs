//! Item card rendering
//!
//! Builds the framed card for an [`ItemRecord`]. Output depends only on the
//! record and the notes passed in.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::items::ItemRecord;
use super::style::{bold, dim, labeled, palette, to_ansi, to_plain};

/// Column width long paragraphs are wrapped to
pub const WRAP_WIDTH: usize = 70;

/// A rendered item card
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub lines: Vec<Line<'static>>,
}

impl Card {
    /// Build the card for `item`. Non-empty `notes` are joined into a single
    /// dim line printed beneath the frame.
    pub fn new(item: &ItemRecord, notes: &[String]) -> Self {
        let mut lines = framed(card_body(item), Style::default().fg(palette::BORDER));

        let notes: Vec<&str> = notes
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .collect();
        if !notes.is_empty() {
            lines.push(Line::from(Span::styled(notes.join(" "), dim(palette::MUTED))));
        }

        Self { lines }
    }

    pub fn ansi_lines(&self) -> Vec<String> {
        self.lines.iter().map(to_ansi).collect()
    }

    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(to_plain).collect()
    }
}

/// The unframed card content
pub fn card_body(item: &ItemRecord) -> Vec<Line<'static>> {
    let (r, g, b) = item.rarity.color();
    let rarity = Span::styled(
        format!("{} {}", item.rarity.emoji(), item.rarity.name()),
        bold(Color::Rgb(r, g, b)),
    );

    let mut body = vec![
        Line::from(Span::styled(item.name.clone(), bold(palette::NAME))),
        Line::from(vec![Span::styled("Rarity: ", bold(palette::LABEL)), rarity]),
        labeled("Type", item.type_line()),
        Line::default(),
        labeled("Mechanic", item.mechanical_effect.clone()),
        labeled("Attunement", item.attunement.clone()),
        Line::default(),
    ];

    let lore = match &item.enhanced_lore {
        Some(lore) => lore.clone(),
        None => format!(
            "Forged origin: {}. Its magic is such that {}.",
            item.origin, item.enchantment
        ),
    };
    let quirk = match &item.enhanced_quirk {
        Some(quirk) => quirk.clone(),
        None => format!("Quirk: {}.", item.quirk),
    };

    section(&mut body, "📜 Lore:", &lore);
    body.push(Line::default());
    section(&mut body, "✨ Oddities:", &quirk);

    if let Some(note) = item.mechanical_note.as_deref().filter(|n| !n.trim().is_empty()) {
        body.push(Line::default());
        section(&mut body, "⚖️ GM Note:", note);
    }

    body
}

fn section(body: &mut Vec<Line<'static>>, heading: &str, text: &str) {
    body.push(Line::from(Span::styled(heading.to_string(), bold(palette::SECTION))));
    body.extend(wrap(text, WRAP_WIDTH).into_iter().map(Line::from));
}

/// Draw a box around `lines`, padding each to the widest line
pub fn framed(lines: Vec<Line<'static>>, border: Style) -> Vec<Line<'static>> {
    let width = lines.iter().map(Line::width).max().unwrap_or(0);
    let rule = "─".repeat(width + 2);

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(Line::from(Span::styled(format!("┌{}┐", rule), border)));
    for line in lines {
        let pad = width - line.width();
        let mut spans = vec![Span::styled("│ ", border)];
        spans.extend(line.spans);
        spans.push(Span::raw(" ".repeat(pad + 1)));
        spans.push(Span::styled("│", border));
        out.push(Line::from(spans));
    }
    out.push(Line::from(Span::styled(format!("└{}┘", rule), border)));
    out
}

/// Greedy word wrap by display width. Words wider than `width` get a line
/// of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = Span::raw(word).width();
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemCategory, LoreEnhancement, Rarity, Theme};

    fn sample() -> ItemRecord {
        ItemRecord {
            name: "Rare runed steel sword".into(),
            rarity: Rarity::Rare,
            item_type: "sword".into(),
            category: ItemCategory::Weapon,
            material: "steel".into(),
            quality: "runed".into(),
            enchantment: "it hums softly when danger is near".into(),
            origin: "crafted by a forgotten archmage".into(),
            quirk: "occasionally changes weight at random".into(),
            theme: Theme::Arcane,
            mechanical_effect: "+2 bonus to attack and damage rolls".into(),
            attunement_required: true,
            attunement: "Attunement required".into(),
            enhanced_lore: None,
            enhanced_quirk: None,
            mechanical_note: None,
            image_path: None,
        }
    }

    #[test]
    fn test_card_is_deterministic() {
        let item = sample();
        assert_eq!(Card::new(&item, &[]), Card::new(&item, &[]));
        assert_eq!(Card::new(&item, &[]).ansi_lines(), Card::new(&item, &[]).ansi_lines());
    }

    #[test]
    fn test_card_contains_base_fields() {
        let text = Card::new(&sample(), &[]).plain_lines().join("\n");
        assert!(text.contains("Rare runed steel sword"));
        assert!(text.contains("🔵 Rare"));
        assert!(text.contains("Type: runed steel sword"));
        assert!(text.contains("Mechanic: +2 bonus to attack and damage rolls"));
        assert!(text.contains("Attunement: Attunement required"));
        assert!(text.contains("Forged origin: crafted by a forgotten archmage."));
        assert!(text.contains("Quirk: occasionally changes weight at random."));
        assert!(!text.contains("GM Note"));
    }

    #[test]
    fn test_frame_lines_share_width() {
        let card = Card::new(&sample(), &[]);
        let widths: Vec<usize> = card.lines.iter().map(Line::width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{:?}", widths);
        assert!(card.plain_lines()[0].starts_with('┌'));
        assert!(card.plain_lines().last().unwrap().starts_with('└'));
    }

    #[test]
    fn test_notes_add_one_line_below_frame() {
        let item = sample();
        let base = Card::new(&item, &[]).plain_lines();
        let noted = Card::new(&item, &["first".into(), "".into(), "second".into()]).plain_lines();

        assert_eq!(noted.len(), base.len() + 1);
        assert_eq!(&noted[..base.len()], &base[..]);
        assert_eq!(noted.last().unwrap(), "first second");
    }

    #[test]
    fn test_enhanced_fields_replace_base_text() {
        let mut item = sample();
        item.apply_lore(LoreEnhancement {
            name: Some("Whisperfang".into()),
            lore: "Forged for a queen who never wore it.".into(),
            quirk: "It sighs when sheathed.".into(),
            mechanical_note: "Treat as a +2 longsword.".into(),
        });

        let text = Card::new(&item, &[]).plain_lines().join("\n");
        assert!(text.contains("Whisperfang"));
        assert!(text.contains("Forged for a queen who never wore it."));
        assert!(text.contains("It sighs when sheathed."));
        assert!(text.contains("⚖️ GM Note:"));
        assert!(!text.contains("Forged origin:"));
        // Base mechanics stay on the card
        assert!(text.contains("Type: runed steel sword"));
    }

    #[test]
    fn test_wrap() {
        let lines = wrap("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
        assert!(wrap("", 10).is_empty());
        assert_eq!(wrap("supercalifragilistic", 5), vec!["supercalifragilistic"]);
    }

    #[test]
    fn test_wrap_counts_wide_glyphs() {
        // Each word is 3 chars but 6 columns wide
        assert_eq!(wrap("剣の魂 龍の牙", 8), vec!["剣の魂", "龍の牙"]);

        let lore = "古い剣は夜に歌う。 ".repeat(20);
        for line in wrap(&lore, WRAP_WIDTH) {
            assert!(Span::raw(line.as_str()).width() <= WRAP_WIDTH, "{}", line);
        }
    }
}
