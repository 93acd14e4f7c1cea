//! Terminal presentation: banner, line-by-line reveal, closing tip

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{cursor::MoveTo, execute, terminal::{Clear, ClearType}};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::style::{bold, dim, gradient, palette, to_ansi};

/// Which entry point is printing the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Local,
    Enhanced,
}

/// Banner lines shown above each card
pub fn banner(kind: BannerKind) -> Vec<Line<'static>> {
    let (title, subtitle) = match kind {
        BannerKind::Local => ("⚔️ ARCANE ARMORY ⚔️", "🎲 A Tiny D&D Fantasy Item Forge 🎲"),
        BannerKind::Enhanced => (
            "⚔️ ARCANE ARMORY (AI-ENHANCED) ⚔️",
            "🎲 D&D Item Forge + Lore Booster 🤖",
        ),
    };

    let title_line = gradient(title);
    let rule = "═".repeat(title_line.width());

    let mut lines = vec![
        Line::default(),
        indent(title_line),
        indent(Line::from(Span::styled(rule, Style::default().fg(palette::MUTED)))),
        Line::default(),
        indent(Line::from(Span::styled(subtitle, bold(palette::LABEL)))),
    ];
    if kind == BannerKind::Enhanced {
        lines.push(indent(Line::from(Span::styled(
            "Note: Set OPENAI_API_KEY for AI-enhanced lore.",
            Style::default().fg(palette::MUTED),
        ))));
    }
    lines.push(Line::default());
    lines
}

fn indent(mut line: Line<'static>) -> Line<'static> {
    line.spans.insert(0, Span::raw("  "));
    line
}

/// Closing hint printed after every card
pub fn tip() -> Line<'static> {
    Line::from(vec![
        Span::styled("💡 Tip: ", bold(palette::MUTED)),
        Span::styled(
            "Use this as inspiration; tweak stats to fit your table.",
            Style::default().fg(palette::MUTED),
        ),
    ])
}

/// One-line notice in the muted style
pub fn notice(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), dim(palette::MUTED)))
}

/// Prompt shown by the interactive forge loop
pub fn prompt(kind: BannerKind) -> Line<'static> {
    let text = match kind {
        BannerKind::Local => "✨ [Enter] forge item  |  'q' quit > ",
        BannerKind::Enhanced => "✨ [Enter] forge AI-boosted item  |  'q' quit > ",
    };
    Line::from(Span::styled(text, bold(palette::PROMPT)))
}

/// Parting line when the interactive loop ends
pub fn farewell(kind: BannerKind) -> Line<'static> {
    let text = match kind {
        BannerKind::Local => "May your loot be ever shiny. Farewell! 🪙✨",
        BannerKind::Enhanced => "May your loot be ever shiny. Farewell! 🧵✨",
    };
    Line::from(Span::styled(text, Style::default().fg(palette::LABEL)))
}

/// Parting line when the user interrupts the loop with Ctrl-C
pub fn interrupted() -> Line<'static> {
    Line::from(Span::styled(
        "Interrupted by user. May your dice roll high! 🎲",
        Style::default().fg(palette::LABEL),
    ))
}

/// Print styled lines at once
pub fn print_lines(out: &mut impl Write, lines: &[Line<'_>]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", to_ansi(line))?;
    }
    out.flush()
}

/// Print lines one at a time with a short pause between them.
///
/// Purely cosmetic; a zero delay prints everything immediately.
pub fn reveal(out: &mut impl Write, lines: &[String], delay: Duration) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
        if !delay.is_zero() {
            out.flush()?;
            thread::sleep(delay);
        }
    }
    out.flush()
}

/// Clear the terminal and home the cursor
pub fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}
