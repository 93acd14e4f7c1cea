//! Styled text to terminal output
//!
//! Cards and banners are built as ratatui [`Line`]s so widths account for
//! wide glyphs; this module turns them into ANSI strings via crossterm.

use crossterm::style::{Attribute, Color as TermColor, ContentStyle, StyledContent};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Palette shared by the card and banner
pub mod palette {
    use ratatui::style::Color;

    pub const BORDER: Color = Color::LightBlue;
    pub const LABEL: Color = Color::LightCyan;
    pub const NAME: Color = Color::LightYellow;
    pub const SECTION: Color = Color::LightMagenta;
    pub const MUTED: Color = Color::DarkGray;
    pub const PROMPT: Color = Color::LightGreen;

    /// Colors cycled across the banner title
    pub const GRADIENT: [Color; 6] = [
        Color::LightMagenta,
        Color::LightBlue,
        Color::LightCyan,
        Color::LightGreen,
        Color::LightYellow,
        Color::LightRed,
    ];
}

/// Bold foreground style
pub fn bold(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Dim foreground style
pub fn dim(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::DIM)
}

/// Bold label followed by plain text, e.g. "Type: runed steel sword"
pub fn labeled(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), bold(palette::LABEL)),
        Span::raw(value.into()),
    ])
}

/// Apply a gradient across each character of `text`
pub fn gradient(text: &str) -> Line<'static> {
    let spans: Vec<Span<'static>> = text
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            let color = palette::GRADIENT[i % palette::GRADIENT.len()];
            Span::styled(ch.to_string(), bold(color))
        })
        .collect();
    Line::from(spans)
}

/// Render a line with ANSI escapes
pub fn to_ansi(line: &Line) -> String {
    line.spans
        .iter()
        .map(|span| {
            let style = line.style.patch(span.style);
            StyledContent::new(content_style(style), span.content.as_ref()).to_string()
        })
        .collect()
}

/// Render a line without any escapes
pub fn to_plain(line: &Line) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

fn content_style(style: Style) -> ContentStyle {
    let mut out = ContentStyle::new();
    out.foreground_color = style.fg.map(term_color);
    out.background_color = style.bg.map(term_color);
    if style.add_modifier.contains(Modifier::BOLD) {
        out.attributes.set(Attribute::Bold);
    }
    if style.add_modifier.contains(Modifier::DIM) {
        out.attributes.set(Attribute::Dim);
    }
    if style.add_modifier.contains(Modifier::ITALIC) {
        out.attributes.set(Attribute::Italic);
    }
    out
}

/// Map ratatui's ANSI names onto crossterm's (their "light"/"dark" naming differs)
fn term_color(color: Color) -> TermColor {
    match color {
        Color::Reset => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::LightRed => TermColor::Red,
        Color::LightGreen => TermColor::Green,
        Color::LightYellow => TermColor::Yellow,
        Color::LightBlue => TermColor::Blue,
        Color::LightMagenta => TermColor::Magenta,
        Color::LightCyan => TermColor::Cyan,
        Color::White => TermColor::White,
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::Indexed(i) => TermColor::AnsiValue(i),
    }
}
