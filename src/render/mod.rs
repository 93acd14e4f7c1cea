//! Terminal rendering
//!
//! - `card`: the framed item card
//! - `reveal`: banner, tip, and the line-by-line reveal
//! - `style`: ratatui lines to ANSI strings

pub mod card;
pub mod reveal;
pub mod style;

pub use card::{Card, WRAP_WIDTH};
pub use reveal::{banner, clear_screen, farewell, interrupted, notice, print_lines, prompt, reveal, tip, BannerKind};
