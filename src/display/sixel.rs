//! Inline image display through `img2sixel`

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::stage::StageOutcome;
use super::{resize_to_height, CommandRunner};

/// External sixel encoder
pub const SIXEL_RENDERER: &str = "img2sixel";

/// One-line notice printed when the art can't be shown inline
pub fn fallback_notice(reason: &str, image: &Path) -> String {
    format!(
        "🖼️ Inline preview unavailable ({}); open {} to view the art.",
        reason,
        image.display()
    )
}

/// Print `image` inline after resizing it to the configured height.
///
/// Returns the file that was rendered. Disabled display makes no external
/// calls at all.
pub fn show_inline(config: &Config, image: &Path, runner: &dyn CommandRunner) -> StageOutcome<PathBuf> {
    if !config.inline_display {
        log::debug!("Inline display disabled");
        return StageOutcome::skipped("inline display disabled");
    }

    let shown = match resize_to_height(image, config.image_height, runner) {
        StageOutcome::Enhanced(resized) => resized,
        StageOutcome::Skipped(reason) => {
            log::debug!("Showing original image: {}", reason);
            image.to_path_buf()
        }
    };

    match runner.run(SIXEL_RENDERER, &[OsString::from(shown.as_os_str())]) {
        Ok(()) => StageOutcome::Enhanced(shown),
        Err(e) => {
            log::info!("Inline display failed: {}", e);
            StageOutcome::skipped(e.to_string())
        }
    }
}
