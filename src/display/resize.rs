//! Resize generated art to the configured display height
//!
//! Tries the in-process image library first, then ImageMagick.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use image::{imageops::FilterType, GenericImageView, ImageFormat};

use crate::stage::{StageError, StageOutcome};
use super::{CommandRunner, ToolError};

/// ImageMagick entry points, newest first
const RESIZE_TOOLS: [&str; 2] = ["magick", "convert"];

/// `<dir>/<stem>_h<height>.png`
pub fn resized_path(path: &Path, height: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    path.with_file_name(format!("{}_h{}.png", stem, height))
}

/// Width that keeps the aspect ratio at `target_height`
pub fn scaled_width(width: u32, height: u32, target_height: u32) -> u32 {
    let scaled = f64::from(width) * f64::from(target_height) / f64::from(height);
    (scaled.round() as u32).max(1)
}

/// What the in-process resize did
enum LibraryResize {
    Resized,
    AlreadyFits(u32),
}

fn resize_with_library(src: &Path, dst: &Path, height: u32) -> Result<LibraryResize, StageError> {
    let img = image::open(src)?;
    let (w, h) = img.dimensions();
    if h <= height {
        return Ok(LibraryResize::AlreadyFits(h));
    }

    let resized = img.resize_exact(scaled_width(w, h, height), height, FilterType::Lanczos3);
    resized.save_with_format(dst, ImageFormat::Png)?;
    Ok(LibraryResize::Resized)
}

fn resize_with_tool(src: &Path, dst: &Path, height: u32, runner: &dyn CommandRunner) -> Result<(), ToolError> {
    let args: Vec<OsString> = vec![
        src.as_os_str().to_owned(),
        "-resize".into(),
        format!("x{}", height).into(),
        dst.as_os_str().to_owned(),
    ];

    let mut last_err = None;
    for tool in RESIZE_TOOLS {
        match runner.run(tool, &args) {
            Ok(()) if dst.exists() => return Ok(()),
            Ok(()) => {
                last_err = Some(ToolError::Failed {
                    program: tool.to_string(),
                    status: "success but wrote no file".to_string(),
                })
            }
            Err(e) => {
                log::debug!("{}", e);
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| ToolError::Missing(RESIZE_TOOLS.join("/"))))
}

/// Resize `path` to `height` pixels, preserving aspect ratio.
///
/// `Enhanced` carries the resized file; on `Skipped` the caller should keep
/// using the original.
pub fn resize_to_height(path: &Path, height: u32, runner: &dyn CommandRunner) -> StageOutcome<PathBuf> {
    let dst = resized_path(path, height);

    match resize_with_library(path, &dst, height) {
        Ok(LibraryResize::Resized) => {
            log::debug!("Resized {:?} to {}px in process", path, height);
            return StageOutcome::Enhanced(dst);
        }
        Ok(LibraryResize::AlreadyFits(h)) => {
            return StageOutcome::skipped(format!("image is already {}px high", h));
        }
        Err(e) => log::info!("In-process resize failed ({}), trying ImageMagick", e),
    }

    match resize_with_tool(path, &dst, height, runner) {
        Ok(()) => {
            log::debug!("Resized {:?} to {}px with ImageMagick", path, height);
            StageOutcome::Enhanced(dst)
        }
        Err(e) => {
            log::warn!("Could not resize {:?}: {}", path, e);
            StageOutcome::skipped(format!("resize unavailable: {}", e))
        }
    }
}
