//! Image post-processing and inline display
//!
//! Both stages may shell out to external tools; they do so through
//! [`CommandRunner`] so a missing executable or failing exit is just a
//! skipped stage.

pub mod resize;
pub mod sixel;

use std::ffi::OsString;
use std::io;
use std::process::Command;

pub use resize::{resize_to_height, resized_path};
pub use sixel::{fallback_notice, show_inline, SIXEL_RENDERER};

/// Failure to run an external tool
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("`{0}` is not installed")]
    Missing(String),
    #[error("`{program}` exited with {status}")]
    Failed { program: String, status: String },
    #[error("failed to run `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Runs an external program to completion, inheriting stdio
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<(), ToolError>;
}

/// Runs real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<(), ToolError> {
        log::debug!("Running {} {:?}", program, args);

        match Command::new(program).args(args).status() {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(ToolError::Failed {
                program: program.to_string(),
                status: status.to_string(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ToolError::Missing(program.to_string())),
            Err(source) => Err(ToolError::Io {
                program: program.to_string(),
                source,
            }),
        }
    }
}
