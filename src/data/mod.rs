//! Content tables for the item forge
//!
//! Built-in tables live in [`tables`]; [`loader`] lets a RON file replace
//! them, falling back to the built-ins when the file is missing or broken.

pub mod loader;
pub mod tables;
pub mod weighted;

use std::io;
use std::path::PathBuf;

pub use loader::default_tables_path;
pub use tables::{EffectTables, ItemTypeDef, TableSet};
pub use weighted::{Weighted, WeightedTable};

/// Malformed table data
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("table is empty")]
    Empty,
    #[error("invalid weights: {0}")]
    Weights(String),
    #[error("table `{0}` contains a blank entry")]
    BlankEntry(String),
    #[error("table `{table}`: {source}")]
    InTable {
        table: String,
        #[source]
        source: Box<TableError>,
    },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

impl TableError {
    /// Attach the name of the offending table
    pub fn in_table(self, table: &str) -> Self {
        TableError::InTable {
            table: table.to_string(),
            source: Box::new(self),
        }
    }
}
