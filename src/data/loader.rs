//! RON table loader
//!
//! Loads content tables from an external RON file, with fallback to the
//! built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::{TableError, TableSet};

/// Where the forge looks for `tables.ron` when no path is configured
pub fn default_tables_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "arcane-armory", "ArcaneArmory")
        .map(|dirs| dirs.config_dir().join("tables.ron"))
}

impl TableSet {
    /// Load tables from `path` (or the default location), else the built-ins.
    ///
    /// Only a defect in the built-in tables is an error; a missing or
    /// malformed override file logs a warning and is ignored.
    pub fn load(path: Option<&Path>) -> Result<Self, TableError> {
        let builtin = Self::builtin()?;
        builtin.validate()?;

        let explicit = path.is_some();
        let Some(path) = path.map(Path::to_path_buf).or_else(default_tables_path) else {
            return Ok(builtin);
        };

        if !path.exists() {
            if explicit {
                log::warn!("Table file {:?} not found, using built-in tables", path);
            }
            return Ok(builtin);
        }

        match Self::from_file(&path) {
            Ok(tables) => {
                log::info!("Tables loaded from {:?}", path);
                Ok(tables)
            }
            Err(e) => {
                log::warn!("{}. Using built-in tables", e);
                Ok(builtin)
            }
        }
    }

    /// Parse and validate a RON table file
    pub fn from_file(path: &Path) -> Result<Self, TableError> {
        let content = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tables: TableSet = ron::from_str(&content).map_err(|source| TableError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tables.validate()?;
        Ok(tables)
    }
}
