// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Startup configuration.
//!
//! Values are layered, later layers winning: built-in defaults, a TOML file, `SEQNOTES_*`
//! environment variables, then command-line flags (applied by `main`).
//!
//! ```toml
//! mode = "script"          # or "labels"
//! export_dir = "exports"
//! seed_sample = false
//! log_file = "/tmp/seqnotes.log"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::format::{ExportMode, ParseExportModeError};

pub const ENV_MODE: &str = "SEQNOTES_MODE";
pub const ENV_EXPORT_DIR: &str = "SEQNOTES_EXPORT_DIR";

const LOCAL_CONFIG_FILE: &str = "seqnotes.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {source}")]
    InvalidEnv {
        key: &'static str,
        #[source]
        source: ParseExportModeError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub mode: ExportMode,
    pub export_dir: PathBuf,
    pub seed_sample: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ExportMode::default(),
            export_dir: PathBuf::from("."),
            seed_sample: true,
            log_file: None,
        }
    }
}

impl Config {
    /// Loads the file layer and the environment layer.
    ///
    /// An explicit `path` must exist and parse. Otherwise the first existing candidate from
    /// [`candidate_paths`] is used; a broken candidate is skipped with a warning.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_candidates(),
        };
        config.override_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    fn from_candidates() -> Self {
        for path in candidate_paths() {
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(config) => return config,
                Err(err) => warn!(error = %err, "ignoring config file"),
            }
        }
        Self::default()
    }

    /// Applies the `SEQNOTES_*` variables as returned by `lookup`.
    pub fn override_with(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(mode) = lookup(ENV_MODE) {
            self.mode = mode
                .parse()
                .map_err(|source| ConfigError::InvalidEnv { key: ENV_MODE, source })?;
        }
        if let Some(dir) = lookup(ENV_EXPORT_DIR) {
            self.export_dir = PathBuf::from(dir);
        }
        Ok(())
    }
}

/// Config files looked up when none is given, in priority order.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("seqnotes").join("config.toml"));
    }
    paths
}
