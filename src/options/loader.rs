// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Layered option loading
//!
//! Precedence, lowest first: built-in defaults, the user options file,
//! the project options file, then overrides from environment and flags.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::{InstallerError, InstallerResult};
use crate::options::Options;

/// Project-level options file name
pub const PROJECT_OPTIONS_FILE: &str = ".fwf.toml";

/// A sparse set of options from one layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialOptions {
    pub persistence: Option<String>,
    pub pubsub: Option<String>,
    pub repo: Option<String>,
    pub table_name: Option<String>,
}

impl PartialOptions {
    /// Overlay `higher` on top of `self`
    pub fn merge(self, higher: PartialOptions) -> Self {
        Self {
            persistence: higher.persistence.or(self.persistence),
            pubsub: higher.pubsub.or(self.pubsub),
            repo: higher.repo.or(self.repo),
            table_name: higher.table_name.or(self.table_name),
        }
    }

    /// Fill the gaps with defaults
    pub fn into_options(self) -> Options {
        let defaults = Options::default();

        Options {
            persistence: self.persistence.unwrap_or(defaults.persistence),
            pubsub: self.pubsub.unwrap_or(defaults.pubsub),
            repo: self.repo.or(defaults.repo),
            table_name: self.table_name.unwrap_or(defaults.table_name),
        }
    }

    /// Parse an options file, TOML unless the extension says YAML
    pub fn from_file(path: &Path) -> InstallerResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| InstallerError::FileReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(Into::into),
            _ => toml::from_str(&content).map_err(Into::into),
        }
    }
}

/// Resolves [`Options`] from every configured layer
#[derive(Debug, Clone)]
pub struct OptionsLoader {
    project_root: PathBuf,
    user_file: Option<PathBuf>,
    explicit_file: Option<PathBuf>,
}

impl OptionsLoader {
    /// Create a loader for a project, with the user file in the platform config dir
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let user_file = ProjectDirs::from("", "", "fwf-install")
            .map(|dirs| dirs.config_dir().join("options.toml"));

        Self {
            project_root: project_root.into(),
            user_file,
            explicit_file: None,
        }
    }

    /// Ignore the user-level options file
    pub fn without_user_file(mut self) -> Self {
        self.user_file = None;
        self
    }

    /// Use this file instead of `.fwf.toml`; it must exist
    pub fn with_options_file(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_file = path;
        self
    }

    /// Load and merge all layers, with `overrides` on top
    pub fn load(&self, overrides: PartialOptions) -> InstallerResult<Options> {
        let mut merged = PartialOptions::default();

        if let Some(ref user_file) = self.user_file {
            if user_file.exists() {
                tracing::debug!("Loading user options from {}", user_file.display());
                merged = merged.merge(PartialOptions::from_file(user_file)?);
            }
        }

        match self.explicit_file {
            Some(ref file) => {
                tracing::debug!("Loading options from {}", file.display());
                merged = merged.merge(PartialOptions::from_file(file)?);
            }
            None => {
                let project_file = self.project_root.join(PROJECT_OPTIONS_FILE);
                if project_file.exists() {
                    tracing::debug!("Loading project options from {}", project_file.display());
                    merged = merged.merge(PartialOptions::from_file(&project_file)?);
                }
            }
        }

        Ok(merged.merge(overrides).into_options())
    }
}
