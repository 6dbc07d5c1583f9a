// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Installer options
//!
//! Raw options arrive as strings from flags, environment and option files.
//! [`OptionValidator`] turns them into [`ValidatedOptions`] carrying closed
//! enums, which is what every later stage consumes.

mod loader;
mod validation;

pub use loader::{OptionsLoader, PartialOptions, PROJECT_OPTIONS_FILE};
pub use validation::OptionValidator;

use serde::{Deserialize, Serialize};

/// Default table used by the Ecto persistence adapter
pub const DEFAULT_TABLE_NAME: &str = "fun_with_flags_toggles";

/// Raw, unvalidated installer options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Persistence adapter name
    #[serde(default = "default_persistence")]
    pub persistence: String,

    /// Pub/sub adapter name for cache-busting notifications
    #[serde(default = "default_pubsub")]
    pub pubsub: String,

    /// Ecto repo module, discovered when absent
    #[serde(default)]
    pub repo: Option<String>,

    /// Table name for the Ecto adapter
    #[serde(default = "default_table_name")]
    pub table_name: String,
}

fn default_persistence() -> String {
    Persistence::Ecto.as_str().to_string()
}

fn default_pubsub() -> String {
    PubSub::Phoenix.as_str().to_string()
}

fn default_table_name() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

impl Default for Options {
    fn default() -> Self {
        Self {
            persistence: default_persistence(),
            pubsub: default_pubsub(),
            repo: None,
            table_name: default_table_name(),
        }
    }
}

impl Options {
    /// Set the persistence adapter
    pub fn with_persistence(mut self, persistence: impl Into<String>) -> Self {
        self.persistence = persistence.into();
        self
    }

    /// Set the pub/sub adapter
    pub fn with_pubsub(mut self, pubsub: impl Into<String>) -> Self {
        self.pubsub = pubsub.into();
        self
    }

    /// Set the Ecto repo
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Set the Ecto table name
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }
}

/// Storage backend for flag state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persistence {
    /// Relational storage through an Ecto repo
    Ecto,
    /// Redis storage
    Redis,
}

impl Persistence {
    /// Every accepted persistence name
    pub const NAMES: &'static [&'static str] = &["ecto", "redis"];

    /// Parse an exact persistence name
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ecto" => Some(Self::Ecto),
            "redis" => Some(Self::Redis),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ecto => "ecto",
            Self::Redis => "redis",
        }
    }
}

impl std::fmt::Display for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transport used to broadcast cache-invalidation events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PubSub {
    /// Phoenix.PubSub, client supplied by the host application
    Phoenix,
    /// Redis pub/sub
    Redis,
}

impl PubSub {
    /// Every accepted pub/sub name
    pub const NAMES: &'static [&'static str] = &["phoenix", "redis"];

    /// Parse an exact pub/sub name
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "phoenix" => Some(Self::Phoenix),
            "redis" => Some(Self::Redis),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phoenix => "phoenix",
            Self::Redis => "redis",
        }
    }
}

impl std::fmt::Display for PubSub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options after enum validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOptions {
    pub persistence: Persistence,
    pub pubsub: PubSub,
    pub repo: Option<String>,
    pub table_name: String,
}
