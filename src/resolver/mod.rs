// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Persistence resolution
//!
//! Turns a validated persistence mode into a [`PersistenceDescriptor`],
//! asking a [`RepoDiscovery`] for the Ecto repo when none was supplied.

mod scanner;

pub use scanner::ProjectRepoScanner;

use serde::Serialize;

use crate::errors::{InstallerError, InstallerResult};
use crate::options::{Persistence, ValidatedOptions};

/// Label shown when the operator has to pick a repo
pub const REPO_PROMPT: &str = "Which repo should be used to store feature flags?";

/// Resolved persistence backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "adapter", rename_all = "lowercase")]
pub enum PersistenceDescriptor {
    Ecto { repo: String, table_name: String },
    Redis,
}

impl PersistenceDescriptor {
    pub fn mode(&self) -> Persistence {
        match self {
            Self::Ecto { .. } => Persistence::Ecto,
            Self::Redis => Persistence::Redis,
        }
    }

    /// The repo module, for Ecto
    pub fn repo(&self) -> Option<&str> {
        match self {
            Self::Ecto { repo, .. } => Some(repo),
            Self::Redis => None,
        }
    }
}

/// Capability that picks one Ecto repo from the host project.
///
/// May block on an interactive choice.
pub trait RepoDiscovery {
    /// Return the chosen repo module, or `None` when there is nothing to choose
    fn discover_repo(&self, prompt: &str) -> Option<String>;
}

/// Discovery that always answers with a fixed value
#[derive(Debug, Clone, Default)]
pub struct FixedRepo(pub Option<String>);

impl FixedRepo {
    pub fn some(repo: impl Into<String>) -> Self {
        Self(Some(repo.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl RepoDiscovery for FixedRepo {
    fn discover_repo(&self, _prompt: &str) -> Option<String> {
        self.0.clone()
    }
}

/// Persistence resolver
pub struct PersistenceResolver<'a> {
    discovery: &'a dyn RepoDiscovery,
}

impl<'a> PersistenceResolver<'a> {
    pub fn new(discovery: &'a dyn RepoDiscovery) -> Self {
        Self { discovery }
    }

    /// Resolve the persistence descriptor for validated options
    pub fn resolve(&self, options: &ValidatedOptions) -> InstallerResult<PersistenceDescriptor> {
        match options.persistence {
            Persistence::Ecto => {
                let repo = match options.repo {
                    Some(ref repo) => repo.clone(),
                    None => {
                        tracing::debug!("No repo given, starting discovery");
                        self.discovery
                            .discover_repo(REPO_PROMPT)
                            .ok_or(InstallerError::NoRepoFound)?
                    }
                };

                Ok(PersistenceDescriptor::Ecto {
                    repo,
                    table_name: options.table_name.clone(),
                })
            }
            Persistence::Redis => {
                // repo and table_name only mean something to Ecto; accepted silently
                if options.repo.is_some() {
                    tracing::debug!("Ignoring repo for redis persistence");
                }
                Ok(PersistenceDescriptor::Redis)
            }
        }
    }
}
