// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Installer orchestration
//!
//! Runs validation, resolution, composition, migration generation and
//! notice composition in order. Only the first two stages can fail; a
//! failure ends the run without producing a plan.

use serde::Serialize;

use crate::errors::{InstallerError, InstallerResult};
use crate::options::{OptionValidator, Options, PubSub};
use crate::plan::{
    ConfigComposer, ConfigMutation, MigrationGenerator, MigrationSpec, Notice, NoticeComposer,
};
use crate::resolver::{PersistenceDescriptor, PersistenceResolver, RepoDiscovery};

/// Everything one run produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    pub persistence: PersistenceDescriptor,
    pub pubsub: PubSub,
    pub mutations: Vec<ConfigMutation>,
    /// Present exactly when persistence is Ecto
    pub migration: Option<MigrationSpec>,
    pub notices: Vec<Notice>,
}

/// Orchestrator states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Start,
    Validating,
    Resolving,
    Composing,
    Migrating,
    Notifying,
    Done,
    Failed { reason: String },
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Validating => write!(f, "validating"),
            Self::Resolving => write!(f, "resolving"),
            Self::Composing => write!(f, "composing"),
            Self::Migrating => write!(f, "migrating"),
            Self::Notifying => write!(f, "notifying"),
            Self::Done => write!(f, "done"),
            Self::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}

/// Installer orchestrator
pub struct Installer<'a> {
    discovery: &'a dyn RepoDiscovery,
    history: Vec<RunState>,
}

impl<'a> Installer<'a> {
    /// Create an installer that discovers repos through `discovery`
    pub fn new(discovery: &'a dyn RepoDiscovery) -> Self {
        Self {
            discovery,
            history: vec![RunState::Start],
        }
    }

    /// Current state
    pub fn state(&self) -> &RunState {
        self.history.last().unwrap_or(&RunState::Start)
    }

    /// Every state the last run passed through
    pub fn history(&self) -> &[RunState] {
        &self.history
    }

    /// Derive a fresh build plan from `options`
    pub fn run(&mut self, options: &Options) -> InstallerResult<BuildPlan> {
        self.history = vec![RunState::Start];

        self.enter(RunState::Validating);
        let validated = OptionValidator::validate(options).map_err(|e| self.fail(e))?;

        self.enter(RunState::Resolving);
        let persistence = PersistenceResolver::new(self.discovery)
            .resolve(&validated)
            .map_err(|e| self.fail(e))?;

        self.enter(RunState::Composing);
        let mutations = ConfigComposer::compose(&persistence, validated.pubsub);

        let migration = match persistence {
            PersistenceDescriptor::Ecto { ref table_name, .. } => {
                self.enter(RunState::Migrating);
                Some(MigrationGenerator::generate(table_name))
            }
            PersistenceDescriptor::Redis => None,
        };

        self.enter(RunState::Notifying);
        let notices = NoticeComposer::compose(&persistence, validated.pubsub);

        self.enter(RunState::Done);
        tracing::info!(
            "Planned {} mutation(s) for {} persistence{}",
            mutations.len(),
            persistence.mode(),
            if migration.is_some() { " with migration" } else { "" }
        );

        Ok(BuildPlan {
            persistence,
            pubsub: validated.pubsub,
            mutations,
            migration,
            notices,
        })
    }

    fn enter(&mut self, state: RunState) {
        tracing::debug!("{} -> {}", self.state(), state);
        self.history.push(state);
    }

    fn fail(&mut self, error: InstallerError) -> InstallerError {
        self.enter(RunState::Failed {
            reason: error.to_string(),
        });
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{MutationMode, UNIQUE_INDEX_NAME};
    use crate::resolver::FixedRepo;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_invalid_persistence_fails_in_validation() {
        let discovery = FixedRepo::some("MyApp.Repo");
        let mut installer = Installer::new(&discovery);

        let err = installer
            .run(&Options::default().with_persistence("mnesia"))
            .unwrap_err();

        assert!(matches!(err, InstallerError::InvalidOption { ref field, .. } if field == "persistence"));
        assert_eq!(
            &installer.history()[..2],
            &[RunState::Start, RunState::Validating]
        );
        assert!(matches!(installer.state(), RunState::Failed { .. }));
    }

    #[test]
    fn test_no_repo_fails_in_resolution() {
        let discovery = FixedRepo::none();
        let mut installer = Installer::new(&discovery);

        let err = installer.run(&Options::default()).unwrap_err();

        assert!(matches!(err, InstallerError::NoRepoFound));
        assert_eq!(installer.history().len(), 4);
        assert_eq!(installer.history()[2], RunState::Resolving);
    }

    #[test]
    fn test_ecto_run_visits_every_state() {
        let discovery = FixedRepo::none();
        let mut installer = Installer::new(&discovery);

        let plan = installer
            .run(&Options::default().with_repo("MyApp.Repo"))
            .unwrap();

        assert_eq!(
            installer.history(),
            &[
                RunState::Start,
                RunState::Validating,
                RunState::Resolving,
                RunState::Composing,
                RunState::Migrating,
                RunState::Notifying,
                RunState::Done,
            ]
        );

        let migration = plan.migration.expect("ecto plans carry a migration");
        assert_eq!(migration.table_name, "fun_with_flags_toggles");
        assert_eq!(migration.indexes[1].name.as_deref(), Some(UNIQUE_INDEX_NAME));
        assert_eq!(plan.persistence.repo(), Some("MyApp.Repo"));
    }

    #[test]
    fn test_redis_run_skips_migrating() {
        let discovery = FixedRepo::none();
        let mut installer = Installer::new(&discovery);

        let plan = installer
            .run(&Options::default().with_persistence("redis").with_pubsub("redis"))
            .unwrap();

        assert!(plan.migration.is_none());
        assert!(!installer.history().contains(&RunState::Migrating));
        assert_eq!(installer.state(), &RunState::Done);
        assert_eq!(plan.mutations[1].mode, MutationMode::SetIfAbsent);
    }

    #[test]
    fn test_rerun_resets_history() {
        let discovery = FixedRepo::some("Found.Repo");
        let mut installer = Installer::new(&discovery);

        installer.run(&Options::default().with_pubsub("nats")).unwrap_err();
        let plan = installer.run(&Options::default()).unwrap();

        assert_eq!(plan.persistence.repo(), Some("Found.Repo"));
        assert_eq!(installer.history()[0], RunState::Start);
        assert!(!installer
            .history()
            .iter()
            .any(|s| matches!(s, RunState::Failed { .. })));
    }
}
