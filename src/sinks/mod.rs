// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Output sinks
//!
//! A [`BuildPlan`] is pure data. Sinks are where it lands: a structured
//! config document, migration files on disk, and the operator's terminal.

mod document;
mod migration;
mod notices;

pub use document::{ConfigDocument, DocumentFormat};
pub use migration::FsMigrationSink;
pub use notices::TerminalNotices;

use crate::errors::InstallerResult;
use crate::plan::{BuildPlan, ConfigMutation, ExistencePolicy, MigrationSpec, Notice, MIGRATION_NAME};

/// Receives configuration mutations
pub trait ConfigSink {
    /// Apply one mutation; `true` when the document changed
    fn apply(&mut self, mutation: &ConfigMutation) -> InstallerResult<bool>;
}

/// Receives generated migrations
pub trait MigrationSink {
    /// Write the migration; `true` when a file was created
    fn write(
        &mut self,
        spec: &MigrationSpec,
        name: &str,
        policy: ExistencePolicy,
    ) -> InstallerResult<bool>;
}

/// Receives notices in order
pub trait NoticeSink {
    fn emit(&mut self, notice: &Notice);
}

impl NoticeSink for Vec<Notice> {
    fn emit(&mut self, notice: &Notice) {
        self.push(notice.clone());
    }
}

/// What applying a plan did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Keys whose value changed
    pub changed: Vec<String>,
    /// Keys left as they were
    pub unchanged: Vec<String>,
    /// Whether a migration file was created; `None` when the plan had none
    pub migration_created: Option<bool>,
}

/// Push a plan through the sinks: mutations, then migration, then notices
pub fn apply_plan(
    plan: &BuildPlan,
    config: &mut dyn ConfigSink,
    migrations: &mut dyn MigrationSink,
    notices: &mut dyn NoticeSink,
) -> InstallerResult<ApplyReport> {
    let mut report = apply_mutations(plan, config)?;
    report.migration_created = write_migration(plan, migrations)?;
    emit_notices(plan, notices);

    Ok(report)
}

/// Apply every mutation in order; the report has no migration outcome yet
pub fn apply_mutations(
    plan: &BuildPlan,
    config: &mut dyn ConfigSink,
) -> InstallerResult<ApplyReport> {
    let mut report = ApplyReport::default();

    for mutation in &plan.mutations {
        let key = mutation.key_path.join(".");
        if config.apply(mutation)? {
            tracing::debug!("Applied {}", key);
            report.changed.push(key);
        } else {
            tracing::debug!("Left {} unchanged", key);
            report.unchanged.push(key);
        }
    }

    Ok(report)
}

/// Write the plan's migration, if it has one; `None` when it has not
pub fn write_migration(
    plan: &BuildPlan,
    migrations: &mut dyn MigrationSink,
) -> InstallerResult<Option<bool>> {
    let Some(ref spec) = plan.migration else {
        return Ok(None);
    };

    let created = migrations.write(spec, MIGRATION_NAME, ExistencePolicy::SkipIfExists)?;
    if !created {
        tracing::info!("Migration {} already exists, skipped", MIGRATION_NAME);
    }
    Ok(Some(created))
}

pub fn emit_notices(plan: &BuildPlan, notices: &mut dyn NoticeSink) {
    for notice in &plan.notices {
        notices.emit(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::plan::Installer;
    use crate::resolver::FixedRepo;

    /// Remembers what it was asked to write
    #[derive(Default)]
    struct RecordingMigrations {
        written: Vec<(String, String, ExistencePolicy)>,
        exists: bool,
    }

    impl MigrationSink for RecordingMigrations {
        fn write(
            &mut self,
            spec: &MigrationSpec,
            name: &str,
            policy: ExistencePolicy,
        ) -> InstallerResult<bool> {
            self.written
                .push((spec.table_name.clone(), name.to_string(), policy));
            Ok(!self.exists)
        }
    }

    fn plan(options: Options) -> BuildPlan {
        let discovery = FixedRepo::none();
        Installer::new(&discovery).run(&options).unwrap()
    }

    #[test]
    fn test_apply_ecto_plan() {
        let plan = plan(Options::default().with_repo("MyApp.Repo"));
        let mut document = ConfigDocument::new();
        let mut migrations = RecordingMigrations::default();
        let mut notices: Vec<Notice> = Vec::new();

        let report = apply_plan(&plan, &mut document, &mut migrations, &mut notices).unwrap();

        assert_eq!(report.changed.len(), 3);
        assert!(report.unchanged.is_empty());
        assert_eq!(report.migration_created, Some(true));
        assert_eq!(
            migrations.written,
            vec![(
                "fun_with_flags_toggles".to_string(),
                MIGRATION_NAME.to_string(),
                ExistencePolicy::SkipIfExists
            )]
        );
        assert_eq!(notices, plan.notices);
    }

    #[test]
    fn test_reapplying_leaves_everything_unchanged() {
        let plan = plan(Options::default().with_persistence("redis"));
        let mut document = ConfigDocument::new();
        let mut migrations = RecordingMigrations::default();
        let mut notices: Vec<Notice> = Vec::new();

        apply_plan(&plan, &mut document, &mut migrations, &mut notices).unwrap();
        let second = apply_plan(&plan, &mut document, &mut migrations, &mut notices).unwrap();

        assert!(second.changed.is_empty());
        assert_eq!(second.unchanged.len(), 4);
        assert_eq!(second.migration_created, None);
        assert!(migrations.written.is_empty());
    }

    #[test]
    fn test_existing_migration_reported_as_not_created() {
        let plan = plan(Options::default().with_repo("MyApp.Repo"));
        let mut migrations = RecordingMigrations {
            exists: true,
            ..Default::default()
        };

        let report = apply_plan(
            &plan,
            &mut ConfigDocument::new(),
            &mut migrations,
            &mut Vec::<Notice>::new(),
        )
        .unwrap();

        assert_eq!(report.migration_created, Some(false));
    }
}
