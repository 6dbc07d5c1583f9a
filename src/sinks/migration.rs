// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Migration files on disk

use std::path::{Path, PathBuf};

use crate::errors::{InstallerError, InstallerResult};
use crate::plan::{ExistencePolicy, MigrationSpec};
use crate::render::{ElixirFormatter, Formatter};
use crate::sinks::MigrationSink;

/// Migrations directory relative to the project root
pub const MIGRATIONS_DIR: &str = "priv/repo/migrations";

/// Writes `<timestamp>_<name>.<ext>` into the project's migrations directory
pub struct FsMigrationSink {
    project_root: PathBuf,
    repo: String,
    formatter: ElixirFormatter,
    timestamp: Option<String>,
    dry_run: bool,
    written: Vec<PathBuf>,
}

impl FsMigrationSink {
    /// Create a sink for migrations owned by `repo`
    pub fn new(project_root: impl Into<PathBuf>, repo: impl Into<String>) -> Self {
        Self {
            project_root: project_root.into(),
            repo: repo.into(),
            formatter: ElixirFormatter,
            timestamp: None,
            dry_run: false,
            written: Vec::new(),
        }
    }

    /// Use a fixed timestamp instead of the current UTC time
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Report what would be written without touching the disk
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Files created (or that would be created in dry-run mode)
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn migrations_dir(&self) -> PathBuf {
        self.project_root.join(MIGRATIONS_DIR)
    }

    /// Existing migrations that carry `name`
    fn existing(&self, name: &str) -> InstallerResult<Vec<PathBuf>> {
        let dir = glob::Pattern::escape(&self.migrations_dir().to_string_lossy());
        let suffix = glob::Pattern::escape(&format!(
            "_{}.{}",
            name,
            self.formatter.migration_extension()
        ));

        Ok(glob::glob(&format!("{}/*{}", dir, suffix))?
            .filter_map(Result::ok)
            .collect())
    }
}

impl MigrationSink for FsMigrationSink {
    fn write(
        &mut self,
        spec: &MigrationSpec,
        name: &str,
        policy: ExistencePolicy,
    ) -> InstallerResult<bool> {
        if policy == ExistencePolicy::SkipIfExists {
            if let Some(existing) = self.existing(name)?.first() {
                tracing::debug!("Found existing migration {}", existing.display());
                return Ok(false);
            }
        }

        let timestamp = self
            .timestamp
            .clone()
            .unwrap_or_else(|| chrono::Utc::now().format("%Y%m%d%H%M%S").to_string());
        let path = self.migrations_dir().join(format!(
            "{}_{}.{}",
            timestamp,
            name,
            self.formatter.migration_extension()
        ));

        if !self.dry_run {
            let content = self.formatter.render_migration(spec, name, &self.repo);
            write_file(&path, &content)?;
        }

        self.written.push(path);
        Ok(true)
    }
}

fn write_file(path: &Path, content: &str) -> InstallerResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| InstallerError::FileWriteError {
            path: parent.to_path_buf(),
            error: e.to_string(),
        })?;
    }

    std::fs::write(path, content).map_err(|e| InstallerError::FileWriteError {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}
