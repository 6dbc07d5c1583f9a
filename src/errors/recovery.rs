// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Error recovery suggestions
//!
//! Provides actionable suggestions for recovering from errors.

/// A recovery suggestion with concrete steps
#[derive(Debug, Clone)]
pub struct RecoverySuggestion {
    /// Brief description of what to do
    pub action: String,
    /// Detailed steps
    pub steps: Vec<String>,
    /// Commands to run
    pub commands: Vec<String>,
}

impl RecoverySuggestion {
    /// Suggest a legal value for a rejected option
    pub fn fix_invalid_option(field: &str, value: &str, allowed: &str) -> Self {
        let flag = format!("--{}", field.replace('_', "-"));
        let first = allowed.split(", ").next().unwrap_or_default();

        Self {
            action: format!("Choose a supported value for {}", flag),
            steps: vec![
                format!("'{}' is not a known {} mode", value, field),
                format!("Supported values: {}", allowed),
            ],
            commands: vec![format!("fwf-install plan {} {}", flag, first)],
        }
    }

    /// Suggest how to proceed when no Ecto repo could be found
    pub fn supply_repo() -> Self {
        Self {
            action: "Tell the installer which repo to use".into(),
            steps: vec![
                "No module using Ecto.Repo was found under lib/".into(),
                "Name the repo explicitly, or store flags in Redis instead".into(),
            ],
            commands: vec![
                "# Use an existing repo:".into(),
                "fwf-install plan --repo MyApp.Repo".into(),
                "".into(),
                "# Or skip Ecto entirely:".into(),
                "fwf-install plan --persistence redis".into(),
            ],
        }
    }
}

impl std::fmt::Display for RecoverySuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "→ {}", self.action)?;

        for step in &self.steps {
            writeln!(f, "  {}", step)?;
        }

        if !self.commands.is_empty() {
            writeln!(f)?;
            for cmd in &self.commands {
                writeln!(f, "  {}", cmd)?;
            }
        }

        Ok(())
    }
}
