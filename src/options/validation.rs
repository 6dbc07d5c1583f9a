// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Option validation
//!
//! Checks enumerated option values before anything else runs.

use crate::errors::{InstallerError, InstallerResult};
use crate::options::{Options, Persistence, PubSub, ValidatedOptions};

/// Option validator
pub struct OptionValidator;

impl OptionValidator {
    /// Validate options, stopping at the first bad field.
    ///
    /// Persistence is checked before pub/sub.
    pub fn validate(options: &Options) -> InstallerResult<ValidatedOptions> {
        let persistence = Self::check_persistence(&options.persistence)?;
        let pubsub = Self::check_pubsub(&options.pubsub)?;

        Ok(ValidatedOptions {
            persistence,
            pubsub,
            repo: options.repo.clone(),
            table_name: options.table_name.clone(),
        })
    }

    /// Check every enumerated field independently and collect all failures
    pub fn validate_all(options: &Options) -> Vec<InstallerError> {
        let mut errors = Vec::new();

        if let Err(e) = Self::check_persistence(&options.persistence) {
            errors.push(e);
        }
        if let Err(e) = Self::check_pubsub(&options.pubsub) {
            errors.push(e);
        }

        errors
    }

    fn check_persistence(value: &str) -> InstallerResult<Persistence> {
        Persistence::parse(value)
            .ok_or_else(|| InstallerError::invalid_option("persistence", value, Persistence::NAMES))
    }

    fn check_pubsub(value: &str) -> InstallerResult<PubSub> {
        PubSub::parse(value)
            .ok_or_else(|| InstallerError::invalid_option("pubsub", value, PubSub::NAMES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_and_value(err: &InstallerError) -> (&str, &str) {
        match err {
            InstallerError::InvalidOption { field, value, .. } => (field.as_str(), value.as_str()),
            other => panic!("expected InvalidOption, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_validate() {
        let validated = OptionValidator::validate(&Options::default()).unwrap();
        assert_eq!(validated.persistence, Persistence::Ecto);
        assert_eq!(validated.pubsub, PubSub::Phoenix);
    }

    #[test]
    fn test_bad_persistence_reported_before_bad_pubsub() {
        let options = Options::default()
            .with_persistence("mnesia")
            .with_pubsub("kafka");

        let err = OptionValidator::validate(&options).unwrap_err();
        assert_eq!(field_and_value(&err), ("persistence", "mnesia"));
    }

    #[test]
    fn test_bad_pubsub() {
        let options = Options::default().with_pubsub("kafka");

        let err = OptionValidator::validate(&options).unwrap_err();
        assert_eq!(field_and_value(&err), ("pubsub", "kafka"));
    }

    #[test]
    fn test_validate_all_reports_both_fields() {
        let options = Options::default()
            .with_persistence("")
            .with_pubsub("REDIS");

        let errors = OptionValidator::validate_all(&options);
        let fields: Vec<_> = errors.iter().map(field_and_value).collect();
        assert_eq!(fields, vec![("persistence", ""), ("pubsub", "REDIS")]);
    }

    #[test]
    fn test_repo_and_table_pass_through() {
        let options = Options::default()
            .with_repo("MyApp.Repo")
            .with_table_name("flags");

        let validated = OptionValidator::validate(&options).unwrap();
        assert_eq!(validated.repo.as_deref(), Some("MyApp.Repo"));
        assert_eq!(validated.table_name, "flags");
    }
}
