// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Error types for the installer
//!
//! Every failure carries a diagnostic code and, where the operator can do
//! something about it, a help line pointing at the fix.

mod recovery;

pub use recovery::RecoverySuggestion;

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for installer operations
pub type InstallerResult<T> = Result<T, InstallerError>;

/// Main error type for fwf-install
#[derive(Error, Debug, Diagnostic)]
pub enum InstallerError {
    // ─────────────────────────────────────────────────────────────────────────
    // Option Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Invalid value '{value}' for option '{field}'")]
    #[diagnostic(code(fwf::invalid_option), help("Allowed values for '{field}': {allowed}"))]
    InvalidOption {
        field: String,
        value: String,
        allowed: String,
    },

    #[error("No Ecto repo found for storing feature flags")]
    #[diagnostic(
        code(fwf::no_repo_found),
        help("Pass the repo explicitly, e.g. --repo MyApp.Repo, or use --persistence redis")
    )]
    NoRepoFound,

    // ─────────────────────────────────────────────────────────────────────────
    // Document Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Unsupported config document: {path}")]
    #[diagnostic(
        code(fwf::unsupported_document),
        help("Supported document formats: JSON (.json), YAML (.yaml, .yml)")
    )]
    UnsupportedDocument { path: PathBuf },

    #[error("Cannot descend into '{key}': existing value is not a map")]
    #[diagnostic(code(fwf::key_path_conflict))]
    KeyPathConflict {
        key: String,
        #[help]
        help: Option<String>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // File Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(fwf::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("Failed to write file '{path}': {error}")]
    #[diagnostic(code(fwf::file_write_error))]
    FileWriteError { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/System Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(fwf::io_error))]
    Io { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(fwf::yaml_error))]
    Yaml { message: String },

    #[error("JSON parsing error: {message}")]
    #[diagnostic(code(fwf::json_error))]
    Json { message: String },

    #[error("TOML parsing error: {message}")]
    #[diagnostic(code(fwf::toml_error))]
    Toml { message: String },

    #[error("Glob pattern error: {message}")]
    #[diagnostic(code(fwf::glob_error))]
    GlobPattern { message: String },

    #[error("Regex error: {message}")]
    #[diagnostic(code(fwf::regex_error))]
    Regex { message: String },
}

impl From<std::io::Error> for InstallerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for InstallerError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for InstallerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<toml::de::Error> for InstallerError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml { message: e.to_string() }
    }
}

impl From<glob::PatternError> for InstallerError {
    fn from(e: glob::PatternError) -> Self {
        Self::GlobPattern { message: e.to_string() }
    }
}

impl From<regex::Error> for InstallerError {
    fn from(e: regex::Error) -> Self {
        Self::Regex { message: e.to_string() }
    }
}

impl InstallerError {
    /// Create an invalid option error listing the legal values
    pub fn invalid_option(field: &str, value: &str, allowed: &[&str]) -> Self {
        Self::InvalidOption {
            field: field.to_string(),
            value: value.to_string(),
            allowed: allowed.join(", "),
        }
    }

    /// Create a key path conflict error for a mutation
    pub fn key_path_conflict(key: &str, key_path: &[String]) -> Self {
        Self::KeyPathConflict {
            key: key.to_string(),
            help: Some(format!(
                "Mutation targets '{}'. Remove or rename the conflicting entry.",
                key_path.join(".")
            )),
        }
    }

    /// Recovery suggestion for failures the operator can fix by re-running
    pub fn recovery(&self) -> Option<RecoverySuggestion> {
        match self {
            Self::InvalidOption { field, value, allowed } => {
                Some(RecoverySuggestion::fix_invalid_option(field, value, allowed))
            }
            Self::NoRepoFound => Some(RecoverySuggestion::supply_repo()),
            _ => None,
        }
    }
}
