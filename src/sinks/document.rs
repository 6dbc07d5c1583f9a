// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Structured config document
//!
//! Top-level keys are config file paths; below them sits the nested key
//! structure each mutation's key path walks. Stored as JSON or YAML.

use std::path::Path;

use serde_json::{Map, Value};

use crate::errors::{InstallerError, InstallerResult};
use crate::plan::{ConfigMutation, MutationMode};
use crate::sinks::ConfigSink;

/// On-disk format of a config document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect from the file extension
    pub fn from_path(path: &Path) -> InstallerResult<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(InstallerError::UnsupportedDocument {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// In-memory structured configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    root: Map<String, Value>,
}

impl ConfigDocument {
    /// An empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document; a missing file is an empty document
    pub fn load(path: &Path) -> InstallerResult<Self> {
        let format = DocumentFormat::from_path(path)?;

        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path).map_err(|e| InstallerError::FileReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let root = match format {
            DocumentFormat::Json => serde_json::from_str(&content)?,
            DocumentFormat::Yaml => serde_yaml::from_str(&content)?,
        };

        Ok(Self { root })
    }

    /// Save the document in the format its extension names
    pub fn save(&self, path: &Path) -> InstallerResult<()> {
        let content = match DocumentFormat::from_path(path)? {
            DocumentFormat::Json => serde_json::to_string_pretty(&self.root)? + "\n",
            DocumentFormat::Yaml => serde_yaml::to_string(&self.root)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content).map_err(|e| InstallerError::FileWriteError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Value stored under `file` at `key_path`
    pub fn get(&self, file: &str, key_path: &[&str]) -> Option<&Value> {
        let mut current = self.root.get(file)?;
        for key in key_path {
            current = current.as_object()?.get(*key)?;
        }
        Some(current)
    }

    /// Store a raw value, creating intermediate maps
    pub fn insert(&mut self, file: &str, key_path: &[&str], value: Value) -> InstallerResult<()> {
        let owned: Vec<String> = key_path.iter().map(|k| k.to_string()).collect();
        let (last, parents) = owned
            .split_last()
            .ok_or_else(|| InstallerError::key_path_conflict("", &owned))?;

        let parent = self.parent_map(file, parents, &owned)?;
        parent.insert(last.clone(), value);
        Ok(())
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// Walk to the map that holds the last key, creating maps on the way
    fn parent_map(
        &mut self,
        file: &str,
        parents: &[String],
        key_path: &[String],
    ) -> InstallerResult<&mut Map<String, Value>> {
        let mut current = self
            .root
            .entry(file.to_string())
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| InstallerError::key_path_conflict(file, key_path))?;

        for key in parents {
            current = current
                .entry(key.clone())
                .or_insert_with(|| Value::Object(Map::new()))
                .as_object_mut()
                .ok_or_else(|| InstallerError::key_path_conflict(key, key_path))?;
        }

        Ok(current)
    }
}

impl ConfigSink for ConfigDocument {
    fn apply(&mut self, mutation: &ConfigMutation) -> InstallerResult<bool> {
        let file = mutation.file.to_string_lossy().to_string();
        let (last, parents) = mutation
            .key_path
            .split_last()
            .ok_or_else(|| InstallerError::key_path_conflict("", &mutation.key_path))?;

        let parent = self.parent_map(&file, parents, &mutation.key_path)?;
        let value = mutation.value.to_json();

        match mutation.mode {
            MutationMode::SetIfAbsent if parent.contains_key(last) => Ok(false),
            MutationMode::Set if parent.get(last) == Some(&value) => Ok(false),
            MutationMode::Set | MutationMode::SetIfAbsent => {
                parent.insert(last.clone(), value);
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::ConfigValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    const FILE: &str = "config/config.exs";

    fn cache_mutation() -> ConfigMutation {
        ConfigMutation {
            file: FILE.into(),
            key_path: vec!["fun_with_flags".into(), "cache".into()],
            value: ConfigValue::keyword([
                ("enabled", ConfigValue::Bool(true)),
                ("ttl", ConfigValue::Integer(900)),
            ]),
            mode: MutationMode::SetIfAbsent,
        }
    }

    #[test]
    fn test_set_if_absent_keeps_user_value() {
        let mut document = ConfigDocument::new();
        document
            .insert(FILE, &["fun_with_flags", "cache"], json!({"enabled": false}))
            .unwrap();

        assert!(!document.apply(&cache_mutation()).unwrap());
        assert!(!document.apply(&cache_mutation()).unwrap());
        assert_eq!(
            document.get(FILE, &["fun_with_flags", "cache"]),
            Some(&json!({"enabled": false}))
        );
    }

    #[test]
    fn test_set_if_absent_treats_null_as_present() {
        let mut document = ConfigDocument::new();
        document
            .insert(FILE, &["fun_with_flags", "cache"], Value::Null)
            .unwrap();

        assert!(!document.apply(&cache_mutation()).unwrap());
        assert_eq!(
            document.get(FILE, &["fun_with_flags", "cache"]),
            Some(&Value::Null)
        );
    }

    #[test]
    fn test_set_if_absent_writes_into_empty_document() {
        let mut document = ConfigDocument::new();

        assert!(document.apply(&cache_mutation()).unwrap());
        assert_eq!(
            document.get(FILE, &["fun_with_flags", "cache"]),
            Some(&json!({"enabled": true, "ttl": 900}))
        );
    }

    #[test]
    fn test_set_overwrites() {
        let mut document = ConfigDocument::new();
        document
            .insert(FILE, &["fun_with_flags", "cache"], json!("old"))
            .unwrap();

        let mut mutation = cache_mutation();
        mutation.mode = MutationMode::Set;

        assert!(document.apply(&mutation).unwrap());
        assert!(!document.apply(&mutation).unwrap());
        assert_eq!(
            document.get(FILE, &["fun_with_flags", "cache", "ttl"]),
            Some(&json!(900))
        );
    }

    #[test]
    fn test_scalar_in_the_way_is_a_conflict() {
        let mut document = ConfigDocument::new();
        document
            .insert(FILE, &["fun_with_flags"], json!(true))
            .unwrap();

        let err = document.apply(&cache_mutation()).unwrap_err();
        assert!(matches!(err, InstallerError::KeyPathConflict { ref key, .. } if key == "fun_with_flags"));
    }

    #[test]
    fn test_yaml_round_trip_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let mut document = ConfigDocument::load(&path).unwrap();
        document.apply(&cache_mutation()).unwrap();
        document.save(&path).unwrap();

        let reloaded = ConfigDocument::load(&path).unwrap();
        assert_eq!(reloaded, document);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = ConfigDocument::load(Path::new("config.toml")).unwrap_err();
        assert!(matches!(err, InstallerError::UnsupportedDocument { .. }));
    }
}
