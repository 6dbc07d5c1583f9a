// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Configuration mutations
//!
//! A mutation names a file, a key path inside that file's configuration and
//! the structured literal to store there. Rendering to source syntax is left
//! to a [`Formatter`](crate::render::Formatter).

use std::path::PathBuf;

use serde::{Serialize, Serializer};

/// How a mutation treats an existing value at its key path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationMode {
    /// Always overwrite
    Set,
    /// Leave any existing value untouched
    SetIfAbsent,
}

/// A structured configuration literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Nil,
    Bool(bool),
    Integer(i64),
    String(String),
    /// Symbol or module name, e.g. `FunWithFlags.Store.Persistent.Ecto`
    Atom(String),
    /// Ordered key/value pairs
    Keyword(Vec<(String, ConfigValue)>),
}

impl ConfigValue {
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Build a keyword list from `(key, value)` pairs
    pub fn keyword<K: Into<String>>(pairs: impl IntoIterator<Item = (K, ConfigValue)>) -> Self {
        Self::Keyword(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Look up a key in a keyword list
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        match self {
            Self::Keyword(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Convert to a JSON value, keyword order preserved
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Self::Nil => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Integer(i) => Value::from(*i),
            Self::String(s) | Self::Atom(s) => Value::String(s.clone()),
            Self::Keyword(pairs) => Value::Object(
                pairs
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// A single configuration change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigMutation {
    /// Configuration file the change belongs to
    pub file: PathBuf,

    /// Keys from the document root down to the target entry
    pub key_path: Vec<String>,

    /// Value to store
    pub value: ConfigValue,

    /// Overwrite policy
    pub mode: MutationMode,
}

impl ConfigMutation {
    /// The last key of the path
    pub fn key(&self) -> &str {
        self.key_path.last().map(String::as_str).unwrap_or_default()
    }
}
