// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Migration generation
//!
//! Describes the toggles table the Ecto adapter reads from.

use serde::Serialize;

/// Name the migration is generated under
pub const MIGRATION_NAME: &str = "create_fun_with_flags_table";

/// Name of the unique index over a flag's gates
pub const UNIQUE_INDEX_NAME: &str = "fwf_flag_name_gate_target_idx";

/// Column types used by the toggles table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Boolean,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Boolean => write!(f, "boolean"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSpec {
    pub columns: Vec<String>,
    pub unique: bool,
    /// Explicit index name; the database default applies when absent
    pub name: Option<String>,
}

/// Table schema for the Ecto persistence adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationSpec {
    pub table_name: String,
    pub columns: Vec<ColumnSpec>,
    pub indexes: Vec<IndexSpec>,
}

/// What a migration sink does when the migration already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistencePolicy {
    /// Leave the existing migration alone
    SkipIfExists,
    /// Write a new migration regardless
    Always,
}

/// Migration generator
pub struct MigrationGenerator;

impl MigrationGenerator {
    /// Build the toggles table schema for `table_name`
    pub fn generate(table_name: &str) -> MigrationSpec {
        MigrationSpec {
            table_name: table_name.to_string(),
            columns: vec![
                column("flag_name", ColumnType::String),
                column("gate_type", ColumnType::String),
                column("target", ColumnType::String),
                column("enabled", ColumnType::Boolean),
            ],
            indexes: vec![
                IndexSpec {
                    columns: vec!["flag_name".into()],
                    unique: false,
                    name: None,
                },
                IndexSpec {
                    columns: vec!["flag_name".into(), "gate_type".into(), "target".into()],
                    unique: true,
                    name: Some(UNIQUE_INDEX_NAME.into()),
                },
            ],
        }
    }
}

fn column(name: &str, column_type: ColumnType) -> ColumnSpec {
    ColumnSpec {
        name: name.to_string(),
        column_type,
        nullable: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_not_null() {
        let spec = MigrationGenerator::generate("fun_with_flags_toggles");

        let names: Vec<_> = spec.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["flag_name", "gate_type", "target", "enabled"]);
        assert!(spec.columns.iter().all(|c| !c.nullable));
        assert_eq!(spec.columns[3].column_type, ColumnType::Boolean);
    }

    #[test]
    fn test_index_name_ignores_table_name() {
        let spec = MigrationGenerator::generate("my_custom_flags");

        assert_eq!(spec.table_name, "my_custom_flags");
        assert_eq!(spec.indexes.len(), 2);
        assert_eq!(spec.indexes[0].name, None);
        assert!(!spec.indexes[0].unique);
        assert_eq!(spec.indexes[1].name.as_deref(), Some(UNIQUE_INDEX_NAME));
        assert!(spec.indexes[1].unique);
    }
}
