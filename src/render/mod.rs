// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Output formatters
//!
//! Plans hold structured data only; a [`Formatter`] turns it into source text
//! for the host project.

mod elixir;

pub use elixir::ElixirFormatter;

use crate::plan::{ConfigMutation, MigrationSpec};

/// Renders plan data as host-language source
pub trait Formatter {
    /// Source for one config mutation
    fn render_mutation(&self, mutation: &ConfigMutation) -> String;

    /// Full migration module for `spec`, owned by `repo`
    fn render_migration(&self, spec: &MigrationSpec, name: &str, repo: &str) -> String;

    /// File extension for migration files
    fn migration_extension(&self) -> &'static str;
}

/// `create_fun_with_flags_table` -> `CreateFunWithFlagsTable`
pub fn camelize(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camelize() {
        assert_eq!(camelize("create_fun_with_flags_table"), "CreateFunWithFlagsTable");
        assert_eq!(camelize("__odd__name"), "OddName");
    }
}
