// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Elixir source rendering

use crate::plan::{ConfigMutation, ConfigValue, MigrationSpec, MutationMode};
use crate::render::{camelize, Formatter};

/// Renders `config/*.exs` entries and Ecto migrations
#[derive(Debug, Clone, Copy, Default)]
pub struct ElixirFormatter;

impl Formatter for ElixirFormatter {
    fn render_mutation(&self, mutation: &ConfigMutation) -> String {
        let mut out = String::new();

        if mutation.mode == MutationMode::SetIfAbsent {
            out.push_str("# only written when not already configured\n");
        }

        let keys: Vec<String> = mutation.key_path.iter().map(|k| atom(k)).collect();
        out.push_str("config ");
        out.push_str(&keys.join(", "));

        match mutation.value {
            ConfigValue::Keyword(ref pairs) if !pairs.is_empty() => {
                let entries: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| format!("  {}: {}", k, render_value(v)))
                    .collect();
                out.push_str(",\n");
                out.push_str(&entries.join(",\n"));
            }
            ref other => {
                out.push_str(", ");
                out.push_str(&render_value(other));
            }
        }

        out.push('\n');
        out
    }

    fn render_migration(&self, spec: &MigrationSpec, name: &str, repo: &str) -> String {
        let table = atom(&spec.table_name);
        let mut body = Vec::new();

        body.push(format!("    create table({}) do", table));
        for column in &spec.columns {
            let null = if column.nullable { "" } else { ", null: false" };
            body.push(format!(
                "      add {}, :{}{}",
                atom(&column.name),
                column.column_type,
                null
            ));
        }
        body.push("    end".to_string());
        body.push(String::new());

        for index in &spec.indexes {
            let function = if index.unique { "unique_index" } else { "index" };
            let columns: Vec<String> = index.columns.iter().map(|c| atom(c)).collect();
            let name = index
                .name
                .as_ref()
                .map(|n| format!(", name: {}", string(n)))
                .unwrap_or_default();
            body.push(format!(
                "    create {}({}, [{}]{})",
                function,
                table,
                columns.join(", "),
                name
            ));
        }

        format!(
            "defmodule {repo}.Migrations.{module} do\n  use Ecto.Migration\n\n  def up do\n{body}\n  end\n\n  def down do\n    drop table({table})\n  end\nend\n",
            repo = repo,
            module = camelize(name),
            body = body.join("\n"),
            table = table,
        )
    }

    fn migration_extension(&self) -> &'static str {
        "exs"
    }
}

/// Render a literal in Elixir syntax
fn render_value(value: &ConfigValue) -> String {
    match value {
        ConfigValue::Nil => "nil".to_string(),
        ConfigValue::Bool(b) => b.to_string(),
        ConfigValue::Integer(i) => i.to_string(),
        ConfigValue::String(s) => string(s),
        // Module names are atoms already
        ConfigValue::Atom(a) if a.starts_with(|c: char| c.is_ascii_uppercase()) => a.clone(),
        ConfigValue::Atom(a) => atom(a),
        ConfigValue::Keyword(pairs) => {
            let entries: Vec<String> = pairs
                .iter()
                .map(|(k, v)| format!("{}: {}", k, render_value(v)))
                .collect();
            format!("[{}]", entries.join(", "))
        }
    }
}

/// `:name`, or `:"name"` when it is not a plain identifier
fn atom(name: &str) -> String {
    let stem = name.strip_suffix(['?', '!']).unwrap_or(name);
    let plain = stem.starts_with(|c: char| c == '_' || c.is_ascii_lowercase())
        && stem.chars().all(|c| c == '_' || c.is_ascii_alphanumeric());

    if plain {
        format!(":{}", name)
    } else {
        format!(":{}", string(name))
    }
}

/// Double-quoted Elixir string; `#{` is escaped so nothing interpolates
fn string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');

    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '#' if chars.peek() == Some(&'{') => out.push_str("\\#"),
            c => out.push(c),
        }
    }

    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{MigrationGenerator, MIGRATION_NAME};

    fn mutation(key: &str, value: ConfigValue, mode: MutationMode) -> ConfigMutation {
        ConfigMutation {
            file: "config/config.exs".into(),
            key_path: vec!["fun_with_flags".into(), key.into()],
            value,
            mode,
        }
    }

    #[test]
    fn test_render_persistence() {
        let rendered = ElixirFormatter.render_mutation(&mutation(
            "persistence",
            ConfigValue::keyword([
                ("adapter", ConfigValue::atom("FunWithFlags.Store.Persistent.Ecto")),
                ("repo", ConfigValue::atom("MyApp.Repo")),
            ]),
            MutationMode::Set,
        ));

        insta::assert_snapshot!(rendered, @r"
        config :fun_with_flags, :persistence,
          adapter: FunWithFlags.Store.Persistent.Ecto,
          repo: MyApp.Repo
        ");
    }

    #[test]
    fn test_render_set_if_absent_and_nil() {
        let rendered = ElixirFormatter.render_mutation(&mutation(
            "cache_bust_notifications",
            ConfigValue::keyword([
                ("enabled", ConfigValue::Bool(true)),
                ("client", ConfigValue::Nil),
                ("host", ConfigValue::string("localhost")),
                ("mode", ConfigValue::atom("fast")),
            ]),
            MutationMode::SetIfAbsent,
        ));

        insta::assert_snapshot!(rendered, @r#"
        # only written when not already configured
        config :fun_with_flags, :cache_bust_notifications,
          enabled: true,
          client: nil,
          host: "localhost",
          mode: :fast
        "#);
    }

    #[test]
    fn test_render_quotes_odd_names() {
        assert_eq!(atom("fun_with_flags_toggles"), ":fun_with_flags_toggles");
        assert_eq!(atom("enabled?"), ":enabled?");
        assert_eq!(atom("my-flags"), r#":"my-flags""#);
        assert_eq!(atom("Flags"), r#":"Flags""#);
        assert_eq!(string("say \"hi\" #{x}"), r#""say \"hi\" \#{x}""#);

        let spec = MigrationGenerator::generate("my-flags");
        let rendered = ElixirFormatter.render_migration(&spec, MIGRATION_NAME, "MyApp.Repo");
        assert!(rendered.contains(r#"create table(:"my-flags") do"#));
        assert!(rendered.contains(r#"create index(:"my-flags", [:flag_name])"#));
        assert!(rendered.contains(r#"drop table(:"my-flags")"#));
    }

    #[test]
    fn test_render_migration() {
        let spec = MigrationGenerator::generate("fun_with_flags_toggles");
        let rendered = ElixirFormatter.render_migration(&spec, MIGRATION_NAME, "MyApp.Repo");

        insta::assert_snapshot!(rendered, @r#"
        defmodule MyApp.Repo.Migrations.CreateFunWithFlagsTable do
          use Ecto.Migration

          def up do
            create table(:fun_with_flags_toggles) do
              add :flag_name, :string, null: false
              add :gate_type, :string, null: false
              add :target, :string, null: false
              add :enabled, :boolean, null: false
            end

            create index(:fun_with_flags_toggles, [:flag_name])
            create unique_index(:fun_with_flags_toggles, [:flag_name, :gate_type, :target], name: "fwf_flag_name_gate_target_idx")
          end

          def down do
            drop table(:fun_with_flags_toggles)
          end
        end
        "#);
    }
}
