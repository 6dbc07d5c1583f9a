// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Plan command - show what the installer would do

use colored::Colorize;
use miette::{IntoDiagnostic, Result};

use crate::cli::{build_plan, OptionArgs, PlanFormat};
use crate::plan::{BuildPlan, MIGRATION_NAME};
use crate::render::{ElixirFormatter, Formatter};
use crate::sinks::{NoticeSink, TerminalNotices};
use crate::utils::{can_prompt, print_header, print_section};

/// Run the plan command
pub fn run(options: OptionArgs, format: PlanFormat, verbose: bool) -> Result<()> {
    let interactive = format == PlanFormat::Text && can_prompt();
    let (plan, _root) = build_plan(&options, interactive)?;

    match format {
        PlanFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&plan).into_diagnostic()?);
        }
        PlanFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&plan).into_diagnostic()?);
        }
        PlanFormat::Text => print_plan(&plan, &ElixirFormatter, verbose),
    }

    Ok(())
}

/// Print a plan for a human reader
pub fn print_plan(plan: &BuildPlan, formatter: &dyn Formatter, verbose: bool) {
    print_header("FunWithFlags install plan");

    let mut current_file = None;
    for mutation in &plan.mutations {
        if current_file != Some(&mutation.file) {
            print_section(&mutation.file.display().to_string());
            current_file = Some(&mutation.file);
        }
        println!();
        for line in formatter.render_mutation(mutation).lines() {
            println!("  {}", line.cyan());
        }
    }

    match (&plan.migration, plan.persistence.repo()) {
        (Some(spec), Some(repo)) => {
            print_section(&format!("Migration ({}, skipped if present)", MIGRATION_NAME));
            if verbose {
                println!();
                for line in formatter.render_migration(spec, MIGRATION_NAME, repo).lines() {
                    println!("  {}", line.dimmed());
                }
            } else {
                println!(
                    "  table {} with {} columns and {} indexes",
                    spec.table_name.bold(),
                    spec.columns.len(),
                    spec.indexes.len()
                );
            }
        }
        _ => {
            print_section("Migration");
            println!("  {}", "none (redis persistence)".dimmed());
        }
    }

    println!();
    let mut notices = TerminalNotices::new();
    for notice in &plan.notices {
        notices.emit(notice);
    }
}
