// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Apply command - write the plan into the project

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use crate::cli::{build_plan, OptionArgs};
use crate::sinks::{
    apply_mutations, emit_notices, write_migration, ConfigDocument, FsMigrationSink,
    TerminalNotices,
};
use crate::utils::{
    can_prompt, print_header, print_info, print_section, print_success, print_warning,
};

/// Run the apply command
pub fn run(
    options: OptionArgs,
    config: PathBuf,
    dry_run: bool,
    yes: bool,
    verbose: bool,
) -> Result<()> {
    let interactive = !yes && can_prompt();
    let (plan, root) = build_plan(&options, interactive)?;

    let config_path = root.join(&config);
    let mut document = ConfigDocument::load(&config_path)?;
    let mut report = apply_mutations(&plan, &mut document)?;

    // Saved before any migration reaches the disk
    if !dry_run {
        document.save(&config_path)?;
    }

    let repo = plan.persistence.repo().unwrap_or_default();
    let mut migrations = FsMigrationSink::new(&root, repo).dry_run(dry_run);
    report.migration_created = write_migration(&plan, &mut migrations)?;

    if dry_run {
        print_header("Applying FunWithFlags setup (dry run)");
    } else {
        print_header("Applying FunWithFlags setup");
    }

    print_section(&format!("Config ({})", config.display()));
    for key in &report.changed {
        print_success(&format!("set {}", key));
    }
    for key in &report.unchanged {
        print_info(&format!("kept existing {}", key.dimmed()));
    }

    if let Some(created) = report.migration_created {
        print_section("Migration");
        if created {
            for path in migrations.written() {
                let shown = path.strip_prefix(&root).unwrap_or(path);
                print_success(&format!("created {}", shown.display()));
            }
        } else {
            print_warning("migration already exists, skipped");
        }
    }

    if verbose {
        println!();
        println!("{}", "Resulting config document:".dimmed());
        println!("{}", "─".repeat(50).dimmed());
        let rendered = serde_json::to_string_pretty(&document.to_json())
            .map_err(|e| miette::miette!("Failed to render config document: {}", e))?;
        println!("{}", rendered.dimmed());
    }

    println!();
    emit_notices(&plan, &mut TerminalNotices::new());

    Ok(())
}
