// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Check command - validate options without planning

use colored::Colorize;
use miette::Result;

use crate::cli::OptionArgs;
use crate::options::OptionValidator;
use crate::utils::{print_error, print_success};

/// Run the check command
pub fn run(args: OptionArgs, verbose: bool) -> Result<()> {
    let root = std::env::current_dir()
        .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?;
    let options = args.load(&root)?;

    println!("{}", "Checking options...".bold());
    println!();

    let errors = OptionValidator::validate_all(&options);

    if verbose {
        println!("  persistence: {}", options.persistence);
        println!("  pubsub:      {}", options.pubsub);
        println!("  repo:        {}", options.repo.as_deref().unwrap_or("(discover)"));
        println!("  table_name:  {}", options.table_name);
        println!();
    }

    if errors.is_empty() {
        print_success("All options are valid");
        return Ok(());
    }

    for error in &errors {
        print_error(&error.to_string());
        if let Some(suggestion) = error.recovery() {
            for command in &suggestion.commands {
                eprintln!("      {}", command.cyan());
            }
        }
    }

    Err(miette::miette!("{} invalid option(s)", errors.len()))
}
