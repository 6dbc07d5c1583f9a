// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! fwf-install - FunWithFlags installer
//!
//! Plan and apply fun_with_flags configuration for an Elixir project.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fwf_install::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for plan output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fwf_install=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if !fwf_install::utils::should_use_colors() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::Plan { options, format } => fwf_install::cli::plan::run(options, format, cli.verbose),
        Commands::Apply {
            options,
            config,
            dry_run,
            yes,
        } => fwf_install::cli::apply::run(options, config, dry_run, yes, cli.verbose),
        Commands::Check { options } => fwf_install::cli::check::run(options, cli.verbose),
    }
}
