// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for fwf-install.

pub mod apply;
pub mod check;
pub mod plan;

use clap::{Args, Parser, Subcommand, ValueEnum};
use miette::Result;
use std::path::{Path, PathBuf};

use crate::options::{Options, OptionsLoader, PartialOptions};
use crate::plan::{BuildPlan, Installer};
use crate::resolver::ProjectRepoScanner;
use crate::utils::print_error;

/// FunWithFlags installer
///
/// Plan and apply the configuration, migration and setup notes needed to
/// use fun_with_flags in an Elixir project.
#[derive(Parser, Debug)]
#[clap(
    name = "fwf-install",
    version,
    about = "Configure fun_with_flags for an Elixir project",
    long_about = None,
    after_help = "Examples:\n\
        fwf-install plan                              Show what would change\n\
        fwf-install plan --persistence redis          Plan a Redis-backed setup\n\
        fwf-install apply --config fwf-config.json    Apply the plan\n\
        fwf-install check --pubsub redis              Validate options only\n\n\
        See 'fwf-install <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the build plan without changing anything
    Plan {
        #[clap(flatten)]
        options: OptionArgs,

        /// Output format
        #[clap(short, long, value_enum, default_value = "text")]
        format: PlanFormat,
    },

    /// Apply the build plan to a config document and write the migration
    Apply {
        #[clap(flatten)]
        options: OptionArgs,

        /// Structured config document to update (.json, .yaml)
        #[clap(long, default_value = "fwf-config.json", value_name = "FILE")]
        config: PathBuf,

        /// Show what would be done without writing files
        #[clap(long)]
        dry_run: bool,

        /// Never prompt; pick the first repo when several are found
        #[clap(short, long)]
        yes: bool,
    },

    /// Validate options and report every invalid value
    Check {
        #[clap(flatten)]
        options: OptionArgs,
    },
}

/// Installer options as flags; each falls back to its environment variable
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Persistence adapter (ecto, redis)
    #[clap(long, env = "FWF_PERSISTENCE")]
    pub persistence: Option<String>,

    /// Pub/sub adapter for cache-busting notifications (phoenix, redis)
    #[clap(long, env = "FWF_PUBSUB")]
    pub pubsub: Option<String>,

    /// Ecto repo module, e.g. MyApp.Repo (discovered when omitted)
    #[clap(long, env = "FWF_REPO")]
    pub repo: Option<String>,

    /// Table name for Ecto persistence
    #[clap(long, env = "FWF_TABLE_NAME")]
    pub table_name: Option<String>,

    /// Options file to use instead of .fwf.toml
    #[clap(long, value_name = "FILE")]
    pub options_file: Option<PathBuf>,

    /// Ignore the user-level options file
    #[clap(long)]
    pub no_user_options: bool,
}

impl OptionArgs {
    /// Flag and environment values as the top option layer
    pub fn overrides(&self) -> PartialOptions {
        PartialOptions {
            persistence: self.persistence.clone(),
            pubsub: self.pubsub.clone(),
            repo: self.repo.clone(),
            table_name: self.table_name.clone(),
        }
    }

    /// Resolve options from every layer for the project at `root`
    pub fn load(&self, root: &Path) -> Result<Options> {
        let mut loader = OptionsLoader::new(root).with_options_file(self.options_file.clone());
        if self.no_user_options {
            loader = loader.without_user_file();
        }

        Ok(loader.load(self.overrides())?)
    }
}

/// Output format for the plan command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanFormat {
    Text,
    Json,
    Yaml,
}

/// Load options and run the installer against the current directory
pub(crate) fn build_plan(args: &OptionArgs, interactive: bool) -> Result<(BuildPlan, PathBuf)> {
    let root = std::env::current_dir()
        .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?;
    let options = args.load(&root)?;

    let scanner = ProjectRepoScanner::new(&root)
        .interactive(interactive)
        .show_progress(console::Term::stderr().is_term());

    match Installer::new(&scanner).run(&options) {
        Ok(plan) => Ok((plan, root)),
        Err(e) => {
            if let Some(suggestion) = e.recovery() {
                print_error(&e.to_string());
                eprintln!();
                eprint!("{}", suggestion);
                eprintln!();
            }
            Err(e.into())
        }
    }
}
