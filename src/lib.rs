// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! # fwf-install - FunWithFlags installer
//!
//! `fwf-install` works out everything an Elixir project needs to start using
//! `fun_with_flags`: configuration entries, the toggles table migration, and
//! the manual steps left for the operator.
//!
//! ## Features
//!
//! - **Validated options** - persistence and pub/sub modes are closed enums
//! - **Repo discovery** - finds `Ecto.Repo` modules when no repo is given
//! - **Idempotent config** - defaults never overwrite existing user values
//! - **Structured output** - plans are data, rendered by a swappable formatter
//!
//! ## Quick Start
//!
//! ```bash
//! # Show what would change
//! fwf-install plan
//!
//! # Redis for storage and notifications
//! fwf-install plan --persistence redis --pubsub redis
//!
//! # Apply to a config document and write the migration
//! fwf-install apply --repo MyApp.Repo --config fwf-config.json
//! ```
//!
//! ## Library use
//!
//! ```
//! use fwf_install::{FixedRepo, Installer, Options};
//!
//! let discovery = FixedRepo::none();
//! let plan = Installer::new(&discovery)
//!     .run(&Options::default().with_repo("MyApp.Repo"))
//!     .unwrap();
//!
//! assert!(plan.migration.is_some());
//! ```

pub mod cli;
pub mod errors;
pub mod options;
pub mod plan;
pub mod render;
pub mod resolver;
pub mod sinks;
pub mod utils;

// Re-export commonly used types
pub use errors::{InstallerError, InstallerResult};
pub use options::{Options, Persistence, PubSub};
pub use plan::{BuildPlan, Installer};
pub use resolver::{FixedRepo, PersistenceDescriptor, RepoDiscovery};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
