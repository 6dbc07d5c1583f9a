// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Build plans
//!
//! This module holds the installer's decision logic: composing config
//! mutations, generating the migration, composing notices, and the
//! orchestrator that sequences them into a [`BuildPlan`].

mod composer;
mod migration;
mod mutation;
mod notice;
mod orchestrator;

pub use composer::*;
pub use migration::*;
pub use mutation::{ConfigMutation, ConfigValue, MutationMode};
pub use notice::{Notice, NoticeComposer, NoticeKind};
pub use orchestrator::{BuildPlan, Installer, RunState};
