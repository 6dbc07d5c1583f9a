// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Utility modules
//!
//! Common utilities for the fwf-install CLI.

pub mod colors;
pub mod spinner;

pub use colors::*;
pub use spinner::*;
