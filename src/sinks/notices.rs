// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Terminal notice output

use colored::Colorize;

use crate::plan::{Notice, NoticeKind};
use crate::sinks::NoticeSink;

/// Prints notices to stdout, one block per notice
#[derive(Debug, Default)]
pub struct TerminalNotices {
    emitted: usize,
}

impl TerminalNotices {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoticeSink for TerminalNotices {
    fn emit(&mut self, notice: &Notice) {
        if self.emitted > 0 {
            println!();
        }
        self.emitted += 1;

        match notice.kind {
            NoticeKind::Summary => println!("{}", notice.text.green().bold()),
            NoticeKind::NextSteps => println!("{}", notice.text),
            NoticeKind::Usage => println!("{}", notice.text.dimmed()),
        }
    }
}
