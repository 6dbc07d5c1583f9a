// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Repo discovery by scanning the host project
//!
//! Looks for modules under `lib/` that `use Ecto.Repo`.

use std::path::PathBuf;

use console::Term;
use regex::Regex;

use crate::errors::InstallerResult;
use crate::resolver::RepoDiscovery;
use crate::utils::create_spinner;

/// Scans `lib/**/*.ex` for Ecto repo modules
#[derive(Debug, Clone)]
pub struct ProjectRepoScanner {
    root: PathBuf,
    interactive: bool,
    show_progress: bool,
}

impl ProjectRepoScanner {
    /// Create a scanner rooted at the host project
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            interactive: false,
            show_progress: false,
        }
    }

    /// Ask on the terminal when several repos are found
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Show a spinner while scanning
    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// All repo modules found, sorted and deduplicated.
    ///
    /// Files that cannot be read are skipped with a warning; invalid UTF-8
    /// is decoded lossily.
    pub fn candidates(&self) -> InstallerResult<Vec<String>> {
        let patterns = RepoPatterns::new()?;
        let lib = glob::Pattern::escape(&self.root.join("lib").to_string_lossy());
        let paths = glob::glob(&format!("{}/**/*.ex", lib))?;

        let spinner = self
            .show_progress
            .then(|| create_spinner("Scanning lib/ for Ecto repos"));

        let mut repos = Vec::new();
        for path in paths.filter_map(Result::ok) {
            match std::fs::read(&path) {
                Ok(bytes) => repos.extend(patterns.modules(&String::from_utf8_lossy(&bytes))),
                Err(e) => tracing::warn!("Skipping {}: {}", path.display(), e),
            }
        }

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        repos.sort();
        repos.dedup();
        Ok(repos)
    }

    /// Numbered prompt on the terminal. An empty answer takes the first
    /// candidate, and so does a terminal that cannot be read.
    fn choose(&self, prompt: &str, candidates: &[String]) -> String {
        let term = Term::stderr();

        loop {
            let shown = write_menu(&term, prompt, candidates);
            let answer = match shown.and_then(|_| term.read_line()) {
                Ok(answer) => answer,
                Err(e) => {
                    tracing::warn!("Cannot prompt for a repo: {}", e);
                    return first_candidate(candidates);
                }
            };

            match parse_answer(&answer, candidates.len()) {
                Some(index) => return candidates[index].clone(),
                None => {
                    let _ = term.write_line(&format!(
                        "'{}' is not one of the listed repos",
                        answer.trim()
                    ));
                }
            }
        }
    }
}

impl RepoDiscovery for ProjectRepoScanner {
    fn discover_repo(&self, prompt: &str) -> Option<String> {
        let candidates = match self.candidates() {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!("Repo scan failed: {}", e);
                return None;
            }
        };

        match candidates.len() {
            0 => None,
            1 => candidates.into_iter().next(),
            _ if self.interactive => Some(self.choose(prompt, &candidates)),
            _ => Some(first_candidate(&candidates)),
        }
    }
}

fn write_menu(term: &Term, prompt: &str, candidates: &[String]) -> std::io::Result<()> {
    term.write_line(prompt)?;
    for (i, candidate) in candidates.iter().enumerate() {
        term.write_line(&format!("  {}. {}", i + 1, candidate))?;
    }
    term.write_str("> [1] ")
}

/// Index chosen by a prompt answer; blank means the first entry
fn parse_answer(answer: &str, count: usize) -> Option<usize> {
    let answer = answer.trim();
    if answer.is_empty() {
        return (count > 0).then_some(0);
    }

    match answer.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(n - 1),
        _ => None,
    }
}

fn first_candidate(candidates: &[String]) -> String {
    tracing::warn!(
        "Found {} repos ({}), using {}",
        candidates.len(),
        candidates.join(", "),
        candidates[0]
    );
    candidates[0].clone()
}

/// Compiled patterns for spotting repo modules in Elixir source
struct RepoPatterns {
    defmodule: Regex,
    use_repo: Regex,
}

impl RepoPatterns {
    fn new() -> InstallerResult<Self> {
        Ok(Self {
            defmodule: Regex::new(r"defmodule\s+([A-Z][A-Za-z0-9_.]*)\s+do\b")?,
            use_repo: Regex::new(r"\buse\s+Ecto\.Repo\b")?,
        })
    }

    /// Module names in `source` whose body contains `use Ecto.Repo`
    fn modules(&self, source: &str) -> Vec<String> {
        let starts: Vec<_> = self.defmodule.captures_iter(source).collect();
        let mut found = Vec::new();

        for (i, caps) in starts.iter().enumerate() {
            let start = caps.get(0).map(|m| m.end()).unwrap_or_default();
            let end = starts
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(source.len());

            if self.use_repo.is_match(&source[start..end]) {
                found.push(caps[1].to_string());
            }
        }

        found
    }
}
