// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Operator notices
//!
//! The wording is advisory. Which steps appear is decided by the resolved
//! persistence and pub/sub branch.

use serde::Serialize;

use crate::options::PubSub;
use crate::plan::composer::{
    DEFAULT_REDIS_DATABASE, DEFAULT_REDIS_HOST, DEFAULT_REDIS_PORT, PHOENIX_NOTIFICATIONS,
    REDIS_NOTIFICATIONS,
};
use crate::resolver::PersistenceDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Summary,
    NextSteps,
    Usage,
}

/// A block of text for the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Notice composer
pub struct NoticeComposer;

impl NoticeComposer {
    /// Summary, numbered next steps, then the usage reminder
    pub fn compose(persistence: &PersistenceDescriptor, pubsub: PubSub) -> Vec<Notice> {
        vec![
            Notice {
                kind: NoticeKind::Summary,
                text: Self::summary(persistence, pubsub),
            },
            Notice {
                kind: NoticeKind::NextSteps,
                text: Self::next_steps(persistence, pubsub),
            },
            Notice {
                kind: NoticeKind::Usage,
                text: Self::usage(),
            },
        ]
    }

    fn summary(persistence: &PersistenceDescriptor, pubsub: PubSub) -> String {
        let mut lines = Vec::new();

        match persistence {
            PersistenceDescriptor::Ecto { repo, table_name } => {
                lines.push("FunWithFlags has been configured with Ecto persistence.".to_string());
                lines.push(format!("  Repo:  {}", repo));
                lines.push(format!("  Table: {}", table_name));
            }
            PersistenceDescriptor::Redis => {
                lines.push("FunWithFlags has been configured with Redis persistence.".to_string());
                lines.push(format!(
                    "  Redis: {}:{} (database {}) unless already configured",
                    DEFAULT_REDIS_HOST, DEFAULT_REDIS_PORT, DEFAULT_REDIS_DATABASE
                ));
            }
        }

        let adapter = match pubsub {
            PubSub::Phoenix => PHOENIX_NOTIFICATIONS,
            PubSub::Redis => REDIS_NOTIFICATIONS,
        };
        lines.push(format!("  Cache-bust notifications: {}", adapter));

        lines.join("\n")
    }

    fn next_steps(persistence: &PersistenceDescriptor, pubsub: PubSub) -> String {
        let mut steps = vec!["Run `mix deps.get` to fetch dependencies".to_string()];

        // Ecto always gets the migrate step, even when the migration already existed
        if let PersistenceDescriptor::Ecto { .. } = persistence {
            steps.push("Run `mix ecto.migrate` to create the feature flags table".to_string());
        }

        if let PubSub::Phoenix = pubsub {
            steps.push(
                "Set `client:` under `:cache_bust_notifications` in config/config.exs \
                 to your app's Phoenix.PubSub server (e.g. MyApp.PubSub)"
                    .to_string(),
            );
        }

        let mut text = String::from("Next steps:");
        for (i, step) in steps.iter().enumerate() {
            text.push_str(&format!("\n  {}. {}", i + 1, step));
        }
        text
    }

    fn usage() -> String {
        [
            "Usage:",
            "  FunWithFlags.enabled?(:my_feature)",
            "  FunWithFlags.enable(:my_feature)",
            "  FunWithFlags.disable(:my_feature)",
        ]
        .join("\n")
    }
}
