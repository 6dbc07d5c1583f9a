// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 fwf-install contributors

//! Config composition
//!
//! Builds the ordered configuration mutations for a resolved setup.

use std::path::PathBuf;

use crate::options::{PubSub, DEFAULT_TABLE_NAME};
use crate::plan::{ConfigMutation, ConfigValue, MutationMode};
use crate::resolver::PersistenceDescriptor;

/// Configuration file every mutation targets
pub const CONFIG_FILE: &str = "config/config.exs";

/// Application key that owns the flag library's configuration
pub const APP_KEY: &str = "fun_with_flags";

pub const ECTO_ADAPTER: &str = "FunWithFlags.Store.Persistent.Ecto";
pub const REDIS_ADAPTER: &str = "FunWithFlags.Store.Persistent.Redis";
pub const PHOENIX_NOTIFICATIONS: &str = "FunWithFlags.Notifications.PhoenixPubSub";
pub const REDIS_NOTIFICATIONS: &str = "FunWithFlags.Notifications.Redis";

pub const DEFAULT_REDIS_HOST: &str = "localhost";
pub const DEFAULT_REDIS_PORT: i64 = 6379;
pub const DEFAULT_REDIS_DATABASE: i64 = 0;
pub const DEFAULT_CACHE_TTL: i64 = 900;

/// Config composer
pub struct ConfigComposer;

impl ConfigComposer {
    /// Compose the mutations in application order.
    ///
    /// `persistence` always comes first and `cache_bust_notifications` last.
    pub fn compose(persistence: &PersistenceDescriptor, pubsub: PubSub) -> Vec<ConfigMutation> {
        let mut mutations = vec![mutation(
            "persistence",
            Self::persistence_value(persistence),
            MutationMode::Set,
        )];

        if let PersistenceDescriptor::Redis = persistence {
            mutations.push(mutation(
                "redis",
                ConfigValue::keyword([
                    ("host", ConfigValue::string(DEFAULT_REDIS_HOST)),
                    ("port", ConfigValue::Integer(DEFAULT_REDIS_PORT)),
                    ("database", ConfigValue::Integer(DEFAULT_REDIS_DATABASE)),
                ]),
                MutationMode::SetIfAbsent,
            ));
        }

        mutations.push(mutation(
            "cache",
            ConfigValue::keyword([
                ("enabled", ConfigValue::Bool(true)),
                ("ttl", ConfigValue::Integer(DEFAULT_CACHE_TTL)),
            ]),
            MutationMode::SetIfAbsent,
        ));

        mutations.push(mutation(
            "cache_bust_notifications",
            Self::notifications_value(pubsub),
            MutationMode::Set,
        ));

        mutations
    }

    fn persistence_value(persistence: &PersistenceDescriptor) -> ConfigValue {
        match persistence {
            PersistenceDescriptor::Ecto { repo, table_name } => {
                let mut pairs = vec![
                    ("adapter", ConfigValue::atom(ECTO_ADAPTER)),
                    ("repo", ConfigValue::atom(repo)),
                ];
                if table_name != DEFAULT_TABLE_NAME {
                    pairs.push(("ecto_table_name", ConfigValue::string(table_name)));
                }
                ConfigValue::keyword(pairs)
            }
            PersistenceDescriptor::Redis => {
                ConfigValue::keyword([("adapter", ConfigValue::atom(REDIS_ADAPTER))])
            }
        }
    }

    fn notifications_value(pubsub: PubSub) -> ConfigValue {
        match pubsub {
            // client is the host's Phoenix.PubSub server; the operator fills it in
            PubSub::Phoenix => ConfigValue::keyword([
                ("enabled", ConfigValue::Bool(true)),
                ("adapter", ConfigValue::atom(PHOENIX_NOTIFICATIONS)),
                ("client", ConfigValue::Nil),
            ]),
            PubSub::Redis => ConfigValue::keyword([
                ("enabled", ConfigValue::Bool(true)),
                ("adapter", ConfigValue::atom(REDIS_NOTIFICATIONS)),
            ]),
        }
    }
}

fn mutation(key: &str, value: ConfigValue, mode: MutationMode) -> ConfigMutation {
    ConfigMutation {
        file: PathBuf::from(CONFIG_FILE),
        key_path: vec![APP_KEY.to_string(), key.to_string()],
        value,
        mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ecto(repo: &str, table_name: &str) -> PersistenceDescriptor {
        PersistenceDescriptor::Ecto {
            repo: repo.into(),
            table_name: table_name.into(),
        }
    }

    fn keys(mutations: &[ConfigMutation]) -> Vec<&str> {
        mutations.iter().map(|m| m.key()).collect()
    }

    #[test]
    fn test_ecto_phoenix_mutations() {
        let mutations =
            ConfigComposer::compose(&ecto("MyApp.Repo", DEFAULT_TABLE_NAME), PubSub::Phoenix);

        assert_eq!(
            keys(&mutations),
            vec!["persistence", "cache", "cache_bust_notifications"]
        );
        assert_eq!(
            mutations[0].value,
            ConfigValue::keyword([
                ("adapter", ConfigValue::atom(ECTO_ADAPTER)),
                ("repo", ConfigValue::atom("MyApp.Repo")),
            ])
        );
        assert_eq!(mutations[0].mode, MutationMode::Set);

        let notifications = &mutations[2];
        assert_eq!(notifications.mode, MutationMode::Set);
        assert_eq!(notifications.value.get("client"), Some(&ConfigValue::Nil));
        assert_eq!(
            notifications.value.get("adapter"),
            Some(&ConfigValue::atom(PHOENIX_NOTIFICATIONS))
        );
    }

    #[test]
    fn test_custom_table_name_is_configured() {
        let mutations = ConfigComposer::compose(&ecto("MyApp.Repo", "flags"), PubSub::Phoenix);

        assert_eq!(
            mutations[0].value.get("ecto_table_name"),
            Some(&ConfigValue::string("flags"))
        );
    }

    #[test]
    fn test_redis_redis_mutations() {
        let mutations = ConfigComposer::compose(&PersistenceDescriptor::Redis, PubSub::Redis);

        assert_eq!(
            keys(&mutations),
            vec!["persistence", "redis", "cache", "cache_bust_notifications"]
        );

        let redis = &mutations[1];
        assert_eq!(redis.mode, MutationMode::SetIfAbsent);
        assert_eq!(redis.value.get("port"), Some(&ConfigValue::Integer(6379)));

        let notifications = &mutations[3];
        assert_eq!(
            notifications.value.get("adapter"),
            Some(&ConfigValue::atom(REDIS_NOTIFICATIONS))
        );
        assert_eq!(notifications.value.get("client"), None);
    }

    #[test]
    fn test_cache_always_enabled_and_never_clobbers() {
        for persistence in [ecto("R", DEFAULT_TABLE_NAME), PersistenceDescriptor::Redis] {
            let mutations = ConfigComposer::compose(&persistence, PubSub::Phoenix);
            let cache = mutations.iter().find(|m| m.key() == "cache").unwrap();

            assert_eq!(cache.mode, MutationMode::SetIfAbsent);
            assert_eq!(cache.value.get("enabled"), Some(&ConfigValue::Bool(true)));
            assert_eq!(cache.value.get("ttl"), Some(&ConfigValue::Integer(900)));
        }
    }

    #[test]
    fn test_all_mutations_target_the_app_config() {
        let mutations = ConfigComposer::compose(&PersistenceDescriptor::Redis, PubSub::Phoenix);

        for m in &mutations {
            assert_eq!(m.file, PathBuf::from(CONFIG_FILE));
            assert_eq!(m.key_path[0], APP_KEY);
        }
    }
}
