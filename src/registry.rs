//! Provider registry
//!
//! Built once at start-up from whichever credentials are configured and
//! never modified afterwards. A provider whose credential appears later is
//! only picked up by a restart.

use crate::client::{create_client, Client};
use crate::{ProviderConfig, ProviderType, Result};
use indexmap::IndexMap;
use std::sync::Arc;

/// Immutable mapping from provider identifier to client
#[derive(Default)]
pub struct ProviderRegistry {
    clients: IndexMap<String, Arc<dyn Client>>,
}

impl ProviderRegistry {
    /// Build the registry from the process environment, giving every
    /// vendor client `timeout_secs`
    pub fn from_env(timeout_secs: u64) -> Result<Self> {
        Self::from_lookup(timeout_secs, |name| std::env::var(name).ok())
    }

    /// Build the registry through an arbitrary variable lookup
    pub fn from_lookup<F>(timeout_secs: u64, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_configs(
            ProviderType::ALL
                .into_iter()
                .filter_map(|provider| ProviderConfig::from_lookup(provider, &lookup))
                .map(|config| ProviderConfig {
                    timeout_secs,
                    ..config
                }),
        )
    }

    /// Build the registry from already-resolved provider configurations
    pub fn from_configs(configs: impl IntoIterator<Item = ProviderConfig>) -> Result<Self> {
        let mut clients = IndexMap::new();
        for config in configs {
            let key = config.provider_type.config_key().to_string();
            tracing::info!(provider = %key, model = config.default_model(), "registering provider");
            clients.insert(key, create_client(config)?);
        }
        Ok(ProviderRegistry { clients })
    }

    /// Build the registry from ready-made clients, keyed by identifier
    pub fn from_clients<I, K>(clients: I) -> Self
    where
        I: IntoIterator<Item = (K, Arc<dyn Client>)>,
        K: Into<String>,
    {
        ProviderRegistry {
            clients: clients.into_iter().map(|(k, c)| (k.into(), c)).collect(),
        }
    }

    /// Whether a provider is configured
    pub fn has(&self, id: &str) -> bool {
        self.clients.contains_key(id)
    }

    /// Look up a configured provider
    pub fn get(&self, id: &str) -> Option<&dyn Client> {
        self.clients.get(id).map(|c| c.as_ref())
    }

    /// Configured provider identifiers, in registration order
    pub fn keys(&self) -> Vec<&str> {
        self.clients.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
