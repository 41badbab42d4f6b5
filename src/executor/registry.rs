//! Target Registry
//!
//! Maps target-process identifiers to forwarding closures. In-process targets
//! (an indexing service running in the same binary) are registered by name;
//! identifiers that look like URLs resolve to an HTTP forwarder on the fly.

use super::target::{HttpForwarder, forward_via_mailbox};
use crate::search::types::Document;
use crate::service::actor::Mailbox;

use anyhow::Result;
use dashmap::DashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a thread-safe, asynchronous forwarding function.
/// It takes a `Document` and returns a Future that resolves once the target accepted or rejected it.
pub type ForwardFn =
    Arc<dyn Fn(Document) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> + Send + Sync>;

/// Registry holding the mapping between target names and their forwarders.
pub struct TargetRegistry {
    targets: DashMap<String, ForwardFn>,
    http_client: reqwest::Client,
}

impl TargetRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers a forwarder under a specific target name.
    pub fn register<F, Fut>(&self, target_name: &str, forwarder: F)
    where
        F: Fn(Document) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let forward_fn: ForwardFn = Arc::new(move |document: Document| {
            Box::pin(forwarder(document)) as Pin<Box<dyn Future<Output = Result<()>> + Send>>
        });

        self.targets.insert(target_name.to_string(), forward_fn);

        tracing::info!("Registered forwarding target: {}", target_name);
    }

    /// Registers an in-process indexing service reachable through its mailbox.
    pub fn register_mailbox(&self, target_name: &str, mailbox: Mailbox) {
        self.register(target_name, move |document| {
            let mailbox = mailbox.clone();
            async move { forward_via_mailbox(&mailbox, document).await }
        });
    }

    /// Looks up the forwarder for a target identifier.
    ///
    /// Registered names win; otherwise `http://` and `https://` identifiers get an
    /// HTTP forwarder. Anything else is unknown.
    pub fn resolve(&self, target: &str) -> Option<ForwardFn> {
        if let Some(forward_fn) = self.targets.get(target) {
            return Some(forward_fn.value().clone());
        }

        if target.starts_with("http://") || target.starts_with("https://") {
            let forwarder = Arc::new(HttpForwarder::new(target, self.http_client.clone()));
            let forward_fn: ForwardFn = Arc::new(move |document: Document| {
                let forwarder = forwarder.clone();
                Box::pin(async move { forwarder.forward(&document).await })
                    as Pin<Box<dyn Future<Output = Result<()>> + Send>>
            });
            return Some(forward_fn);
        }

        None
    }

    /// Returns a list of all registered target names.
    pub fn list_targets(&self) -> Vec<String> {
        self.targets
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    pub fn has_target(&self, target_name: &str) -> bool {
        self.targets.contains_key(target_name)
    }
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self {
            targets: DashMap::new(),
            http_client: reqwest::Client::new(),
        }
    }
}
