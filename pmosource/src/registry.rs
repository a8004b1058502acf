//! Scheme-based backend registry
//!
//! Backends are registered once at startup; every request is then routed to
//! the backend owning the URI's scheme prefix.

use crate::{Backend, Result, SourceError, uri_scheme};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Routing table from URI scheme to backend
#[derive(Debug, Default)]
pub struct BackendRegistry {
    backends: RwLock<HashMap<String, Arc<dyn Backend>>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a backend under every scheme it declares
    ///
    /// Fails without registering anything if one of the schemes is taken.
    pub async fn register(&self, backend: Arc<dyn Backend>) -> Result<()> {
        let mut backends = self.backends.write().await;

        if let Some(taken) = backend
            .uri_schemes()
            .iter()
            .find(|scheme| backends.contains_key(**scheme))
        {
            return Err(SourceError::SchemeAlreadyRegistered(taken.to_string()));
        }

        for scheme in backend.uri_schemes() {
            info!(scheme = %scheme, "Registering library backend");
            backends.insert(scheme.to_string(), backend.clone());
        }
        Ok(())
    }

    /// Finds the backend owning `uri`
    pub async fn backend_for(&self, uri: &str) -> Result<Arc<dyn Backend>> {
        let scheme = uri_scheme(uri).ok_or_else(|| SourceError::InvalidUri(uri.to_string()))?;
        debug!(scheme = %scheme, uri = %uri, "Routing request");

        self.backends
            .read()
            .await
            .get(scheme)
            .cloned()
            .ok_or_else(|| SourceError::UnknownScheme(scheme.to_string()))
    }

    /// Registered schemes, sorted
    pub async fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self.backends.read().await.keys().cloned().collect();
        schemes.sort();
        schemes
    }
}
