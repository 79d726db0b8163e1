//! Application state shared across HTTP handlers

use crate::storage::MetricStore;
use crate::utils::crypto::Signer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Handlers reach the store only through the [`MetricStore`] contract; the
/// concrete backend was chosen once at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Active metric store
    pub store: Arc<dyn MetricStore>,
    /// Signing key holder, when a key is configured
    pub signer: Option<Signer>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(store: Arc<dyn MetricStore>, signer: Option<Signer>) -> Self {
        Self { store, signer }
    }
}
