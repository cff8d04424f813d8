//! Application state for the Shift Compliance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::AgreementRegistry;

/// Shared application state.
///
/// Holds the agreement registry. Handlers read immutable snapshots from it;
/// the administrative endpoint swaps in a new rule set.
#[derive(Clone)]
pub struct AppState {
    /// The agreement registry.
    registry: Arc<AgreementRegistry>,
}

impl AppState {
    /// Creates a new application state serving the given registry.
    pub fn new(registry: AgreementRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Returns a reference to the agreement registry.
    pub fn registry(&self) -> &AgreementRegistry {
        &self.registry
    }
}
