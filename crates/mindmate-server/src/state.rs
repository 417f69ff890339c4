//! Application state for the API server.

use std::sync::Arc;

use mindmate_core::SupportEngine;

/// Shared application state.
///
/// The engine is stateless per message, so handlers share it without locking.
#[derive(Clone, Debug)]
pub struct AppState {
    pub engine: Arc<SupportEngine>,
}

impl AppState {
    /// Creates state around an existing engine.
    pub fn new(engine: SupportEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Creates state with a template-only engine and default config.
    pub fn template_only() -> Self {
        Self::new(SupportEngine::template_only())
    }
}
