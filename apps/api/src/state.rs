use crate::agent::Agent;
use crate::config::Config;

/// Shared application state injected into route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub agent: Agent,
    /// Kept for handlers that need deployment settings; unused today.
    #[allow(dead_code)]
    pub config: Config,
}
