use std::sync::Arc;
use std::time::Duration;

use crate::filters::FilterRegistry;
use crate::settings::SharedSettings;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Filled once at startup; read-only afterwards.
    pub registry: Arc<FilterRegistry>,
    /// Same handle the filters read from, so updates apply to the next evaluation.
    pub settings: SharedSettings,
    pub screen_timeout: Duration,
}
