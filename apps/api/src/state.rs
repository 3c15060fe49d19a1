use std::sync::Arc;

use crate::config::Config;
use crate::formatter::Formatter;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is immutable after startup; the service keeps no
/// per-request state anywhere.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when GROQ_API_KEY is absent — the analyze endpoint then
    /// returns a fixed misconfiguration error instead of calling upstream.
    pub llm: Option<LlmClient>,
    pub formatter: Arc<Formatter>,
}
