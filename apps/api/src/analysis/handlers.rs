//! Axum route handlers for the analyze relay and the render endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::prompts::{build_analysis_prompt, ANALYSIS_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::LlmError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub cv_text: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub job_requirements: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub html: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Validates the body, substitutes the CV text into the fixed prompt
/// template, calls the upstream once (no retries anywhere in the system)
/// and returns the completion text verbatim.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if request.cv_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing or invalid cvText in request body".to_string(),
        ));
    }

    let llm = state.llm.as_ref().ok_or(AppError::NotConfigured)?;

    let prompt = build_analysis_prompt(
        &request.cv_text,
        request.position.as_deref(),
        request.job_requirements.as_deref(),
    );

    info!("Relaying analysis request ({} chars)", request.cv_text.len());

    let text = llm
        .complete(&prompt, ANALYSIS_SYSTEM)
        .await
        .map_err(map_llm_error)?;

    Ok(Json(AnalyzeResponse { text }))
}

/// POST /api/render
///
/// Runs the formatter over analysis text. Total like the formatter itself:
/// missing or empty text yields the placeholder fragment, not an error.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Json<RenderResponse> {
    Json(RenderResponse {
        html: state.formatter.format(&request.text),
    })
}

/// Maps upstream failures to the user-facing taxonomy. Credential detail
/// never leaves the server: upstream auth failures surface as the same
/// fixed misconfiguration error as a missing key.
fn map_llm_error(error: LlmError) -> AppError {
    match error {
        LlmError::Api { status: 429, .. } => AppError::RateLimited,
        LlmError::Api {
            status: 401 | 403, ..
        } => AppError::NotConfigured,
        LlmError::Api { status, message } if status >= 500 => {
            AppError::UpstreamUnavailable(format!("upstream returned {status}: {message}"))
        }
        LlmError::Api { status, message } => AppError::AnalysisFailed { status, message },
        LlmError::Http(e) => AppError::UpstreamUnavailable(e.to_string()),
        LlmError::EmptyContent => AppError::AnalysisFailed {
            status: 200,
            message: "upstream returned no completion text".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::formatter::Formatter;

    fn test_state(api_key: Option<&str>) -> AppState {
        AppState {
            config: Config {
                groq_api_key: api_key.map(str::to_string),
                port: 3000,
                static_dir: "static".to_string(),
                rust_log: "info".to_string(),
            },
            llm: api_key.map(|k| crate::llm_client::LlmClient::new(k.to_string())),
            formatter: Arc::new(Formatter::new()),
        }
    }

    #[tokio::test]
    async fn test_empty_cv_text_is_rejected_before_any_call() {
        let state = test_state(Some("key"));
        let request = AnalyzeRequest {
            cv_text: "   ".to_string(),
            position: None,
            job_requirements: None,
        };
        let result = handle_analyze(State(state), Json(request)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_key_is_fixed_misconfiguration_error() {
        let state = test_state(None);
        let request = AnalyzeRequest {
            cv_text: "some cv".to_string(),
            position: None,
            job_requirements: None,
        };
        let result = handle_analyze(State(state), Json(request)).await;
        assert!(matches!(result, Err(AppError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_render_formats_text() {
        let state = test_state(None);
        let request = RenderRequest {
            text: "## Title".to_string(),
        };
        let Json(response) = handle_render(State(state), Json(request)).await;
        assert_eq!(response.html, "<h2>Title</h2>");
    }

    #[tokio::test]
    async fn test_render_of_empty_text_is_placeholder_not_error() {
        let state = test_state(None);
        let request = RenderRequest {
            text: String::new(),
        };
        let Json(response) = handle_render(State(state), Json(request)).await;
        assert_eq!(response.html, "<p>No analysis results available.</p>");
    }

    #[test]
    fn test_upstream_status_mapping() {
        assert!(matches!(
            map_llm_error(LlmError::Api {
                status: 429,
                message: String::new()
            }),
            AppError::RateLimited
        ));
        assert!(matches!(
            map_llm_error(LlmError::Api {
                status: 401,
                message: "bad key".to_string()
            }),
            AppError::NotConfigured
        ));
        assert!(matches!(
            map_llm_error(LlmError::Api {
                status: 503,
                message: String::new()
            }),
            AppError::UpstreamUnavailable(_)
        ));
        assert!(matches!(
            map_llm_error(LlmError::Api {
                status: 400,
                message: String::new()
            }),
            AppError::AnalysisFailed { status: 400, .. }
        ));
    }

    #[test]
    fn test_request_accepts_wire_field_names() {
        let request: AnalyzeRequest = serde_json::from_str(
            r#"{"cvText": "body", "position": "SRE", "jobRequirements": "on-call"}"#,
        )
        .unwrap();
        assert_eq!(request.cv_text, "body");
        assert_eq!(request.position.as_deref(), Some("SRE"));
        assert_eq!(request.job_requirements.as_deref(), Some("on-call"));
    }
}
