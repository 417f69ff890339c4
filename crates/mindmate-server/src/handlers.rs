//! API route handlers.

use axum::extract::State;
use axum::Json;
use tracing::{debug, warn};

use mindmate_core::classifier::KEYWORD_TABLE_VERSION;
use mindmate_core::response::{full_catalog, ResourceMap};
use mindmate_core::{ClassificationResult, SupportReport};

use crate::error::Result;
use crate::models::{check_message_size, ChatRequest, ClassifyRequest, HealthResponse};
use crate::state::AppState;

/// POST /api/chat - Classify a message and return a supportive reply.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<SupportReport>> {
    check_message_size(&req.message)?;
    debug!(
        message_len = req.message.len(),
        session_id = ?req.session_id,
        "Chat request"
    );

    let report = state
        .engine
        .process_message(&req.message, req.user_id, req.session_id)
        .await;

    if report.crisis_detected {
        warn!(
            crisis_level = %report.assessment.crisis_level,
            session_id = ?report.session_id,
            "Crisis-level message received"
        );
    }

    Ok(Json(report))
}

/// POST /api/classify - Classify a message without generating a reply.
pub async fn classify(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<ClassificationResult>> {
    check_message_size(&req.message)?;
    Ok(Json(state.engine.classify(&req.message)))
}

/// GET /api/resources - Full support resource catalog.
pub async fn resources() -> Json<ResourceMap> {
    Json(full_catalog())
}

/// GET /api/health - Liveness and active generator.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        generator: state.engine.generator_name().to_string(),
        keyword_table_version: KEYWORD_TABLE_VERSION,
    })
}
