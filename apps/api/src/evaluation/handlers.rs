//! Axum route handlers for the Evaluation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::evaluation::scorer::EvaluationResult;
use crate::evaluation::signals::{extract_signals, CandidateSignals};
use crate::extraction::{extract_text, DocumentKind};
use crate::positions::{infer_from_message, resolve, JobProfile, PositionKey};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Explicit position key. Takes precedence over `message`.
    pub position: Option<String>,
    /// Free-text request ("check my CV for the devops role"), used to infer a position.
    pub message: Option<String>,
    pub cv_text: Option<String>,
    pub document: Option<DocumentPayload>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentPayload {
    pub content_base64: String,
    pub file_type: Option<String>,
    pub file_name: Option<String>,
}

impl DocumentPayload {
    fn kind(&self) -> DocumentKind {
        match (&self.file_type, &self.file_name) {
            (Some(tag), _) => DocumentKind::from_tag(tag),
            (None, Some(name)) => DocumentKind::from_file_name(name),
            (None, None) => DocumentKind::Txt,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PositionRef {
    pub key: PositionKey,
    pub display_name: &'static str,
    pub display_name_localized: &'static str,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub position: PositionRef,
    pub evaluation: EvaluationResult,
    pub signals: CandidateSignals,
    pub scorer_backend: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/evaluations
///
/// Scores a CV (plain text or base64 document) against one job profile.
/// Unknown position keys are rejected; empty or unreadable CVs score zero.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let profile = select_profile(&request, state.config.default_position)?;

    // A blank cv_text defers to an attached document.
    let cv_text = match (request.cv_text, request.document) {
        (Some(text), Some(document)) if text.trim().is_empty() => read_document(document).await?,
        (Some(text), _) => text,
        (None, Some(document)) => read_document(document).await?,
        (None, None) => {
            return Err(AppError::Validation(
                "either cv_text or document is required".to_string(),
            ))
        }
    };

    let evaluation = state.scorer.evaluate(&cv_text, profile);
    let signals = extract_signals(&cv_text, profile);

    info!(
        "Evaluated CV against {}: score={} rating={}",
        profile.key, evaluation.total_score, evaluation.rating
    );

    Ok(Json(EvaluateResponse {
        position: PositionRef {
            key: profile.key,
            display_name: profile.display_name,
            display_name_localized: profile.display_name_localized,
        },
        evaluation,
        signals,
        scorer_backend: state.scorer.backend(),
    }))
}

async fn read_document(document: DocumentPayload) -> Result<String, AppError> {
    let kind = document.kind();
    tokio::task::spawn_blocking(move || extract_text(&document.content_base64, kind))
        .await
        .map_err(|e| AppError::Internal(e.into()))
}

/// Explicit key (validated) → position named in `message` → configured default.
fn select_profile(
    request: &EvaluateRequest,
    default: PositionKey,
) -> Result<&'static JobProfile, AppError> {
    let explicit = request
        .position
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());
    if explicit.is_some() {
        return resolve(explicit, default);
    }

    let inferred = request.message.as_deref().and_then(infer_from_message);
    Ok(inferred.unwrap_or(default).profile())
}
