use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::CreditInput;
use super::sensitivity::SensitivityRequest;
use super::service::{CreditScoringService, CreditServiceError};
use super::session::{CreditInputPatch, SessionId, SessionRepository};

/// Router builder exposing the scoring endpoints.
pub fn credit_router<S>(service: Arc<CreditScoringService<S>>) -> Router
where
    S: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/credit/evaluate", post(evaluate_handler::<S>))
        .route("/api/v1/credit/sensitivity", post(sensitivity_handler::<S>))
        .route(
            "/api/v1/credit/sessions/:session_id",
            get(session_handler::<S>).patch(update_session_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler<S>(
    State(service): State<Arc<CreditScoringService<S>>>,
    axum::Json(input): axum::Json<CreditInput>,
) -> Response
where
    S: SessionRepository + 'static,
{
    let assessment = service.evaluate(&input);
    (StatusCode::OK, axum::Json(assessment)).into_response()
}

pub(crate) async fn sensitivity_handler<S>(
    State(service): State<Arc<CreditScoringService<S>>>,
    axum::Json(request): axum::Json<SensitivityRequest>,
) -> Response
where
    S: SessionRepository + 'static,
{
    match service.sensitivity(&request) {
        Ok(curve) => (StatusCode::OK, axum::Json(curve)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn session_handler<S>(
    State(service): State<Arc<CreditScoringService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionRepository + 'static,
{
    match service.session(&SessionId(session_id)) {
        Ok(session) => (StatusCode::OK, axum::Json(session)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_session_handler<S>(
    State(service): State<Arc<CreditScoringService<S>>>,
    Path(session_id): Path<String>,
    axum::Json(patch): axum::Json<CreditInputPatch>,
) -> Response
where
    S: SessionRepository + 'static,
{
    match service.update_session(&SessionId(session_id), &patch) {
        Ok(session) => (StatusCode::OK, axum::Json(session)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: CreditServiceError) -> Response {
    let status = match error {
        CreditServiceError::Sensitivity(_) | CreditServiceError::EmptyPatch => {
            StatusCode::BAD_REQUEST
        }
        CreditServiceError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
