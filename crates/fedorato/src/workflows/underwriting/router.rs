use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::SubmissionId;
use super::intake::SubmissionDraft;
use super::repository::{GuidelineStore, RepositoryError, SubmissionRepository};
use super::service::{TriageService, TriageServiceError};

/// Router builder exposing the submission inbox and rule evaluation over HTTP.
pub fn underwriting_router<R, G>(service: Arc<TriageService<R, G>>) -> Router
where
    R: SubmissionRepository + 'static,
    G: GuidelineStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/underwriting/submissions",
            post(submit_handler::<R, G>).get(inbox_handler::<R, G>),
        )
        .route(
            "/api/v1/underwriting/submissions/:submission_id",
            get(status_handler::<R, G>),
        )
        .route(
            "/api/v1/underwriting/submissions/:submission_id/classify",
            post(classify_handler::<R, G>),
        )
        .route("/api/v1/underwriting/evaluate", post(evaluate_handler::<R, G>))
        .route("/api/v1/underwriting/summary", get(summary_handler::<R, G>))
        .route(
            "/api/v1/underwriting/guidelines",
            get(guidelines_handler::<R, G>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, G>(
    State(service): State<Arc<TriageService<R, G>>>,
    axum::Json(draft): axum::Json<SubmissionDraft>,
) -> Response
where
    R: SubmissionRepository + 'static,
    G: GuidelineStore + 'static,
{
    match service.submit(draft) {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn inbox_handler<R, G>(
    State(service): State<Arc<TriageService<R, G>>>,
) -> Response
where
    R: SubmissionRepository + 'static,
    G: GuidelineStore + 'static,
{
    match service.classify_pending() {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.status_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, G>(
    State(service): State<Arc<TriageService<R, G>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    R: SubmissionRepository + 'static,
    G: GuidelineStore + 'static,
{
    let id = SubmissionId(submission_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn classify_handler<R, G>(
    State(service): State<Arc<TriageService<R, G>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    R: SubmissionRepository + 'static,
    G: GuidelineStore + 'static,
{
    let id = SubmissionId(submission_id);
    match service.classify(&id) {
        Ok(classification) => (StatusCode::OK, axum::Json(classification)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluate_handler<R, G>(
    State(service): State<Arc<TriageService<R, G>>>,
    axum::Json(draft): axum::Json<SubmissionDraft>,
) -> Response
where
    R: SubmissionRepository + 'static,
    G: GuidelineStore + 'static,
{
    match service.preview(draft) {
        Ok(classification) => (StatusCode::OK, axum::Json(classification)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn summary_handler<R, G>(
    State(service): State<Arc<TriageService<R, G>>>,
) -> Response
where
    R: SubmissionRepository + 'static,
    G: GuidelineStore + 'static,
{
    match service.summary() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn guidelines_handler<R, G>(
    State(service): State<Arc<TriageService<R, G>>>,
) -> Response
where
    R: SubmissionRepository + 'static,
    G: GuidelineStore + 'static,
{
    match service.guidelines() {
        Ok(thresholds) => (StatusCode::OK, axum::Json(thresholds)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: TriageServiceError) -> Response {
    let status = match &error {
        TriageServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TriageServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        TriageServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        TriageServiceError::Repository(RepositoryError::Unavailable(_))
        | TriageServiceError::Guidelines(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
