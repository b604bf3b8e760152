use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::underwriting::intake::SubmissionDraft;
use crate::workflows::underwriting::router;
use crate::workflows::underwriting::TriageService;

fn json_request(method: &str, uri: &str, draft: &SubmissionDraft) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(draft).expect("serialize draft")))
        .expect("request builds")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn submit_route_accepts_drafts() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/underwriting/submissions",
            &draft(),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "pending");
    assert!(payload["submission_id"]
        .as_str()
        .expect("id present")
        .starts_with("sub-"));
}

#[tokio::test]
async fn submit_handler_returns_unprocessable_for_invalid_draft() {
    let (service, _) = build_service();
    let mut draft = draft();
    draft.winnability = Some(250);

    let response = router::submit_handler::<MemoryRepository, MemoryGuidelines>(
        State(Arc::new(service)),
        axum::Json(draft),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("winnability"));
}

#[tokio::test]
async fn submit_handler_returns_conflict_on_duplicate() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let mut draft = draft();
    draft.id = Some("acme-1".to_string());
    service.submit(draft.clone()).expect("first accepted");

    let response = router::submit_handler::<MemoryRepository, MemoryGuidelines>(
        State(service),
        axum::Json(draft),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn status_handler_returns_not_found_for_unknown_ids() {
    let (service, _) = build_service();

    let response = router::status_handler::<MemoryRepository, MemoryGuidelines>(
        State(Arc::new(service)),
        Path("nope".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn classify_route_returns_classification() {
    let (service, _) = build_service();
    let record = service
        .submit(low_winnability_draft())
        .expect("submission accepted");
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request(
            "POST",
            &format!(
                "/api/v1/underwriting/submissions/{}/classify",
                record.submission.id
            ),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["verdict"], "NOT_SAFE");
    assert_eq!(payload["score"], 40);
}

#[tokio::test]
async fn inbox_route_classifies_pending_submissions() {
    let (service, _) = build_service();
    service.submit(draft()).expect("accepted");
    service.submit(low_winnability_draft()).expect("accepted");
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/underwriting/submissions"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let rows = payload.as_array().expect("array payload");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["verdict"], "SAFE");
    assert_eq!(rows[1]["verdict"], "NOT_SAFE");
    assert_eq!(
        rows[1]["reasoning"],
        "Winnability score of 40 is below minimum threshold of 50"
    );
}

#[tokio::test]
async fn evaluate_route_previews_without_storing() {
    let (service, repository) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/underwriting/evaluate",
            &draft(),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["verdict"], "SAFE");
    assert_eq!(payload["reasoning"], "Policy meets all safety criteria.");
    assert!(repository
        .records
        .lock()
        .expect("repository mutex")
        .is_empty());
}

#[tokio::test]
async fn guidelines_route_returns_thresholds_in_effect() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/underwriting/guidelines"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["max_tiv"], 100_000_000.0);
    assert_eq!(payload["min_winnability"], 50);
}

#[tokio::test]
async fn summary_route_reports_internal_error_when_repository_is_down() {
    let service = TriageService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryGuidelines(thresholds())),
    );

    let response = router::summary_handler::<UnavailableRepository, MemoryGuidelines>(State(
        Arc::new(service),
    ))
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn status_route_spells_verdicts_like_classify() {
    let (service, _) = build_service();
    let record = service
        .submit(low_winnability_draft())
        .expect("submission accepted");
    let uri = format!("/api/v1/underwriting/submissions/{}", record.submission.id);
    let router = router_with_service(service);

    let classified = router
        .clone()
        .oneshot(empty_request("POST", &format!("{uri}/classify")))
        .await
        .expect("route executes");
    let classified = read_json_body(classified).await;
    let status = router
        .oneshot(empty_request("GET", &uri))
        .await
        .expect("route executes");
    let status = read_json_body(status).await;

    assert_eq!(classified["verdict"], "NOT_SAFE");
    assert_eq!(status["verdict"], classified["verdict"]);
}
