use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};

use super::common::*;
use crate::workflows::appraisal::domain::FileUpload;
use crate::workflows::appraisal::router::{assess_handler, AssessmentRequest};
use crate::workflows::appraisal::service::AppraisalService;

fn file_payload(upload: &FileUpload) -> Value {
    json!({
        "name": upload.name,
        "content_type": upload.content_type,
        "data": BASE64.encode(&upload.bytes),
    })
}

fn request_for(document_text: &str, image_count: usize) -> AssessmentRequest {
    let bundle = submission(document_text, image_count);
    let payload = json!({
        "document": file_payload(&bundle.document),
        "images": bundle
            .images
            .iter()
            .map(file_payload)
            .collect::<Vec<_>>(),
    });
    serde_json::from_value(payload).expect("request deserializes")
}

#[tokio::test]
async fn assess_handler_returns_the_full_record() {
    let service = Arc::new(build_service(&["potted plant"]));

    let response = assess_handler::<FakeTagger, FakeDetector>(
        State(service),
        axum::Json(request_for("A slow leak was found under the sink.", 1)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["assessment"]["risk_score"], 60);
    assert_eq!(body["assessment"]["risk_level"], "Medium");
    assert!(body["document"]["risk_keywords"]
        .as_array()
        .expect("keywords array")
        .contains(&json!("leak")));
}

#[tokio::test]
async fn assess_handler_rejects_invalid_base64() {
    let service = Arc::new(build_service(&[]));
    let request: AssessmentRequest = serde_json::from_value(json!({
        "document": {
            "name": "appraisal.pdf",
            "content_type": "application/pdf",
            "data": "!!! not base64 !!!",
        },
        "images": [],
    }))
    .expect("request deserializes");

    let response =
        assess_handler::<FakeTagger, FakeDetector>(State(service), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("base64"));
}

#[tokio::test]
async fn assess_handler_rejects_policy_violations() {
    let service = Arc::new(build_service(&[]));

    let response = assess_handler::<FakeTagger, FakeDetector>(
        State(service),
        axum::Json(request_for("fine", 6)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("too many images"));
}

#[tokio::test]
async fn assess_handler_maps_backend_failures_to_internal_error() {
    let service = Arc::new(AppraisalService::new(
        Arc::new(FakeTagger::default()),
        Arc::new(FailingDetector),
        risk_config(),
    ));

    let response = assess_handler::<FakeTagger, FailingDetector>(
        State(service),
        axum::Json(request_for("fine", 1)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
