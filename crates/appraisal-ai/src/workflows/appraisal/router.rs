use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::json;

use super::document::{DocumentAnalysisError, EntityTagger};
use super::domain::{AppraisalSubmission, FileUpload};
use super::imagery::{ImageAnalysisError, ObjectDetector};
use super::service::{AppraisalService, AssessmentError};

/// Router builder exposing the HTTP endpoint for one-shot assessments.
pub fn appraisal_router<T, D>(service: Arc<AppraisalService<T, D>>) -> Router
where
    T: EntityTagger + 'static,
    D: ObjectDetector + 'static,
{
    Router::new()
        .route(
            "/api/v1/appraisals/assessments",
            post(assess_handler::<T, D>),
        )
        .with_state(service)
}

/// One uploaded file carried over JSON, contents base64-encoded.
#[derive(Debug, Deserialize)]
pub(crate) struct FilePayload {
    name: String,
    content_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssessmentRequest {
    document: FilePayload,
    images: Vec<FilePayload>,
}

impl FilePayload {
    fn into_upload(self) -> Result<FileUpload, base64::DecodeError> {
        let bytes = BASE64.decode(self.data.as_bytes())?;
        Ok(FileUpload {
            name: self.name,
            content_type: self.content_type,
            bytes,
        })
    }
}

fn decode_submission(
    request: AssessmentRequest,
) -> Result<AppraisalSubmission, base64::DecodeError> {
    let document = request.document.into_upload()?;
    let images = request
        .images
        .into_iter()
        .map(FilePayload::into_upload)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AppraisalSubmission { document, images })
}

pub(crate) async fn assess_handler<T, D>(
    State(service): State<Arc<AppraisalService<T, D>>>,
    axum::Json(request): axum::Json<AssessmentRequest>,
) -> Response
where
    T: EntityTagger + 'static,
    D: ObjectDetector + 'static,
{
    let submission = match decode_submission(request) {
        Ok(submission) => submission,
        Err(err) => {
            let payload = json!({
                "error": format!("invalid base64 file payload: {err}"),
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.assess(&submission) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => {
            let status = match &error {
                AssessmentError::Upload(_) | AssessmentError::Extraction(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                AssessmentError::Document(DocumentAnalysisError::EmptyText) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                AssessmentError::Image(
                    ImageAnalysisError::NoImages | ImageAnalysisError::Decode { .. },
                ) => StatusCode::UNPROCESSABLE_ENTITY,
                AssessmentError::Document(_) | AssessmentError::Image(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };

            let payload = json!({ "error": error.to_string() });
            (status, axum::Json(payload)).into_response()
        }
    }
}
