use std::sync::Arc;

use tracing::info;

use super::assessment::{RiskConfig, RiskEngine};
use super::document::{DocumentAnalysisError, DocumentAnalyzer, EntityTagger};
use super::domain::{AppraisalSubmission, AssessmentRecord};
use super::extraction::{ExtractionError, PdfTextExtractor};
use super::imagery::{ImageAnalysisError, ImageAnalyzer, ObjectDetector};
use super::intake::{IntakeGuard, UploadPolicy, UploadViolation};

/// Service composing the intake guard, text extractor, both analyzers, and
/// the risk engine. Requests run sequentially; the model backends are shared
/// handles loaded once by the host process.
pub struct AppraisalService<T, D> {
    guard: IntakeGuard,
    extractor: PdfTextExtractor,
    documents: DocumentAnalyzer<T>,
    imagery: ImageAnalyzer<D>,
    engine: RiskEngine,
}

impl<T, D> AppraisalService<T, D>
where
    T: EntityTagger + 'static,
    D: ObjectDetector + 'static,
{
    pub fn new(tagger: Arc<T>, detector: Arc<D>, config: RiskConfig) -> Self {
        Self::with_policy(tagger, detector, config, UploadPolicy::default())
    }

    pub fn with_policy(
        tagger: Arc<T>,
        detector: Arc<D>,
        config: RiskConfig,
        policy: UploadPolicy,
    ) -> Self {
        let config = Arc::new(config);

        Self {
            guard: IntakeGuard::with_policy(policy),
            extractor: PdfTextExtractor,
            documents: DocumentAnalyzer::new(tagger),
            imagery: ImageAnalyzer::new(detector, config.clone()),
            engine: RiskEngine::new(config),
        }
    }

    /// Run one submission through the full pipeline. Any failure aborts the
    /// request; no partial assessment is ever returned.
    pub fn assess(
        &self,
        submission: &AppraisalSubmission,
    ) -> Result<AssessmentRecord, AssessmentError> {
        self.guard.admit(submission)?;

        let text = self
            .extractor
            .extract(&submission.document.name, &submission.document.bytes)?;
        let document = self.documents.analyze(&text)?;
        let imagery = self.imagery.analyze(&submission.images)?;
        let assessment = self.engine.assess(&document, &imagery);

        info!(
            document = %submission.document.name,
            images = submission.images.len(),
            risk_score = assessment.risk_score,
            risk_level = assessment.risk_level.label(),
            "appraisal assessment complete"
        );

        Ok(AssessmentRecord {
            document,
            imagery,
            assessment,
        })
    }
}

/// Error raised by the appraisal service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Upload(#[from] UploadViolation),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Document(#[from] DocumentAnalysisError),
    #[error(transparent)]
    Image(#[from] ImageAnalysisError),
}
