//! Property appraisal intake, analysis, and risk assessment pipeline.
//!
//! Text extraction and the two analyzers are thin wrappers: the heavy lifting
//! happens in the PDF library and the injected [`EntityTagger`] /
//! [`ObjectDetector`] backends. The designed logic lives in [`assessment`],
//! which fuses both analyses through a fixed rule table.

pub mod assessment;
mod chunk;
pub(crate) mod compliance;
pub mod document;
pub mod domain;
pub mod extraction;
pub mod imagery;
pub mod intake;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use assessment::{RiskConfig, RiskConfigError, RiskEngine};
pub use chunk::TextChunker;
pub use document::{DocumentAnalysisError, DocumentAnalyzer, EntityTagger, TaggerError};
pub use domain::{
    AppraisalSubmission, AssessmentRecord, Detection, DocumentAnalysis, EntityCatalog, EntityKind,
    EntityMention, FileUpload, ImageAnalysis, RiskAssessment, RiskLevel,
};
pub use extraction::{ExtractionError, PdfTextExtractor};
pub use imagery::{DetectorError, ImageAnalysisError, ImageAnalyzer, ObjectDetector};
pub use intake::{IntakeGuard, UploadPolicy, UploadViolation};
pub use router::appraisal_router;
pub use service::{AppraisalService, AssessmentError};
