use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Raw uploaded file as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// One appraisal document plus its supporting photos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppraisalSubmission {
    pub document: FileUpload,
    pub images: Vec<FileUpload>,
}

/// Kinds of named-entity mentions the pipeline keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Location,
    Date,
}

/// Single mention surfaced by an entity tagging backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMention {
    pub kind: EntityKind,
    pub text: String,
}

/// Locations and dates recognized across all document chunks, de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCatalog {
    pub locations: BTreeSet<String>,
    pub dates: BTreeSet<String>,
}

/// Digest of the appraisal document text. Immutable once returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub risk_keywords: BTreeSet<String>,
    pub entities: EntityCatalog,
}

/// Digest of the uploaded property photos. Immutable once returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub all_detected_objects: BTreeSet<String>,
    pub risk_tags: BTreeSet<String>,
}

/// One detected object reported by a vision backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f32,
}

/// Severity bands for the composite risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Composite verdict handed back to the caller: capped score, severity band,
/// reasoning trail, and compliance findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub reasoning: Vec<String>,
    pub compliance_report: Vec<String>,
}

/// Full per-request record pairing the verdict with the analyses it was
/// derived from, so callers can render the raw findings alongside the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub document: DocumentAnalysis,
    pub imagery: ImageAnalysis,
    pub assessment: RiskAssessment,
}
