use std::collections::{BTreeMap, BTreeSet};
use std::io::Cursor;
use std::sync::Arc;

use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde_json::Value;

use crate::workflows::appraisal::assessment::{RiskConfig, RiskEngine};
use crate::workflows::appraisal::document::{EntityTagger, TaggerError};
use crate::workflows::appraisal::domain::{
    AppraisalSubmission, Detection, DocumentAnalysis, EntityMention, FileUpload, ImageAnalysis,
};
use crate::workflows::appraisal::imagery::{DetectorError, ObjectDetector};
use crate::workflows::appraisal::service::AppraisalService;

pub(super) fn risk_config() -> RiskConfig {
    let mut compliance_checklist = BTreeMap::new();
    compliance_checklist.insert(
        "asbestos".to_string(),
        "Certified asbestos inspection required before any renovation.".to_string(),
    );
    compliance_checklist.insert(
        "leak".to_string(),
        "Active leaks must be remediated and re-inspected for mold.".to_string(),
    );

    RiskConfig {
        potential_risk_objects: ["potted plant", "bench"]
            .into_iter()
            .map(str::to_string)
            .collect(),
        compliance_checklist,
    }
}

pub(super) fn engine() -> RiskEngine {
    RiskEngine::new(Arc::new(risk_config()))
}

pub(super) fn document_analysis(keywords: &[&str]) -> DocumentAnalysis {
    DocumentAnalysis {
        risk_keywords: keywords.iter().map(|k| k.to_string()).collect(),
        entities: Default::default(),
    }
}

pub(super) fn image_analysis(objects: &[&str], tags: &[&str]) -> ImageAnalysis {
    ImageAnalysis {
        all_detected_objects: objects.iter().map(|o| o.to_string()).collect(),
        risk_tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

#[derive(Default, Clone)]
pub(super) struct FakeTagger {
    pub(super) mentions: Vec<EntityMention>,
}

impl EntityTagger for FakeTagger {
    fn tag(&self, _chunk: &str) -> Result<Vec<EntityMention>, TaggerError> {
        Ok(self.mentions.clone())
    }
}

pub(super) struct FailingTagger;

impl EntityTagger for FailingTagger {
    fn tag(&self, _chunk: &str) -> Result<Vec<EntityMention>, TaggerError> {
        Err(TaggerError::Backend("pipeline unavailable".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct FakeDetector {
    pub(super) labels: Vec<String>,
}

impl FakeDetector {
    pub(super) fn with_labels(labels: &[&str]) -> Self {
        Self {
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl ObjectDetector for FakeDetector {
    fn detect(&self, _name: &str, _image: &DynamicImage) -> Result<Vec<Detection>, DetectorError> {
        Ok(self
            .labels
            .iter()
            .map(|label| Detection {
                label: label.clone(),
                confidence: 0.9,
            })
            .collect())
    }
}

pub(super) struct FailingDetector;

impl ObjectDetector for FailingDetector {
    fn detect(&self, _name: &str, _image: &DynamicImage) -> Result<Vec<Detection>, DetectorError> {
        Err(DetectorError::Backend("model not loaded".to_string()))
    }
}

/// Minimal single-page PDF carrying `text`, built with the same library the
/// extractor reads with.
pub(super) fn pdf_bytes(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![50.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("content stream encodes"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut Cursor::new(&mut buffer))
        .expect("pdf serializes");
    buffer
}

pub(super) fn png_bytes() -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::new_rgb8(2, 2)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .expect("png encodes");
    buffer.into_inner()
}

pub(super) fn pdf_upload(text: &str) -> FileUpload {
    FileUpload {
        name: "appraisal.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        bytes: pdf_bytes(text),
    }
}

pub(super) fn png_upload(name: &str) -> FileUpload {
    FileUpload {
        name: name.to_string(),
        content_type: "image/png".to_string(),
        bytes: png_bytes(),
    }
}

pub(super) fn submission(document_text: &str, image_count: usize) -> AppraisalSubmission {
    AppraisalSubmission {
        document: pdf_upload(document_text),
        images: (0..image_count)
            .map(|index| png_upload(&format!("photo-{index}.png")))
            .collect(),
    }
}

pub(super) fn build_service(
    detector_labels: &[&str],
) -> AppraisalService<FakeTagger, FakeDetector> {
    AppraisalService::new(
        Arc::new(FakeTagger::default()),
        Arc::new(FakeDetector::with_labels(detector_labels)),
        risk_config(),
    )
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn contains_entry(entries: &[String], needle: &str) -> bool {
    entries.iter().any(|entry| entry.contains(needle))
}

pub(super) fn keyword_set(keywords: &[&str]) -> BTreeSet<String> {
    keywords.iter().map(|k| k.to_string()).collect()
}
