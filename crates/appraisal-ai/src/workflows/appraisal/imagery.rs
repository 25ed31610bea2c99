use std::collections::BTreeSet;
use std::sync::Arc;

use image::DynamicImage;

use super::assessment::RiskConfig;
use super::domain::{Detection, FileUpload, ImageAnalysis};

/// Failure reported by an object detection backend.
#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    #[error("object detection backend failed: {0}")]
    Backend(String),
}

/// Object detection backend contract. Implementations wrap a pretrained
/// vision model; the host process loads the model once and shares the handle.
pub trait ObjectDetector: Send + Sync {
    fn detect(&self, name: &str, image: &DynamicImage) -> Result<Vec<Detection>, DetectorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ImageAnalysisError {
    #[error("no images provided for analysis")]
    NoImages,
    #[error("failed to decode image '{name}': {detail}")]
    Decode { name: String, detail: String },
    #[error("failed to process image '{name}': {source}")]
    Detector {
        name: String,
        #[source]
        source: DetectorError,
    },
}

/// Runs the detector over every photo and folds labels into one analysis,
/// keeping the subset that matches the configured potential risk objects.
pub struct ImageAnalyzer<D> {
    detector: Arc<D>,
    config: Arc<RiskConfig>,
}

impl<D> ImageAnalyzer<D>
where
    D: ObjectDetector,
{
    pub fn new(detector: Arc<D>, config: Arc<RiskConfig>) -> Self {
        Self { detector, config }
    }

    pub fn analyze(&self, images: &[FileUpload]) -> Result<ImageAnalysis, ImageAnalysisError> {
        if images.is_empty() {
            return Err(ImageAnalysisError::NoImages);
        }

        let mut all_detected_objects = BTreeSet::new();
        let mut risk_tags = BTreeSet::new();

        for upload in images {
            let decoded = image::load_from_memory(&upload.bytes).map_err(|err| {
                ImageAnalysisError::Decode {
                    name: upload.name.clone(),
                    detail: err.to_string(),
                }
            })?;

            let detections = self.detector.detect(&upload.name, &decoded).map_err(|source| {
                ImageAnalysisError::Detector {
                    name: upload.name.clone(),
                    source,
                }
            })?;

            for Detection { label, .. } in detections {
                if self.config.potential_risk_objects.contains(&label) {
                    risk_tags.insert(label.clone());
                }
                all_detected_objects.insert(label);
            }
        }

        Ok(ImageAnalysis {
            all_detected_objects,
            risk_tags,
        })
    }
}
