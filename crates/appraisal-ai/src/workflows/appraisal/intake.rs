use mime::Mime;

use super::domain::{AppraisalSubmission, FileUpload};

const DEFAULT_MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_MAX_IMAGES: usize = 5;

/// Violations raised while admitting an upload bundle.
#[derive(Debug, thiserror::Error)]
pub enum UploadViolation {
    #[error("document '{name}' is empty")]
    EmptyDocument { name: String },
    #[error("document '{name}' exceeds the {limit} byte limit ({found} bytes)")]
    DocumentTooLarge {
        name: String,
        limit: usize,
        found: usize,
    },
    #[error("document '{name}' has unsupported content type '{found}' (expected application/pdf)")]
    UnsupportedDocumentType { name: String, found: String },
    #[error("no images provided for analysis")]
    NoImages,
    #[error("too many images: {found} uploaded, limit is {limit}")]
    TooManyImages { limit: usize, found: usize },
    #[error("image '{name}' is empty")]
    EmptyImage { name: String },
    #[error("image '{name}' exceeds the {limit} byte limit ({found} bytes)")]
    ImageTooLarge {
        name: String,
        limit: usize,
        found: usize,
    },
    #[error("image '{name}' has unsupported content type '{found}' (expected png or jpeg)")]
    UnsupportedImageType { name: String, found: String },
}

/// Policy dials backing upload admission.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_document_bytes: usize,
    max_image_bytes: usize,
    max_images: usize,
}

impl UploadPolicy {
    pub fn new(max_document_bytes: usize, max_image_bytes: usize, max_images: usize) -> Self {
        let sanitize = |value: usize, fallback: usize| if value == 0 { fallback } else { value };

        Self {
            max_document_bytes: sanitize(max_document_bytes, DEFAULT_MAX_DOCUMENT_BYTES),
            max_image_bytes: sanitize(max_image_bytes, DEFAULT_MAX_IMAGE_BYTES),
            max_images: sanitize(max_images, DEFAULT_MAX_IMAGES),
        }
    }

    pub fn max_document_bytes(&self) -> usize {
        self.max_document_bytes
    }

    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes
    }

    pub fn max_images(&self) -> usize {
        self.max_images
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_DOCUMENT_BYTES,
            DEFAULT_MAX_IMAGE_BYTES,
            DEFAULT_MAX_IMAGES,
        )
    }
}

/// Guard admitting submissions before any extraction or model work happens.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    policy: UploadPolicy,
}

impl IntakeGuard {
    pub fn with_policy(policy: UploadPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn admit(&self, submission: &AppraisalSubmission) -> Result<(), UploadViolation> {
        self.check_document(&submission.document)?;

        if submission.images.is_empty() {
            return Err(UploadViolation::NoImages);
        }
        if submission.images.len() > self.policy.max_images {
            return Err(UploadViolation::TooManyImages {
                limit: self.policy.max_images,
                found: submission.images.len(),
            });
        }

        for image in &submission.images {
            self.check_image(image)?;
        }

        Ok(())
    }

    fn check_document(&self, document: &FileUpload) -> Result<(), UploadViolation> {
        if document.bytes.is_empty() {
            return Err(UploadViolation::EmptyDocument {
                name: document.name.clone(),
            });
        }
        if document.bytes.len() > self.policy.max_document_bytes {
            return Err(UploadViolation::DocumentTooLarge {
                name: document.name.clone(),
                limit: self.policy.max_document_bytes,
                found: document.bytes.len(),
            });
        }
        if !document_mime_supported(&document.content_type) {
            return Err(UploadViolation::UnsupportedDocumentType {
                name: document.name.clone(),
                found: document.content_type.clone(),
            });
        }
        Ok(())
    }

    fn check_image(&self, image: &FileUpload) -> Result<(), UploadViolation> {
        if image.bytes.is_empty() {
            return Err(UploadViolation::EmptyImage {
                name: image.name.clone(),
            });
        }
        if image.bytes.len() > self.policy.max_image_bytes {
            return Err(UploadViolation::ImageTooLarge {
                name: image.name.clone(),
                limit: self.policy.max_image_bytes,
                found: image.bytes.len(),
            });
        }
        if !image_mime_supported(&image.content_type) {
            return Err(UploadViolation::UnsupportedImageType {
                name: image.name.clone(),
                found: image.content_type.clone(),
            });
        }
        Ok(())
    }
}

fn document_mime_supported(value: &str) -> bool {
    match value.parse::<Mime>() {
        Ok(parsed) => parsed.essence_str() == "application/pdf",
        Err(_) => false,
    }
}

/// `image/jpg` is non-standard but common in upload metadata; accept it
/// alongside the registered png/jpeg types.
fn image_mime_supported(value: &str) -> bool {
    match value.parse::<Mime>() {
        Ok(parsed) => {
            parsed.type_() == mime::IMAGE
                && matches!(parsed.subtype().as_str(), "png" | "jpeg" | "jpg")
        }
        Err(_) => false,
    }
}
