use lopdf::Document;

/// Failures while pulling text out of the appraisal PDF. Library errors are
/// wrapped with their original message and abort the request.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("failed to open PDF '{name}': {detail}")]
    Unreadable { name: String, detail: String },
    #[error("failed to extract text from page {page} of '{name}': {detail}")]
    Page {
        name: String,
        page: u32,
        detail: String,
    },
    #[error("no text could be extracted from '{name}'")]
    NoText { name: String },
}

/// Thin wrapper around the PDF library returning page-concatenated text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn extract(&self, name: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
        let document = Document::load_mem(bytes).map_err(|err| ExtractionError::Unreadable {
            name: name.to_string(),
            detail: err.to_string(),
        })?;

        let mut text = String::new();
        for (page, _object_id) in document.get_pages() {
            let content =
                document
                    .extract_text(&[page])
                    .map_err(|err| ExtractionError::Page {
                        name: name.to_string(),
                        page,
                        detail: err.to_string(),
                    })?;
            if !content.trim().is_empty() {
                text.push_str(&content);
                text.push('\n');
            }
        }

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText {
                name: name.to_string(),
            });
        }

        Ok(text)
    }
}
