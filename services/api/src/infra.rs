use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use appraisal_ai::workflows::appraisal::{
    Detection, DetectorError, EntityKind, EntityMention, EntityTagger, ObjectDetector, TaggerError,
};
use chrono::NaiveDate;
use image::DynamicImage;
use metrics_exporter_prometheus::PrometheusHandle;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

static ISO_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").expect("hard-coded date pattern compiles"));

static LONG_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},\s+\d{4}\b",
    )
    .expect("hard-coded date pattern compiles")
});

const DEFAULT_GAZETTEER: [&str; 8] = [
    "Des Moines",
    "Cedar Rapids",
    "Davenport",
    "Iowa City",
    "Polk County",
    "Linn County",
    "Scott County",
    "Iowa",
];

/// Offline entity tagger: date patterns validated with chrono plus a location
/// gazetteer. Stands in for a hosted NLP pipeline behind the `EntityTagger`
/// seam; swapping in a real backend is a wiring change in `server::run`.
pub(crate) struct GazetteerTagger {
    locations: Vec<String>,
}

impl GazetteerTagger {
    pub(crate) fn with_locations(locations: &[&str]) -> Self {
        Self {
            locations: locations.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl Default for GazetteerTagger {
    fn default() -> Self {
        Self::with_locations(&DEFAULT_GAZETTEER)
    }
}

impl EntityTagger for GazetteerTagger {
    fn tag(&self, chunk: &str) -> Result<Vec<EntityMention>, TaggerError> {
        let mut mentions = Vec::new();

        for hit in ISO_DATE_PATTERN.find_iter(chunk) {
            if NaiveDate::parse_from_str(hit.as_str(), "%Y-%m-%d").is_ok() {
                mentions.push(EntityMention {
                    kind: EntityKind::Date,
                    text: hit.as_str().to_string(),
                });
            }
        }
        for hit in LONG_DATE_PATTERN.find_iter(chunk) {
            if NaiveDate::parse_from_str(hit.as_str(), "%B %d, %Y").is_ok() {
                mentions.push(EntityMention {
                    kind: EntityKind::Date,
                    text: hit.as_str().to_string(),
                });
            }
        }

        let haystack = chunk.to_lowercase();
        for location in &self.locations {
            if contains_word(&haystack, &location.to_lowercase()) {
                mentions.push(EntityMention {
                    kind: EntityKind::Location,
                    text: location.clone(),
                });
            }
        }

        Ok(mentions)
    }
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    let mut search_from = 0;
    while let Some(offset) = haystack[search_from..].find(needle) {
        let start = search_from + offset;
        let end = start + needle.len();
        let clear_before = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let clear_after = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if clear_before && clear_after {
            return true;
        }
        search_from = end;
    }
    false
}

/// Detection backend serving labels recorded in a manifest keyed by image
/// file name. Stands in for a live vision model behind the `ObjectDetector`
/// seam; images without a manifest entry yield no detections.
#[derive(Debug, Default)]
pub(crate) struct ManifestDetector {
    labels: BTreeMap<String, Vec<String>>,
}

impl ManifestDetector {
    pub(crate) fn from_path(path: &Path) -> io::Result<Self> {
        let raw = fs::read_to_string(path)?;
        let labels: BTreeMap<String, Vec<String>> =
            serde_json::from_str(&raw).map_err(|err| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "detections manifest '{}' is not valid JSON: {err}",
                        path.display()
                    ),
                )
            })?;
        Ok(Self { labels })
    }

    #[cfg(test)]
    pub(crate) fn with_labels(labels: BTreeMap<String, Vec<String>>) -> Self {
        Self { labels }
    }
}

impl ObjectDetector for ManifestDetector {
    fn detect(&self, name: &str, _image: &DynamicImage) -> Result<Vec<Detection>, DetectorError> {
        Ok(self
            .labels
            .get(name)
            .map(|labels| {
                labels
                    .iter()
                    .map(|label| Detection {
                        label: label.clone(),
                        confidence: 1.0,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}
