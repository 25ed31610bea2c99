use super::super::domain::{DocumentAnalysis, ImageAnalysis};

/// Keywords severe enough to carry the heavy weight on their own.
pub(crate) const HIGH_SEVERITY_KEYWORDS: [&str; 3] = ["fire", "asbestos", "structural_damage"];

const HIGH_SEVERITY_WEIGHT: u32 = 40;
const STANDARD_KEYWORD_WEIGHT: u32 = 15;
const RISK_TAG_WEIGHT: u32 = 20;
const MOISTURE_COMBINATION_WEIGHT: u32 = 25;

pub(crate) struct RuleOutcome {
    pub(crate) raw_score: u32,
    pub(crate) reasoning: Vec<String>,
}

/// Apply the fixed contribution table to both analyses. Keyword iteration
/// follows the sorted set, so the reasoning trail is deterministic.
pub(crate) fn score_indicators(
    document: &DocumentAnalysis,
    imagery: &ImageAnalysis,
) -> RuleOutcome {
    let mut raw_score = 0u32;
    let mut reasoning = Vec::new();

    for keyword in &document.risk_keywords {
        if HIGH_SEVERITY_KEYWORDS.contains(&keyword.as_str()) {
            raw_score += HIGH_SEVERITY_WEIGHT;
            reasoning.push(format!("High-risk keyword '{keyword}' found in document."));
        } else {
            raw_score += STANDARD_KEYWORD_WEIGHT;
            reasoning.push(format!(
                "Potential risk keyword '{keyword}' found in document."
            ));
        }
    }

    if !imagery.risk_tags.is_empty() {
        raw_score += RISK_TAG_WEIGHT * imagery.risk_tags.len() as u32;
        let tags: Vec<&str> = imagery.risk_tags.iter().map(String::as_str).collect();
        reasoning.push(format!(
            "Detected potential risk objects in images: {}",
            tags.join(", ")
        ));
    }

    // Hybrid heuristic carried over unchanged: a detected 'potted plant'
    // stands in for a moisture source when the document also mentions a leak.
    if document.risk_keywords.contains("leak") && imagery.risk_tags.contains("potted plant") {
        raw_score += MOISTURE_COMBINATION_WEIGHT;
        reasoning.push(
            "Combined risk: document mentions 'leak' and images show potential moisture sources."
                .to_string(),
        );
    }

    RuleOutcome {
        raw_score,
        reasoning,
    }
}
