mod config;
pub(crate) mod policy;
mod rules;

pub use config::{RiskConfig, RiskConfigError};

use std::sync::Arc;

use super::compliance;
use super::domain::{DocumentAnalysis, ImageAnalysis, RiskAssessment};

const NO_INDICATORS_NOTE: &str = "No specific risk indicators found. Standard assessment.";

/// Stateless engine fusing the document and image analyses through the fixed
/// rule table into a capped score, severity band, reasoning trail, and
/// compliance report. Pure over its inputs and the immutable configuration.
pub struct RiskEngine {
    config: Arc<RiskConfig>,
}

impl RiskEngine {
    pub fn new(config: Arc<RiskConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    pub fn assess(&self, document: &DocumentAnalysis, imagery: &ImageAnalysis) -> RiskAssessment {
        let rules::RuleOutcome {
            raw_score,
            mut reasoning,
        } = rules::score_indicators(document, imagery);

        let risk_level = policy::classify(raw_score);

        if reasoning.is_empty() {
            reasoning.push(NO_INDICATORS_NOTE.to_string());
        }

        let compliance_report = compliance::findings(
            &self.config.compliance_checklist,
            &document.risk_keywords,
        );

        RiskAssessment {
            risk_score: policy::cap(raw_score),
            risk_level,
            reasoning,
            compliance_report,
        }
    }
}
