use std::collections::{BTreeMap, BTreeSet};

pub(crate) const NO_FINDINGS_NOTE: &str =
    "No major compliance issues flagged based on keyword search.";

/// Surface checklist issues whose trigger keyword appears in the document.
/// Runs independently of risk scoring; iteration order follows the sorted
/// checklist keywords so reports are stable.
pub(crate) fn findings(
    checklist: &BTreeMap<String, String>,
    risk_keywords: &BTreeSet<String>,
) -> Vec<String> {
    let mut report: Vec<String> = checklist
        .iter()
        .filter(|(keyword, _)| risk_keywords.contains(keyword.as_str()))
        .map(|(_, issue)| issue.clone())
        .collect();

    if report.is_empty() {
        report.push(NO_FINDINGS_NOTE.to_string());
    }
    report
}
