use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use appraisal_ai::config::AppConfig;
use appraisal_ai::error::AppError;
use appraisal_ai::workflows::appraisal::{
    AppraisalService, AppraisalSubmission, AssessmentRecord, FileUpload, RiskConfig,
};
use clap::Args;

use crate::infra::{GazetteerTagger, ManifestDetector};

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Appraisal document (PDF)
    #[arg(long)]
    pub(crate) document: PathBuf,
    /// Property photo; repeat for up to five images
    #[arg(long = "image", required = true)]
    pub(crate) images: Vec<PathBuf>,
    /// Risk rules file (defaults to the configured path)
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Detection manifest mapping image names to object labels
    #[arg(long)]
    pub(crate) detections: Option<PathBuf>,
    /// Print the raw assessment record as JSON instead of the report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        document,
        images,
        rules,
        detections,
        json,
    } = args;

    let config = AppConfig::load()?;
    let rules_path = rules.unwrap_or(config.rules.path);
    let rules = RiskConfig::from_path(&rules_path)?;

    let detector = match detections {
        Some(path) => ManifestDetector::from_path(&path)?,
        None => ManifestDetector::default(),
    };
    let service = AppraisalService::new(
        Arc::new(GazetteerTagger::default()),
        Arc::new(detector),
        rules,
    );

    let submission = AppraisalSubmission {
        document: read_upload(&document)?,
        images: images
            .iter()
            .map(|path| read_upload(path))
            .collect::<Result<Vec<_>, _>>()?,
    };

    let record = service.assess(&submission).map_err(AppError::from)?;

    if json {
        let rendered = serde_json::to_string_pretty(&record)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        println!("{rendered}");
    } else {
        render_assessment(&record);
    }

    Ok(())
}

fn read_upload(path: &Path) -> Result<FileUpload, AppError> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let content_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string();

    Ok(FileUpload {
        name,
        content_type,
        bytes,
    })
}

fn render_assessment(record: &AssessmentRecord) {
    let assessment = &record.assessment;

    println!("Property risk assessment");
    println!(
        "Risk level: {} (score {}/100)",
        assessment.risk_level.label(),
        assessment.risk_score
    );

    println!("\nReasoning");
    for reason in &assessment.reasoning {
        println!("- {reason}");
    }

    println!("\nCompliance report");
    for issue in &assessment.compliance_report {
        println!("- {issue}");
    }

    render_set("Document keywords", &record.document.risk_keywords);
    render_set("Locations", &record.document.entities.locations);
    render_set("Dates", &record.document.entities.dates);
    render_set("Detected objects", &record.imagery.all_detected_objects);
    render_set("Risk tags", &record.imagery.risk_tags);
}

fn render_set(label: &str, values: &BTreeSet<String>) {
    if values.is_empty() {
        println!("\n{label}: none");
    } else {
        let joined = values.iter().map(String::as_str).collect::<Vec<_>>();
        println!("\n{label}: {}", joined.join(", "));
    }
}
