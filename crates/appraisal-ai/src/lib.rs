//! Core library for the property appraisal risk assessor.
//!
//! The [`workflows::appraisal`] module carries the assessment pipeline: upload
//! intake, PDF text extraction, document and image analysis behind injectable
//! model backends, and the rule-based risk engine that fuses both analyses
//! into a score and compliance report.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
