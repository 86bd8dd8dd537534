//! Failure taxonomy for a report run.
//!
//! Every variant is recoverable: the pipeline logs it and ends the run
//! without an artifact, the caller never sees a panic.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{PLACEHOLDER, Stage};

#[derive(Debug, Error)]
pub enum ReportError {
    /// Record path absent, not a file, empty, or unreadable
    #[error("JSON report file not found or is empty: {path:?} ({reason})")]
    InputMissing { path: PathBuf, reason: String },

    /// Record text is not a well-formed JSON document
    #[error("JSON report file is not valid JSON: {path:?}")]
    InputInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Asset provider has no template under this identifier
    #[error("could not find report template {template:?}")]
    TemplateMissing { template: String },

    /// Template found but the placeholder literal is absent
    #[error("could not find placeholder '{}' in template {template:?}", PLACEHOLDER)]
    TemplateMalformed { template: String },

    /// Output directory could not be created or the report file written
    #[error("could not write report to {path:?}")]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// The pipeline stage that raised this error
    pub fn stage(&self) -> Stage {
        match self {
            ReportError::InputMissing { .. } => Stage::Load,
            ReportError::InputInvalid { .. } => Stage::Normalize,
            ReportError::TemplateMissing { .. } | ReportError::TemplateMalformed { .. } => {
                Stage::Embed
            }
            ReportError::OutputUnwritable { .. } => Stage::Write,
        }
    }

    /// Short machine-friendly name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            ReportError::InputMissing { .. } => "input_missing",
            ReportError::InputInvalid { .. } => "input_invalid",
            ReportError::TemplateMissing { .. } => "template_missing",
            ReportError::TemplateMalformed { .. } => "template_malformed",
            ReportError::OutputUnwritable { .. } => "output_unwritable",
        }
    }

    /// Display text followed by the chain of underlying causes
    pub fn detailed(&self) -> String {
        let mut text = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            text.push_str(": ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        text
    }
}
