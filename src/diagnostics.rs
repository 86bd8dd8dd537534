//! Injected logging capability.
//!
//! The pipeline reports everything through a [`DiagnosticSink`] handed to it
//! by the caller. [`TracingSink`] forwards to whatever `tracing` subscriber
//! the host installed; [`CapturingSink`] keeps events in memory.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::models::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

/// A single pipeline log event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            stage: None,
            path: None,
            message: message.into(),
        }
    }

    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(Severity::Debug, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn at(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }
}

/// Destination for pipeline diagnostics
pub trait DiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn emit(&self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for std::sync::Arc<S> {
    fn emit(&self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic)
    }
}

/// Forwards diagnostics to `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        let Diagnostic {
            severity,
            stage,
            path,
            message,
        } = diagnostic;
        let stage = stage.map(|s| s.to_string()).unwrap_or_default();
        let path = path.map(|p| p.display().to_string()).unwrap_or_default();

        match severity {
            Severity::Debug => debug!(stage = %stage, path = %path, "{}", message),
            Severity::Info => info!(stage = %stage, path = %path, "{}", message),
            Severity::Warn => warn!(stage = %stage, path = %path, "{}", message),
            Severity::Error => error!(stage = %stage, path = %path, "{}", message),
        }
    }
}

/// Keeps every diagnostic in memory, in emission order
#[derive(Debug, Default)]
pub struct CapturingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Captured events at or above `severity`
    pub fn at_least(&self, severity: Severity) -> Vec<Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(|d| d.severity >= severity)
            .collect()
    }

    /// Whether any event of exactly `severity` mentions `needle`
    pub fn contains(&self, severity: Severity, needle: &str) -> bool {
        self.diagnostics()
            .iter()
            .any(|d| d.severity == severity && d.message.contains(needle))
    }
}

impl DiagnosticSink for CapturingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic);
    }
}
