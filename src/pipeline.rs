//! Report materialization: load → normalize → embed → write.
//!
//! Every failure ends the run with a logged diagnostic and a
//! [`ReportOutcome::Aborted`] value. Nothing escapes as a panic or `Err`.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::ReportError;
use crate::io::{AssetProvider, BundledAssets};
use crate::models::{DEFAULT_TEMPLATE, PipelineState, Stage};
use crate::stages::{embed_record, load_record, normalize_record, write_report};

/// Configuration for report generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Identifier of the template to load from the asset provider
    pub template_id: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template_id: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

/// How a run ended
#[derive(Debug)]
pub enum ReportOutcome {
    /// Report written; holds its absolute path
    Written(PathBuf),
    /// Run stopped early, no report produced
    Aborted(ReportError),
}

impl ReportOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, ReportOutcome::Written(_))
    }

    pub fn report_path(&self) -> Option<&Path> {
        match self {
            ReportOutcome::Written(path) => Some(path),
            ReportOutcome::Aborted(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ReportError> {
        match self {
            ReportOutcome::Written(_) => None,
            ReportOutcome::Aborted(error) => Some(error),
        }
    }

    /// Terminal pipeline state of the run
    pub fn state(&self) -> PipelineState {
        match self {
            ReportOutcome::Written(_) => PipelineState::Done,
            ReportOutcome::Aborted(error) => PipelineState::Aborted(error.stage()),
        }
    }

    /// Serializable summary, e.g. for printing from a host process
    pub fn summary(&self) -> RunSummary {
        match self {
            ReportOutcome::Written(path) => RunSummary {
                state: self.state(),
                report_path: Some(path.clone()),
                failure: None,
                reason: None,
            },
            ReportOutcome::Aborted(error) => RunSummary {
                state: self.state(),
                report_path: None,
                failure: Some(error.kind()),
                reason: Some(error.detailed()),
            },
        }
    }
}

/// Machine-readable account of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub state: PipelineState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Report pipeline with injected template source and log sink.
///
/// Holds no per-run state; one generator can serve any number of runs,
/// including concurrent ones on distinct paths.
#[derive(Debug, Clone)]
pub struct ReportGenerator<A = BundledAssets, S = TracingSink> {
    assets: A,
    sink: S,
    config: GeneratorConfig,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(BundledAssets, TracingSink)
    }
}

impl<A: AssetProvider, S: DiagnosticSink> ReportGenerator<A, S> {
    pub fn new(assets: A, sink: S) -> Self {
        Self {
            assets,
            sink,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the pipeline once for `record_path`, writing into `output_dir`
    pub fn generate(&self, record_path: &Path, output_dir: &Path) -> ReportOutcome {
        match self.run(record_path, output_dir) {
            Ok(path) => {
                self.sink.emit(
                    Diagnostic::info("Cucumber pretty report generated").with_path(&path),
                );
                ReportOutcome::Written(path)
            }
            Err(error) => {
                let diagnostic = Diagnostic::error(format!(
                    "Report generation aborted: {}",
                    error.detailed()
                ))
                .at(error.stage());
                let diagnostic = match &error {
                    ReportError::InputMissing { path, .. }
                    | ReportError::InputInvalid { path, .. }
                    | ReportError::OutputUnwritable { path, .. } => diagnostic.with_path(path),
                    ReportError::TemplateMissing { .. } | ReportError::TemplateMalformed { .. } => {
                        diagnostic
                    }
                };
                self.sink.emit(diagnostic);
                ReportOutcome::Aborted(error)
            }
        }
    }

    fn run(&self, record_path: &Path, output_dir: &Path) -> Result<PathBuf, ReportError> {
        let sink: &dyn DiagnosticSink = &self.sink;
        let mut state = PipelineState::Start;

        let loaded = self.step(&mut state, || load_record(record_path, sink))?;
        let canonical = self.step(&mut state, || normalize_record(&loaded, sink))?;
        drop(loaded);
        let merged = self.step(&mut state, || {
            embed_record(&canonical, &self.config.template_id, &self.assets, sink)
        })?;
        drop(canonical);
        let written = self.step(&mut state, || write_report(merged, output_dir, sink))?;

        let done = state.advance();
        self.enter(&mut state, done);
        Ok(written)
    }

    /// Run the stage pending in `state`, then advance or abort
    fn step<T>(
        &self,
        state: &mut PipelineState,
        stage: impl FnOnce() -> Result<T, ReportError>,
    ) -> Result<T, ReportError> {
        match stage() {
            Ok(value) => {
                let next = state.advance();
                self.enter(state, next);
                Ok(value)
            }
            Err(error) => {
                self.enter(state, PipelineState::Aborted(error.stage()));
                Err(error)
            }
        }
    }

    /// Move to `next`, logging the transition under the stage that caused it.
    /// Terminal states are final.
    fn enter(&self, state: &mut PipelineState, next: PipelineState) {
        if state.is_terminal() {
            return;
        }
        let mut diagnostic =
            Diagnostic::debug(format!("Pipeline state {:?} -> {:?}", state, next));
        if let Some(stage) = state.pending_stage() {
            diagnostic = diagnostic.at(stage);
        }
        self.sink.emit(diagnostic);
        *state = next;
    }
}

/// Generate the report with the bundled template, logging through `tracing`.
///
/// This is the single trigger a test harness calls once its run has
/// finished writing `record_path`.
pub fn generate_report(record_path: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> ReportOutcome {
    ReportGenerator::default().generate(record_path.as_ref(), output_dir.as_ref())
}
