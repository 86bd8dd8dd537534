pub mod diagnostics;
pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod session;
pub mod stages;

pub use diagnostics::{CapturingSink, Diagnostic, DiagnosticSink, Severity, TracingSink};
pub use error::ReportError;
pub use io::{AssetProvider, BundledAssets, DirectoryAssets, InMemoryAssets};
pub use models::{
    CanonicalRecord, PipelineState, Stage, DEFAULT_TEMPLATE, PLACEHOLDER, REPORT_FILE_NAME,
};
pub use pipeline::{generate_report, GeneratorConfig, ReportGenerator, ReportOutcome, RunSummary};
pub use session::{ReportSession, DEFAULT_OUTPUT_DIR};
pub use stages::{canonicalize, embed_record, load_record, normalize_record, write_report};
