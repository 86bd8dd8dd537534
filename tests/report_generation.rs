//! End-to-end runs of the report pipeline against real files.

use std::path::{Path, PathBuf};

use cucumber_reportr::{
    generate_report, CapturingSink, InMemoryAssets, PipelineState, ReportError, ReportGenerator,
    ReportOutcome, Severity, Stage, DEFAULT_TEMPLATE, PLACEHOLDER, REPORT_FILE_NAME,
};
use serde_json::Value;

const SAMPLE_RECORD: &str = r#"[{"name":"Sample Feature","elements":[{"name":"Sample Scenario","steps":[{"keyword":"Given ","name":"I have a sample step","result":{"status":"passed","duration":1500000}}]}]}]"#;

const PREFIX: &str = "<!doctype html>\n<html><body>\n<script>\n  window.CUCUMBER_REPORT_DATA = ";
const SUFFIX: &str = ";\n</script>\n</body></html>\n";

fn script_template() -> String {
    format!("{PREFIX}{PLACEHOLDER}{SUFFIX}")
}

fn assets_with(template: impl Into<String>) -> InMemoryAssets {
    InMemoryAssets::new().with_asset(DEFAULT_TEMPLATE, template)
}

struct Fixture {
    _dir: tempfile::TempDir,
    record: PathBuf,
    output: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("cucumber.json");
        let output = dir.path().join("report-output");
        Self {
            _dir: dir,
            record,
            output,
        }
    }

    fn with_record(text: &str) -> Self {
        let fixture = Self::new();
        std::fs::write(&fixture.record, text).unwrap();
        fixture
    }

    fn report(&self) -> PathBuf {
        self.output.join(REPORT_FILE_NAME)
    }

    fn run(&self, assets: InMemoryAssets, sink: &CapturingSink) -> ReportOutcome {
        ReportGenerator::new(assets, sink).generate(&self.record, &self.output)
    }
}

fn embedded_segment(report: &str) -> &str {
    report
        .strip_prefix(PREFIX)
        .and_then(|rest| rest.strip_suffix(SUFFIX))
        .expect("template text around the record must be unchanged")
}

fn assert_no_report(outcome: &ReportOutcome, output: &Path) {
    assert!(!outcome.is_written());
    assert!(!output.join(REPORT_FILE_NAME).exists());
}

#[test]
fn test_sample_feature_with_bundled_template() {
    let fixture = Fixture::with_record(SAMPLE_RECORD);

    let outcome = generate_report(&fixture.record, &fixture.output);

    let path = outcome.report_path().expect("report should be written");
    assert!(path.is_absolute());
    let report = std::fs::read_to_string(fixture.report()).unwrap();
    assert!(report.contains("\"Sample Feature\""));
    assert!(report.contains("\"Sample Scenario\""));
    assert!(report.contains("\"status\":\"passed\""));
    assert!(!report.contains(PLACEHOLDER));
}

#[test]
fn test_record_embedded_once_at_placeholder() {
    let pretty = serde_json::to_string_pretty(
        &serde_json::from_str::<Value>(SAMPLE_RECORD).unwrap(),
    )
    .unwrap();
    let fixture = Fixture::with_record(&pretty);
    let sink = CapturingSink::new();

    let outcome = fixture.run(assets_with(script_template()), &sink);
    assert_eq!(outcome.state(), PipelineState::Done);

    let report = std::fs::read_to_string(fixture.report()).unwrap();
    assert_eq!(embedded_segment(&report), SAMPLE_RECORD);
    assert_eq!(report.matches(SAMPLE_RECORD).count(), 1);
}

#[test]
fn test_round_trip_preserves_document_and_key_order() {
    let record = r#"[
      {
        "uri": "features/attachments.feature",
        "keyword": "Feature",
        "name": "Fonctionnalité: pièces jointes ✓",
        "line": 1,
        "tags": [{"name": "@smoke", "line": 0}],
        "elements": [{
          "type": "scenario",
          "name": "Screenshot",
          "steps": [{
            "keyword": "Given ",
            "name": "I take a screenshot",
            "result": {"status": "failed", "duration": 2456789012, "error_message": "boom\n\tat Steps.java:35"},
            "embeddings": [{"mime_type": "image/png", "data": "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8/5+hHgAHggJ/PchI7wAAAABJRU5ErkJggg=="}]
          }]
        }]
      }
    ]"#;
    let fixture = Fixture::with_record(record);

    let outcome = fixture.run(assets_with(script_template()), &CapturingSink::new());
    assert!(outcome.is_written());

    let report = std::fs::read_to_string(fixture.report()).unwrap();
    let embedded: Value = serde_json::from_str(embedded_segment(&report)).unwrap();
    let original: Value = serde_json::from_str(record).unwrap();

    assert_eq!(embedded, original);
    assert_eq!(
        serde_json::to_string(&embedded).unwrap(),
        serde_json::to_string(&original).unwrap()
    );
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let fixture = Fixture::with_record(SAMPLE_RECORD);

    fixture.run(assets_with(script_template()), &CapturingSink::new());
    let first = std::fs::read(fixture.report()).unwrap();

    fixture.run(assets_with(script_template()), &CapturingSink::new());
    let second = std::fs::read(fixture.report()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_previous_report_overwritten() {
    let fixture = Fixture::with_record(SAMPLE_RECORD);
    std::fs::create_dir_all(&fixture.output).unwrap();
    std::fs::write(fixture.report(), "stale report ".repeat(1000)).unwrap();

    fixture.run(assets_with(script_template()), &CapturingSink::new());

    let report = std::fs::read_to_string(fixture.report()).unwrap();
    assert!(!report.contains("stale report"));
    assert!(report.starts_with(PREFIX));
}

#[test]
fn test_missing_record_produces_nothing() {
    let fixture = Fixture::new();
    let sink = CapturingSink::new();

    let outcome = fixture.run(assets_with(script_template()), &sink);

    assert_no_report(&outcome, &fixture.output);
    assert!(matches!(outcome.error(), Some(ReportError::InputMissing { .. })));
    assert!(sink.contains(Severity::Error, "not found or is empty"));
    // Nothing past the loader ran
    assert!(!fixture.output.exists());
}

#[test]
fn test_empty_record_produces_nothing() {
    let fixture = Fixture::with_record("");

    let outcome = fixture.run(assets_with(script_template()), &CapturingSink::new());

    assert_no_report(&outcome, &fixture.output);
    assert_eq!(outcome.state(), PipelineState::Aborted(Stage::Load));
}

#[test]
fn test_invalid_json_produces_nothing() {
    let fixture = Fixture::with_record("invalid json content");
    let sink = CapturingSink::new();

    let outcome = fixture.run(assets_with(script_template()), &sink);

    assert_no_report(&outcome, &fixture.output);
    assert!(matches!(outcome.error(), Some(ReportError::InputInvalid { .. })));
    assert!(sink.contains(Severity::Error, "not valid JSON"));
}

#[test]
fn test_missing_template_produces_nothing() {
    let fixture = Fixture::with_record(SAMPLE_RECORD);

    let outcome = fixture.run(InMemoryAssets::new(), &CapturingSink::new());

    assert_no_report(&outcome, &fixture.output);
    assert!(matches!(outcome.error(), Some(ReportError::TemplateMissing { .. })));
    assert!(fixture.record.exists());
}

#[test]
fn test_template_without_placeholder_produces_nothing() {
    let fixture = Fixture::with_record(SAMPLE_RECORD);
    let sink = CapturingSink::new();

    let outcome = fixture.run(
        assets_with("<html><script>window.CUCUMBER_REPORT_DATA = null;</script></html>"),
        &sink,
    );

    assert_no_report(&outcome, &fixture.output);
    assert_eq!(outcome.state(), PipelineState::Aborted(Stage::Embed));
    assert!(sink.contains(Severity::Error, PLACEHOLDER));
}

#[test]
fn test_nested_output_directories_created() {
    let fixture = Fixture::with_record(SAMPLE_RECORD);
    let nested = fixture.output.join("nested").join("deep").join("output");
    assert!(!fixture.output.exists());

    let outcome = ReportGenerator::new(assets_with(script_template()), CapturingSink::new())
        .generate(&fixture.record, &nested);

    assert!(outcome.is_written());
    assert!(nested.join(REPORT_FILE_NAME).is_file());
}

#[test]
fn test_unwritable_output_location() {
    let fixture = Fixture::with_record(SAMPLE_RECORD);
    std::fs::write(&fixture.output, "a file where the directory should be").unwrap();

    let outcome = fixture.run(assets_with(script_template()), &CapturingSink::new());

    assert!(matches!(outcome.error(), Some(ReportError::OutputUnwritable { .. })));
    assert_eq!(outcome.state(), PipelineState::Aborted(Stage::Write));
}

#[test]
fn test_script_close_in_record_cannot_escape() {
    let fixture = Fixture::with_record(r#"[{"name":"</script><script>alert(1)</script>"}]"#);

    fixture.run(assets_with(script_template()), &CapturingSink::new());

    let report = std::fs::read_to_string(fixture.report()).unwrap();
    assert_eq!(report.matches("</script>").count(), 1);
    let embedded: Value = serde_json::from_str(embedded_segment(&report)).unwrap();
    assert_eq!(embedded[0]["name"], "</script><script>alert(1)</script>");
}

#[test]
fn test_comment_opener_in_record_keeps_later_scripts() {
    // `<!--<script>` inside a script element would swallow the next `</script>`
    let fixture = Fixture::with_record(r#"[{"name":"<!--<script>","description":"a < b"}]"#);
    let template = format!("{PREFIX}{PLACEHOLDER}{SUFFIX}<script>render();</script>\n");

    fixture.run(assets_with(template), &CapturingSink::new());

    let report = std::fs::read_to_string(fixture.report()).unwrap();
    let (segment, tail) = report.strip_prefix(PREFIX).unwrap().split_once(SUFFIX).unwrap();
    assert!(!segment.contains('<'));
    assert_eq!(tail, "<script>render();</script>\n");

    let embedded: Value = serde_json::from_str(segment).unwrap();
    assert_eq!(embedded[0]["name"], "<!--<script>");
    assert_eq!(embedded[0]["description"], "a < b");
}

#[test]
fn test_deeply_nested_record() {
    let depth = 200;
    let record = format!(
        r#"[{{"name":"Deep","embeddings":{}{}}}]"#,
        "[".repeat(depth),
        "]".repeat(depth)
    );
    let fixture = Fixture::with_record(&record);

    let outcome = fixture.run(assets_with(script_template()), &CapturingSink::new());

    assert!(outcome.is_written());
    let report = std::fs::read_to_string(fixture.report()).unwrap();
    assert_eq!(embedded_segment(&report), record);
}

#[test]
fn test_concurrent_runs_on_distinct_paths() {
    let dir = tempfile::tempdir().unwrap();
    let sink = CapturingSink::new();
    let generator = ReportGenerator::new(assets_with(script_template()), &sink);

    let runs: Vec<(PathBuf, PathBuf)> = (0..4)
        .map(|i| {
            let record = dir.path().join(format!("run-{i}.json"));
            std::fs::write(&record, format!(r#"[{{"name":"Feature {i}"}}]"#)).unwrap();
            (record, dir.path().join(format!("out-{i}")))
        })
        .collect();

    std::thread::scope(|scope| {
        for (record, output) in &runs {
            let generator = &generator;
            scope.spawn(move || {
                assert!(generator.generate(record, output).is_written());
            });
        }
    });

    for (i, (_, output)) in runs.iter().enumerate() {
        let report = std::fs::read_to_string(output.join(REPORT_FILE_NAME)).unwrap();
        assert!(report.contains(&format!(r#""name":"Feature {i}""#)));
    }
    assert!(sink.at_least(Severity::Error).is_empty());
}
