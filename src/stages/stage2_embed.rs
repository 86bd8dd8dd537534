use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::ReportError;
use crate::io::AssetProvider;
use crate::models::{CanonicalRecord, Stage, TemplateAsset};

/// Stage 2: merge the canonical record into the report template.
///
/// The first placeholder occurrence is replaced literally. A template with
/// no placeholder is a packaging defect and always fails the run.
pub fn embed_record(
    record: &CanonicalRecord,
    template_id: &str,
    assets: &dyn AssetProvider,
    sink: &dyn DiagnosticSink,
) -> Result<String, ReportError> {
    let text = assets
        .load(template_id)
        .ok_or_else(|| ReportError::TemplateMissing {
            template: template_id.to_string(),
        })?;

    let template =
        TemplateAsset::locate(template_id, text).ok_or_else(|| ReportError::TemplateMalformed {
            template: template_id.to_string(),
        })?;

    let occurrences = template.placeholder_count();
    if occurrences > 1 {
        sink.emit(
            Diagnostic::warn(format!(
                "Template {:?} contains {} placeholders; only the first is replaced",
                template_id, occurrences
            ))
            .at(Stage::Embed),
        );
    }

    let merged = template.embed(record);
    sink.emit(
        Diagnostic::debug(format!(
            "Embedded {} bytes of record data at offset {} of {:?}",
            record.len(),
            template.placeholder_offset(),
            template_id
        ))
        .at(Stage::Embed),
    );

    Ok(merged)
}
