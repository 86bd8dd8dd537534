use super::CanonicalRecord;

/// Literal marker the report data is substituted for
pub const PLACEHOLDER: &str = "/* CUCUMBER_REPORT_DATA_PLACEHOLDER */";

/// Identifier of the bundled report template
pub const DEFAULT_TEMPLATE: &str = "index.html";

/// A template whose placeholder has been located
#[derive(Debug, Clone)]
pub struct TemplateAsset {
    /// Identifier the asset was loaded under
    pub id: String,
    text: String,
    /// Byte offset of the first placeholder occurrence
    offset: usize,
}

impl TemplateAsset {
    /// Locate the placeholder in `text`. Returns `None` when it is absent.
    pub fn locate(id: impl Into<String>, text: String) -> Option<Self> {
        let offset = text.find(PLACEHOLDER)?;
        Some(Self {
            id: id.into(),
            text,
            offset,
        })
    }

    pub fn placeholder_offset(&self) -> usize {
        self.offset
    }

    /// Total placeholder occurrences in the template
    pub fn placeholder_count(&self) -> usize {
        self.text.matches(PLACEHOLDER).count()
    }

    /// Replace the first placeholder with the record text, leaving every
    /// other byte of the template as it was
    pub fn embed(&self, record: &CanonicalRecord) -> String {
        let (head, rest) = self.text.split_at(self.offset);
        let tail = &rest[PLACEHOLDER.len()..];

        let mut merged = String::with_capacity(head.len() + record.len() + tail.len());
        merged.push_str(head);
        merged.push_str(record.as_str());
        merged.push_str(tail);
        merged
    }
}
