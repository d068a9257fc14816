/// Plain-text rendition of one supplied input. Replaced wholesale when the
/// user supplies a new input, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedDocument(String);

impl ExtractedDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
