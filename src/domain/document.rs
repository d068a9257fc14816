use std::fmt;

use super::DocumentId;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub content_type: ContentType,
    pub size_bytes: u64,
}

/// Concrete format of a supplied input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Text,
    Png,
    Jpeg,
    Pdf,
    Xlsx,
    Csv,
}

/// The four input choices offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Text,
    Image,
    Pdf,
    Spreadsheet,
}

impl ContentType {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "pdf" => Some(Self::Pdf),
            "xlsx" => Some(Self::Xlsx),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Resolves an upload by its file extension. Direct text entry never goes
    /// through here, so `.txt` is not accepted.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        Self::from_extension(extension)
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Pdf => "application/pdf",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv",
        }
    }

    pub fn input_kind(&self) -> InputKind {
        match self {
            Self::Text => InputKind::Text,
            Self::Png | Self::Jpeg => InputKind::Image,
            Self::Pdf => InputKind::Pdf,
            Self::Xlsx | Self::Csv => InputKind::Spreadsheet,
        }
    }
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "Text",
            InputKind::Image => "Image",
            InputKind::Pdf => "PDF",
            InputKind::Spreadsheet => "Excel/CSV",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Document {
    pub fn new(filename: String, content_type: ContentType, size_bytes: u64) -> Self {
        Self {
            id: DocumentId::new(),
            filename,
            content_type,
            size_bytes,
        }
    }

    pub fn typed_text(size_bytes: u64) -> Self {
        Self::new("typed-text".to_string(), ContentType::Text, size_bytes)
    }
}
