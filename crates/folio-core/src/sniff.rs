//! File format sniffing by extension.

use serde::{Deserialize, Serialize};

/// Supported document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// PDF document.
    Pdf,
    /// Raster image (treated as a single scanned page).
    Image,
    /// Office Open XML word-processing document.
    Docx,
    /// Unrecognized extension; estimated through the PDF path as a
    /// best-effort fallback.
    Unknown,
}

impl FileKind {
    /// Wire/display name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Image => "image",
            FileKind::Docx => "docx",
            FileKind::Unknown => "unknown",
        }
    }

    /// Whether this kind is estimated by the PDF code path.
    ///
    /// Unknown files are deliberately routed through PDF estimation:
    /// the byte-level estimators soft-fail on non-PDF content, so the
    /// permissive default still yields a usable quote.
    pub fn uses_pdf_path(self) -> bool {
        matches!(self, FileKind::Pdf | FileKind::Unknown)
    }
}

/// Extensions classified as raster images.
const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "webp", "tiff", "tif"];

/// Classify a file name by its trailing extension (case-insensitive).
pub fn classify(file_name: &str) -> FileKind {
    let ext = match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return FileKind::Unknown,
    };

    if ext == "pdf" {
        FileKind::Pdf
    } else if ext == "docx" {
        FileKind::Docx
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        FileKind::Image
    } else {
        FileKind::Unknown
    }
}
