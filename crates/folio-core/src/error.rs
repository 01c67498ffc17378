//! Error types for the folio-core library.
//!
//! The public estimator entry points never surface these to callers: a
//! price estimate, even a poor one, is more useful to the business flow
//! than a hard failure, so parse errors are caught at the estimator
//! boundary and converted into fallback results. The types below exist
//! for the internal parsing layers and for configuration loading.

use thiserror::Error;

/// Main error type for the folio library.
#[derive(Error, Debug)]
pub enum FolioError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// DOCX processing error.
    #[error("DOCX error: {0}")]
    Docx(#[from] DocxError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF document.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to decode a page content stream.
    #[error("failed to decode page content: {0}")]
    Content(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to DOCX processing.
#[derive(Error, Debug)]
pub enum DocxError {
    /// Failed to read the Office Open XML container.
    #[error("failed to read DOCX container: {0}")]
    Container(String),
}

/// Result type for the folio library.
pub type Result<T> = std::result::Result<T, FolioError>;
