//! Unified error types for neofont

use thiserror::Error;

/// Main error type for neofont operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NeoFontError {
    // === Decoding Errors ===
    #[error("Invalid applet: magic number mismatch")]
    MagicMismatch,

    #[error("Applet size field says {expected} bytes, buffer has {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Loader code at offset {offset:#06x} does not have the expected layout")]
    UnexpectedCodeLayout { offset: usize },

    #[error("Data out of bounds at offset {offset}")]
    OutOfBounds { offset: usize },

    // === Encoding Errors ===
    #[error("Output buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    // === Font Errors ===
    #[error("Glyph index {index} out of range (0..256)")]
    GlyphIndexOutOfRange { index: usize },
}

/// Result type alias for neofont operations
pub type Result<T> = std::result::Result<T, NeoFontError>;
