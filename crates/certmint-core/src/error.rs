// SPDX-License-Identifier: MIT
//
// Unified error types for certmint.

use thiserror::Error;

/// Top-level error type for all certmint operations.
#[derive(Debug, Error)]
pub enum CertmintError {
    // -- Request errors --
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("certificate not found: {0}")]
    NotFound(String),

    #[error("unsupported artifact format: {0}")]
    UnsupportedFormat(String),

    // -- Pipeline errors --
    #[error("certificate generation failed: {0}")]
    Generation(String),

    #[error("QR encoding failed: {0}")]
    QrEncoding(String),

    #[error("PDF rendering failed: {0}")]
    PdfRender(String),

    #[error("image rendering failed: {0}")]
    ImageRender(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CertmintError>;
