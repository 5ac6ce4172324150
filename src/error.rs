//! Error types for the ScanMe QR core.

use thiserror::Error;

/// Why scanned QR text was rejected by the payload validator.
///
/// The `Display` text is surfaced to end users verbatim by the web layer,
/// so the wording here is part of the external contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Text does not match the four-field marker-prefixed format.
    #[error("Invalid QR code format")]
    InvalidFormat,

    /// Well-formed payload whose issuance time is outside the policy window.
    #[error("QR code has expired")]
    Expired,
}

/// Errors raised while rendering QR images or writing them out.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The payload could not be encoded into a QR symbol.
    #[error("failed to encode QR symbol: {0}")]
    Encode(#[from] qrcode::types::QrError),

    /// The rendered symbol could not be encoded or saved as an image.
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem failure while reading or writing image files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
