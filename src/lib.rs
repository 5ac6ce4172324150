//! ScanMe QR - issuance and scanning core for the school-attendance system
//!
//! Two stateless halves over plain data: the payload [`codec`] builds and
//! parses the pipe-delimited text embedded in issued QR codes, and the
//! [`scanner`] locates symbols in images and runs every decoded text back
//! through the codec. [`render`] turns student records into PNG symbols
//! (single or in bulk) and [`utils::enhance`] offers an optional pre-pass
//! for hard captures. Persistence and HTTP belong to the callers.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// The pipe-delimited payload text protocol and its expiry policy.
pub mod codec;
/// Error types shared across the crate.
pub mod error;
/// Core data structures (student snapshots, payloads, scan results, batch reports).
pub mod models;
/// QR symbol rendering, data URIs, and batch generation.
pub mod render;
/// Image and live-stream scanning.
pub mod scanner;
/// Image preprocessing utilities.
pub mod utils;

pub use error::{RenderError, ValidationError};
pub use models::{
    BatchFailure, BatchReport, BatchSuccess, BoundingBox, Payload, PayloadSummary, ScanResult,
    StudentRef, SymbolKind,
};
pub use render::{
    ImageHandle, generate_batch, render_image, render_png, render_to_file, to_data_uri,
};
pub use scanner::stream::{FrameSource, StopSignal, scan_stream};
pub use scanner::{ImageSource, scan_image};
pub use utils::enhance::enhance_for_scanning;
