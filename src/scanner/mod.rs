//! Locating and decoding QR symbols in images.
//!
//! The pipeline loads the source into a bitmap, converts to grayscale
//! (2D barcode detection is luminance-based), runs a multi-symbol
//! detector over the frame, and hands every decoded text to the payload
//! codec. It sits underneath an interactive polling loop, so a bad frame
//! produces an empty result list instead of a fault.

use std::path::Path;

use image::DynamicImage;
use tracing::debug;

use crate::codec;
use crate::models::{BoundingBox, ScanResult, SymbolKind};

pub mod stream;

/// A scan input, resolved to one decoding strategy per variant.
#[derive(Debug)]
pub enum ImageSource<'a> {
    /// Path to an image file on disk.
    Path(&'a Path),
    /// Raw encoded image bytes, e.g. an HTTP upload body.
    Bytes(&'a [u8]),
    /// An already-decoded bitmap, e.g. a captured video frame.
    Bitmap(&'a DynamicImage),
}

impl<'a> From<&'a Path> for ImageSource<'a> {
    fn from(path: &'a Path) -> Self {
        Self::Path(path)
    }
}

impl<'a> From<&'a [u8]> for ImageSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a DynamicImage> for ImageSource<'a> {
    fn from(bitmap: &'a DynamicImage) -> Self {
        Self::Bitmap(bitmap)
    }
}

/// Find and decode every QR symbol in an image.
///
/// A source that cannot be decoded into a bitmap yields an empty list,
/// not an error. Symbols whose text does not match the attendance payload
/// format still appear in the results with `payload: None`, so callers
/// can tell "foreign QR code" apart from "nothing found".
pub fn scan_image(source: ImageSource<'_>) -> Vec<ScanResult> {
    let owned;
    let bitmap = match source {
        ImageSource::Bitmap(image) => image,
        ImageSource::Path(path) => match image::open(path) {
            Ok(image) => {
                owned = image;
                &owned
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "unreadable scan source");
                return Vec::new();
            }
        },
        ImageSource::Bytes(bytes) => match image::load_from_memory(bytes) {
            Ok(image) => {
                owned = image;
                &owned
            }
            Err(err) => {
                debug!(error = %err, "unreadable scan source");
                return Vec::new();
            }
        },
    };

    let gray = bitmap.to_luma8();
    let (width, height) = gray.dimensions();
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            gray.get_pixel(x as u32, y as u32).0[0]
        });

    let mut results = Vec::new();
    for grid in prepared.detect_grids() {
        let (_meta, text) = match grid.decode() {
            Ok(decoded) => decoded,
            Err(err) => {
                debug!(error = ?err, "detected grid failed to decode");
                continue;
            }
        };

        let corners = grid.bounds.map(|p| (p.x as i32, p.y as i32));
        let bounds = Some(BoundingBox::from_corners(&corners));

        debug!(text = %text, "QR symbol decoded");
        results.push(ScanResult {
            payload: codec::decode(&text),
            text,
            kind: SymbolKind::QrCode,
            bounds,
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_corrupt_bytes_yields_empty_list() {
        assert!(scan_image(ImageSource::Bytes(&[])).is_empty());
        assert!(scan_image(ImageSource::Bytes(b"definitely not a PNG")).is_empty());
    }

    #[test]
    fn test_scan_missing_file_yields_empty_list() {
        let results = scan_image(ImageSource::Path(Path::new("/no/such/image.png")));
        assert!(results.is_empty());
    }

    #[test]
    fn test_scan_blank_bitmap_yields_empty_list() {
        let blank = DynamicImage::new_luma8(64, 64);
        assert!(scan_image(ImageSource::Bitmap(&blank)).is_empty());
    }
}
