//! QR symbol rendering and image export.
//!
//! Symbols use error-correction level M with an auto-fit version and are
//! rasterized black-on-white at a fixed module size with a four-module
//! quiet zone. Every QR previously issued by the system was produced with
//! these parameters, so they are kept fixed.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};

use crate::codec;
use crate::error::RenderError;
use crate::models::StudentRef;

mod batch;

pub use batch::generate_batch;

/// Pixels per QR module.
const MODULE_SIZE: u32 = 10;

/// Quiet-zone width, in modules.
const QUIET_ZONE: u32 = 4;

/// Render a student's QR code as an in-memory grayscale image.
pub fn render_image(student: &StudentRef) -> Result<GrayImage, RenderError> {
    render_text(&codec::encode(student))
}

/// Rasterize payload text into a QR image.
pub fn render_text(data: &str) -> Result<GrayImage, RenderError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)?;
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let size = (modules + 2 * QUIET_ZONE) * MODULE_SIZE;

    let mut img = GrayImage::from_pixel(size, size, Luma([255u8]));
    for (i, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let mx = i as u32 % modules;
        let my = i as u32 / modules;
        let px = (QUIET_ZONE + mx) * MODULE_SIZE;
        let py = (QUIET_ZONE + my) * MODULE_SIZE;
        for dy in 0..MODULE_SIZE {
            for dx in 0..MODULE_SIZE {
                img.put_pixel(px + dx, py + dy, Luma([0u8]));
            }
        }
    }

    Ok(img)
}

/// Render a student's QR code as PNG bytes.
pub fn render_png(student: &StudentRef) -> Result<Vec<u8>, RenderError> {
    encode_png(&render_image(student)?)
}

/// Encode a grayscale image as PNG bytes.
pub fn encode_png(img: &GrayImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Render a student's QR code to `path` as a PNG, creating parent
/// directories as needed. Returns the path written.
pub fn render_to_file(student: &StudentRef, path: &Path) -> Result<PathBuf, RenderError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let img = render_image(student)?;
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(path.to_path_buf())
}

/// Input accepted by [`to_data_uri`]: a PNG already on disk, or an
/// in-memory image that still needs encoding.
#[derive(Debug)]
pub enum ImageHandle<'a> {
    /// Path to a PNG file.
    Path(&'a Path),
    /// In-memory grayscale image.
    Image(&'a GrayImage),
}

impl<'a> From<&'a Path> for ImageHandle<'a> {
    fn from(path: &'a Path) -> Self {
        Self::Path(path)
    }
}

impl<'a> From<&'a GrayImage> for ImageHandle<'a> {
    fn from(img: &'a GrayImage) -> Self {
        Self::Image(img)
    }
}

/// Base64-encode a QR image as a `data:image/png;base64,...` URI for
/// direct embedding in HTML.
pub fn to_data_uri(handle: ImageHandle<'_>) -> Result<String, RenderError> {
    let bytes = match handle {
        ImageHandle::Path(path) => fs::read(path)?,
        ImageHandle::Image(img) => encode_png(img)?,
    };
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&bytes)))
}
