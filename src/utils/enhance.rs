//! Preprocessing filters for noisy or low-contrast captures.
//!
//! The chain targets what helps 2D barcode detection most: histogram
//! equalization to spread contrast, a light blur to suppress the noise
//! equalization amplifies, then locally adaptive binarization. It is an
//! optional pre-pass; the scan pipeline never applies it on its own.

use image::{DynamicImage, GrayImage};

/// Window size of the adaptive threshold, in pixels.
const THRESHOLD_BLOCK: usize = 11;

/// Constant subtracted from the local weighted mean before comparing.
const THRESHOLD_OFFSET: f32 = 2.0;

/// Enhance a bitmap for QR detection.
///
/// Grayscale conversion (when not already), histogram equalization, 3x3
/// Gaussian blur, then Gaussian-weighted adaptive thresholding to a 0/255
/// binary image. Pure and stateless.
pub fn enhance_for_scanning(image: &DynamicImage) -> DynamicImage {
    let gray = image.to_luma8();
    let (width, height) = (gray.width() as usize, gray.height() as usize);

    let equalized = equalize_histogram(gray.as_raw());
    let blurred = gaussian_blur_3x3(&equalized, width, height);
    let binary = adaptive_threshold(&blurred, width, height, THRESHOLD_BLOCK, THRESHOLD_OFFSET);

    match GrayImage::from_raw(gray.width(), gray.height(), binary) {
        Some(enhanced) => DynamicImage::ImageLuma8(enhanced),
        None => image.clone(),
    }
}

/// Spread grayscale values across the full 0-255 range using the
/// cumulative histogram. A single-intensity image is returned unchanged.
pub fn equalize_histogram(gray: &[u8]) -> Vec<u8> {
    let mut histogram = [0u32; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let mut cdf = [0u32; 256];
    let mut running = 0u32;
    for (i, &count) in histogram.iter().enumerate() {
        running += count;
        cdf[i] = running;
    }

    // The darkest occupied bin anchors the remap at 0.
    let cdf_min = cdf.iter().copied().find(|&c| c > 0).unwrap_or(0);
    let total = gray.len() as u32;
    if total == 0 || total == cdf_min {
        return gray.to_vec();
    }

    let scale = 255.0 / (total - cdf_min) as f32;
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let value = cdf[i].saturating_sub(cdf_min) as f32 * scale;
        *entry = value.round().min(255.0) as u8;
    }

    gray.iter().map(|&p| lut[p as usize]).collect()
}

/// 3x3 Gaussian blur (kernel `[1 2 1]` in both axes, divisor 16) with
/// replicated borders.
pub fn gaussian_blur_3x3(gray: &[u8], width: usize, height: usize) -> Vec<u8> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let clamp = |v: isize, max: usize| v.clamp(0, max as isize - 1) as usize;

    // Horizontal pass.
    let mut horizontal = vec![0u16; gray.len()];
    for y in 0..height {
        for x in 0..width {
            let left = gray[y * width + clamp(x as isize - 1, width)] as u16;
            let mid = gray[y * width + x] as u16;
            let right = gray[y * width + clamp(x as isize + 1, width)] as u16;
            horizontal[y * width + x] = left + 2 * mid + right;
        }
    }

    // Vertical pass.
    let mut blurred = vec![0u8; gray.len()];
    for y in 0..height {
        for x in 0..width {
            let up = horizontal[clamp(y as isize - 1, height) * width + x];
            let mid = horizontal[y * width + x];
            let down = horizontal[clamp(y as isize + 1, height) * width + x];
            blurred[y * width + x] = ((up + 2 * mid + down + 8) / 16) as u8;
        }
    }

    blurred
}

/// Binarize using a Gaussian-weighted local mean: a pixel becomes white
/// (255) when it is brighter than its neighborhood mean minus `offset`,
/// black (0) otherwise. Borders are replicated.
pub fn adaptive_threshold(
    gray: &[u8],
    width: usize,
    height: usize,
    block: usize,
    offset: f32,
) -> Vec<u8> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let kernel = gaussian_kernel(block);
    let radius = (block / 2) as isize;
    let clamp = |v: isize, max: usize| v.clamp(0, max as isize - 1) as usize;

    // Separable weighted mean, horizontal then vertical.
    let mut horizontal = vec![0f32; gray.len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0f32;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = clamp(x as isize + k as isize - radius, width);
                acc += gray[y * width + sx] as f32 * weight;
            }
            horizontal[y * width + x] = acc;
        }
    }

    let mut out = vec![0u8; gray.len()];
    for y in 0..height {
        for x in 0..width {
            let mut mean = 0f32;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = clamp(y as isize + k as isize - radius, height);
                mean += horizontal[sy * width + x] * weight;
            }
            let idx = y * width + x;
            out[idx] = if gray[idx] as f32 > mean - offset { 255 } else { 0 };
        }
    }

    out
}

/// Normalized 1D Gaussian weights for a window of `size` taps, with the
/// usual sigma-for-window-size heuristic.
fn gaussian_kernel(size: usize) -> Vec<f32> {
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let radius = size as isize / 2;
    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
        .collect();

    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}
