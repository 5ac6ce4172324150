//! Live-scan loop over a stream of captured frames.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use image::DynamicImage;
use tracing::info;

use crate::models::ScanResult;

use super::{ImageSource, scan_image};

/// Supplier of consecutive frames from a live capture device.
///
/// The device handle lives inside the implementation and is released by
/// `Drop`. [`scan_stream`] takes the source by value, so release happens
/// on every exit path, including early termination.
pub trait FrameSource {
    /// Capture the next frame. `None` signals capture failure and ends
    /// the scan session.
    fn next_frame(&mut self) -> Option<DynamicImage>;
}

/// Cloneable flag for interactive early exit from [`scan_stream`].
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// Create a signal in the not-triggered state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the scan loop stop at the next frame boundary.
    pub fn trigger(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether a stop has been requested.
    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Poll frames from `source` for up to `max_duration`, collecting each
/// distinct QR symbol seen during the session.
///
/// Symbols are deduplicated by raw decoded text: a code already captured
/// in this session is not re-added when it stays in front of the camera
/// across frames. The loop ends at the deadline, on capture failure, or
/// when `stop` fires; whatever was collected so far is returned. The
/// frame source is consumed, so its capture device is released before
/// this function returns.
pub fn scan_stream<S: FrameSource>(
    mut source: S,
    max_duration: Duration,
    stop: &StopSignal,
) -> Vec<ScanResult> {
    let deadline = Instant::now() + max_duration;
    let mut seen = HashSet::new();
    let mut captured = Vec::new();

    while Instant::now() < deadline && !stop.is_triggered() {
        let Some(frame) = source.next_frame() else {
            break;
        };

        for result in scan_image(ImageSource::Bitmap(&frame)) {
            if seen.insert(result.text.clone()) {
                info!(text = %result.text, "QR code detected");
                captured.push(result);
            }
        }
    }

    captured
}
