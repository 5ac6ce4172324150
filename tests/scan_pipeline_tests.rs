//! Integration tests for the full issue-and-scan loop.
//!
//! These exercise the payload codec, renderer, and scan pipeline together:
//! a QR rendered by this crate must come back out of the scanner with the
//! same identity fields and a valid payload.

use std::time::Duration;

use image::DynamicImage;
use scanme_qr::render::ImageHandle;
use scanme_qr::{
    FrameSource, ImageSource, StopSignal, StudentRef, codec, generate_batch, render_image,
    render_png, scan_image, scan_stream, to_data_uri,
};

#[test]
fn test_scan_on_corrupt_bytes_returns_empty() {
    assert!(scan_image(ImageSource::Bytes(&[])).is_empty());
    assert!(scan_image(ImageSource::Bytes(b"not an image")).is_empty());
}

#[test]
fn test_rendered_qr_round_trips_through_scanner() {
    let student = StudentRef::new("7", "S-100");
    let png = render_png(&student).expect("render");

    let results = scan_image(ImageSource::Bytes(&png));
    assert_eq!(results.len(), 1, "expected exactly one symbol");

    let result = &results[0];
    let payload = result.payload.as_ref().expect("payload should parse");
    assert_eq!(payload.student_id, "7");
    assert_eq!(payload.student_no, "S-100");
    assert!(result.bounds.is_some());

    // The freshly issued payload passes the expiry policy.
    assert!(codec::validate(&result.text).is_ok());
}

#[test]
fn test_scanner_reports_foreign_qr_without_payload() {
    // A QR code from some other system is reported, but not parsed.
    let img = scanme_qr::render::render_text("https://example.com/menu").expect("render");
    let bitmap = DynamicImage::ImageLuma8(img);

    let results = scan_image(ImageSource::Bitmap(&bitmap));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, "https://example.com/menu");
    assert!(results[0].payload.is_none());
}

#[test]
fn test_batch_generation_scenario() {
    let dir = tempfile::tempdir().expect("tempdir");
    let students = vec![
        StudentRef {
            id: Some("1".to_string()),
            student_no: Some("A1".to_string()),
            first_name: Some("Grace".to_string()),
            last_name: Some("Hopper".to_string()),
        },
        StudentRef::default(),
    ];

    let report = generate_batch(&students, dir.path()).expect("batch");

    assert_eq!(report.total, 2);
    assert_eq!(report.success.len(), 2);
    assert!(dir.path().join("qr_A1.png").exists());
    assert!(dir.path().join("qr_unknown.png").exists());

    // Every written file scans back to a parseable payload.
    let results = scan_image(ImageSource::Path(&dir.path().join("qr_A1.png")));
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].payload.as_ref().expect("payload").student_no,
        "A1"
    );
}

#[test]
fn test_data_uri_embeds_png() {
    let img = render_image(&StudentRef::new("9", "Z-9")).expect("render");
    let uri = to_data_uri(ImageHandle::Image(&img)).expect("data uri");
    assert!(uri.starts_with("data:image/png;base64,"));
    assert!(uri.len() > "data:image/png;base64,".len());
}

/// Replays a fixed list of frames, then reports capture failure.
struct ScriptedFrames {
    frames: Vec<DynamicImage>,
}

impl FrameSource for ScriptedFrames {
    fn next_frame(&mut self) -> Option<DynamicImage> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.frames.remove(0))
        }
    }
}

#[test]
fn test_stream_scan_dedupes_repeated_symbols() {
    let frame_a = DynamicImage::ImageLuma8(
        render_image(&StudentRef::new("1", "A-1")).expect("render"),
    );
    let frame_b = DynamicImage::ImageLuma8(
        render_image(&StudentRef::new("2", "B-2")).expect("render"),
    );

    // The same student stays in front of the camera for two frames.
    let source = ScriptedFrames {
        frames: vec![frame_a.clone(), frame_a, frame_b],
    };
    let results = scan_stream(source, Duration::from_secs(30), &StopSignal::new());

    assert_eq!(results.len(), 2);
    assert_eq!(
        results[0].payload.as_ref().expect("payload").student_no,
        "A-1"
    );
    assert_eq!(
        results[1].payload.as_ref().expect("payload").student_no,
        "B-2"
    );
}

#[test]
fn test_stream_scan_returns_partial_results_on_stop() {
    let frame = DynamicImage::ImageLuma8(
        render_image(&StudentRef::new("1", "A-1")).expect("render"),
    );

    // Stop after the first frame by triggering from inside the source.
    struct StopAfterFirst {
        frame: Option<DynamicImage>,
        stop: StopSignal,
    }
    impl FrameSource for StopAfterFirst {
        fn next_frame(&mut self) -> Option<DynamicImage> {
            let frame = self.frame.take();
            if frame.is_some() {
                self.stop.trigger();
            }
            frame
        }
    }

    let stop = StopSignal::new();
    let source = StopAfterFirst {
        frame: Some(frame),
        stop: stop.clone(),
    };

    let results = scan_stream(source, Duration::from_secs(30), &stop);
    assert_eq!(results.len(), 1);
}
