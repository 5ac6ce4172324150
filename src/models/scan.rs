use serde::Serialize;

use super::Payload;

/// Symbol type tag of a detected barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SymbolKind {
    /// A QR code symbol, the only kind the detector reports. Serialized
    /// as the historical wire tag `QRCODE`.
    #[serde(rename = "QRCODE")]
    QrCode,
}

/// Axis-aligned bounding box of a detected symbol, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl BoundingBox {
    /// Enclosing box of four corner points.
    pub fn from_corners(corners: &[(i32, i32); 4]) -> Self {
        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;
        for &(x, y) in corners {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }
}

/// One decoded QR symbol found in an image.
///
/// Serialized field names match the wire keys the web layer has always
/// consumed: `data`, `type`, `bbox`, `decoded_data`.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Raw decoded text of the symbol.
    #[serde(rename = "data")]
    pub text: String,
    /// Symbol type tag.
    #[serde(rename = "type")]
    pub kind: SymbolKind,
    /// Bounding box, when the detector reported exactly four corners.
    #[serde(rename = "bbox")]
    pub bounds: Option<BoundingBox>,
    /// The attendance payload parse of `text`; `None` for foreign QR codes.
    #[serde(rename = "decoded_data")]
    pub payload: Option<Payload>,
}
