use chrono::{DateTime, Utc};
use serde::Serialize;

/// The decoded four-field structure extracted from QR text.
///
/// Constructed once at issuance, immutable inside the symbol, parsed back
/// out at scan time. Never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    /// Constant marker identifying the payload as ours.
    pub prefix: String,
    /// Primary key of the student row at issuance time.
    pub student_id: String,
    /// Human-facing student number at issuance time.
    pub student_no: String,
    /// Issuance time, whole seconds since the Unix epoch (UTC).
    pub timestamp: i64,
}

/// Human-facing summary of a payload, produced by [`crate::codec::describe`].
///
/// `is_valid` is computed from whole days and deliberately does not call
/// the second-granularity expiry check in [`crate::codec::validate`];
/// existing consumers read both fields and they must stay independent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadSummary {
    /// Primary key of the student row at issuance time.
    pub student_id: String,
    /// Human-facing student number at issuance time.
    pub student_no: String,
    /// Issuance time reconstructed from the timestamp.
    pub created_at: DateTime<Utc>,
    /// Age in whole days (floored, so a future timestamp goes negative).
    pub age_days: i64,
    /// Age in fractional hours.
    pub age_hours: f64,
    /// Whether the payload is under 30 days old.
    pub is_recent: bool,
    /// Whether the payload is under 365 days old.
    pub is_valid: bool,
}
