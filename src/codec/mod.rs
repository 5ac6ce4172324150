//! The pipe-delimited QR payload protocol.
//!
//! Wire format: `SCANME|{student_id}|{student_no}|{unix_timestamp}` — four
//! pipe-separated fields, literal marker `SCANME`, timestamp as base-10
//! integer seconds since the Unix epoch (UTC). Previously issued QR codes
//! carry exactly this text, so the format is frozen.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::models::{Payload, PayloadSummary, StudentRef};

/// Constant marker identifying QR codes issued by this system.
pub const MARKER: &str = "SCANME";

/// Field separator of the payload text format.
const DELIMITER: char = '|';

/// Payloads older than this many days are rejected by [`validate`].
pub const MAX_AGE_DAYS: i64 = 365;

/// Threshold for [`PayloadSummary::is_recent`], in days.
const RECENT_AGE_DAYS: i64 = 30;

const SECS_PER_DAY: i64 = 86_400;
const SECS_PER_HOUR: f64 = 3_600.0;

/// Build the payload text for a student.
///
/// Missing identifier fields render as empty strings and the content of
/// `id`/`student_no` is embedded as-is; the issuance timestamp is the
/// current UTC time truncated to whole seconds.
pub fn encode(student: &StudentRef) -> String {
    let id = student.id.as_deref().unwrap_or("");
    let student_no = student.student_no.as_deref().unwrap_or("");
    let timestamp = Utc::now().timestamp();
    format!("{MARKER}{DELIMITER}{id}{DELIMITER}{student_no}{DELIMITER}{timestamp}")
}

/// Parse payload text.
///
/// Returns `Some` only when the text carries the exact marker, splits into
/// exactly four fields, and the fourth field parses as an integer. Every
/// other shape yields `None` rather than an error: unrelated QR codes are
/// a normal scanner input, not a fault.
pub fn decode(text: &str) -> Option<Payload> {
    let parts: Vec<&str> = text.split(DELIMITER).collect();
    if parts.len() != 4 || parts[0] != MARKER {
        return None;
    }
    let timestamp = parts[3].parse::<i64>().ok()?;

    Some(Payload {
        prefix: parts[0].to_string(),
        student_id: parts[1].to_string(),
        student_no: parts[2].to_string(),
        timestamp,
    })
}

/// Check payload text against the format and the expiry policy.
pub fn validate(text: &str) -> Result<Payload, ValidationError> {
    validate_at(text, Utc::now())
}

/// [`validate`] against an explicit clock.
///
/// Expired means strictly more than [`MAX_AGE_DAYS`] days old, measured in
/// seconds. A timestamp in the future yields a negative age and passes;
/// there is no lower bound on age.
pub fn validate_at(text: &str, now: DateTime<Utc>) -> Result<Payload, ValidationError> {
    let payload = decode(text).ok_or(ValidationError::InvalidFormat)?;

    let age_secs = now.timestamp() - payload.timestamp;
    if age_secs > MAX_AGE_DAYS * SECS_PER_DAY {
        return Err(ValidationError::Expired);
    }

    Ok(payload)
}

/// Summarize payload text for display.
pub fn describe(text: &str) -> Result<PayloadSummary, ValidationError> {
    describe_at(text, Utc::now())
}

/// [`describe`] against an explicit clock.
///
/// Ages are derived from whole seconds; `age_days` floors toward negative
/// infinity, so a payload 90 seconds in the future reports `-1` days. The
/// `is_valid` flag compares whole days against [`MAX_AGE_DAYS`] and is
/// independent of the second-granularity check in [`validate`].
pub fn describe_at(text: &str, now: DateTime<Utc>) -> Result<PayloadSummary, ValidationError> {
    let payload = decode(text).ok_or(ValidationError::InvalidFormat)?;
    let created_at = DateTime::<Utc>::from_timestamp(payload.timestamp, 0)
        .ok_or(ValidationError::InvalidFormat)?;

    let age_secs = now.timestamp() - payload.timestamp;
    let age_days = age_secs.div_euclid(SECS_PER_DAY);

    Ok(PayloadSummary {
        student_id: payload.student_id,
        student_no: payload.student_no,
        created_at,
        age_days,
        age_hours: age_secs as f64 / SECS_PER_HOUR,
        is_recent: age_days < RECENT_AGE_DAYS,
        is_valid: age_days < MAX_AGE_DAYS,
    })
}
