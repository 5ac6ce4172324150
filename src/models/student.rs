use serde::Serialize;

/// Snapshot of a student record used to issue a QR code.
///
/// Upstream records can be partial, so every field is optional. Absence is
/// distinct from emptiness: an absent identifier triggers the filename
/// fallback chain in batch generation, an empty one is embedded as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudentRef {
    /// Primary key of the student row.
    pub id: Option<String>,
    /// Human-facing student number (e.g. "S-100").
    pub student_no: Option<String>,
    /// Given name, when known.
    pub first_name: Option<String>,
    /// Family name, when known.
    pub last_name: Option<String>,
}

impl StudentRef {
    /// Build a reference carrying only the identifiers embedded in the payload.
    pub fn new(id: impl Into<String>, student_no: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            student_no: Some(student_no.into()),
            ..Self::default()
        }
    }

    /// Key used for batch output filenames: the student number, falling
    /// back to the id, then to the literal `unknown`.
    pub fn file_key(&self) -> &str {
        self.student_no
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("unknown")
    }

    /// Concatenated "first last" display name; missing parts render empty.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
    }
}
