use std::path::PathBuf;

use serde::Serialize;

/// Per-student success entry in a batch generation report.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSuccess {
    /// Student number of the rendered record, when present.
    pub student_no: Option<String>,
    /// Concatenated "first last" display name.
    pub name: String,
    /// Where the PNG was written.
    pub filepath: PathBuf,
}

/// Per-student failure entry in a batch generation report.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    /// Student number of the failed record, when present.
    pub student_no: Option<String>,
    /// What went wrong, as shown to the operator.
    pub error: String,
}

/// Aggregate result of a bulk QR generation run.
///
/// One entry per input student lands in exactly one of the two lists;
/// `total` is the size of the input, not `success + failed` recomputed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Students whose QR was rendered and written.
    pub success: Vec<BatchSuccess>,
    /// Students whose render or write failed.
    pub failed: Vec<BatchFailure>,
    /// Number of students in the input batch.
    pub total: usize,
}
