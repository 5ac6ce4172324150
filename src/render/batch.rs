use std::fs;
use std::path::Path;

use rayon::prelude::*;
use tracing::warn;

use crate::error::RenderError;
use crate::models::{BatchFailure, BatchReport, BatchSuccess, StudentRef};

/// Render one QR PNG per student into `output_dir`.
///
/// The directory is created up front and failing to create it is the only
/// error that aborts the batch. Per-student renders are independent and
/// run in parallel; a single student's failure is recorded in the report
/// without stopping the rest. Filenames are `qr_{student_no}.png`, falling
/// back to the id and then `unknown`.
pub fn generate_batch(
    students: &[StudentRef],
    output_dir: &Path,
) -> Result<BatchReport, RenderError> {
    fs::create_dir_all(output_dir)?;

    let outcomes: Vec<Result<BatchSuccess, BatchFailure>> = students
        .par_iter()
        .map(|student| {
            let filepath = output_dir.join(format!("qr_{}.png", student.file_key()));
            match super::render_to_file(student, &filepath) {
                Ok(path) => Ok(BatchSuccess {
                    student_no: student.student_no.clone(),
                    name: student.display_name(),
                    filepath: path,
                }),
                Err(err) => {
                    warn!(student_no = ?student.student_no, error = %err, "QR generation failed");
                    Err(BatchFailure {
                        student_no: student.student_no.clone(),
                        error: err.to_string(),
                    })
                }
            }
        })
        .collect();

    let mut report = BatchReport {
        total: students.len(),
        ..BatchReport::default()
    };
    for outcome in outcomes {
        match outcome {
            Ok(entry) => report.success.push(entry),
            Err(entry) => report.failed.push(entry),
        }
    }

    Ok(report)
}
