pub mod batch;
pub mod payload;
pub mod scan;
pub mod student;

pub use batch::{BatchFailure, BatchReport, BatchSuccess};
pub use payload::{Payload, PayloadSummary};
pub use scan::{BoundingBox, ScanResult, SymbolKind};
pub use student::StudentRef;
