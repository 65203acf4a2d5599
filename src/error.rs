use std::path::PathBuf;

/// Command-line input rejected before any document is opened.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("At least 2 PDF files are required for merging (got {0})")]
    TooFewInputs(usize),

    #[error("{} is not a PDF file", .0.display())]
    NotPdf(PathBuf),

    #[error("Angle must be 90, 180, or 270 degrees (got {0})")]
    InvalidAngle(i64),
}
