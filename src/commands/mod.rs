pub mod keep;
pub mod merge;
pub mod rotate;

use crate::error::InputError;
use std::path::Path;

/// Reject paths without a `.pdf` suffix (any letter case).
pub fn ensure_pdf<P: AsRef<Path>>(path: P) -> Result<(), InputError> {
    let path = path.as_ref();
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        Ok(())
    } else {
        Err(InputError::NotPdf(path.to_path_buf()))
    }
}

/// File name for progress messages, falling back to the full path.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
