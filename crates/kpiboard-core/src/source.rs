//! # Document Sources
//!
//! Scoped, size-limited reads of dashboard input files.
//!
//! Each read opens, reads and closes the file in one call. There is no
//! retry: a failed read is reported to the caller as a terminal error.

use crate::KpiboardError;
use crate::primitives::MAX_DOCUMENT_SIZE;
use std::path::Path;

/// Read a UTF-8 document from disk.
///
/// Returns `MissingFile` when the path does not exist or is not a regular
/// file, and `IoError` when the file is too large or unreadable.
pub fn read_document(path: &Path) -> Result<String, KpiboardError> {
    if !path.is_file() {
        return Err(KpiboardError::MissingFile(path.to_path_buf()));
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| KpiboardError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > MAX_DOCUMENT_SIZE {
        return Err(KpiboardError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_DOCUMENT_SIZE
        )));
    }

    std::fs::read_to_string(path).map_err(|e| {
        KpiboardError::IoError(format!("Cannot read '{}': {}", path.display(), e))
    })
}
