//! Validate command handler.

use std::path::{Path, PathBuf};

use anyhow::Context;
use catalog_core::{ProductRecord, Validator};

/// Validate each file and print one pass/fail line per file.
///
/// # Errors
///
/// Returns an error if a file cannot be read or is not a JSON array of
/// product records. Failed validation is reported, not returned.
pub(crate) fn run_validate(files: &[PathBuf]) -> anyhow::Result<()> {
    for path in files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let batch = catalog_core::parse_batch(&text)
            .with_context(|| format!("{} is not a product batch", path.display()))?;
        println!("{}", summarize(path, &batch));
    }
    Ok(())
}

/// One-line verdict for `batch`, naming the first violation on failure.
pub(crate) fn summarize(path: &Path, batch: &[ProductRecord]) -> String {
    match Validator::new(batch).first_violation() {
        None => format!("PASS {} ({} records)", path.display(), batch.len()),
        Some(violation) => {
            tracing::warn!(
                path = %path.display(),
                check = %violation.check,
                record = violation.index,
                field = violation.field,
                "validation error: {}",
                violation.message
            );
            format!("FAIL {}: {violation}", path.display())
        }
    }
}
