//! JSON output for a site's product batch.

use std::path::{Path, PathBuf};

use catalog_core::ProductRecord;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::ScraperError;

/// Serialises `batch` as a 4-space indented JSON array. Non-ASCII text is
/// written as-is.
///
/// # Errors
///
/// Returns [`ScraperError::Serialize`] if a record cannot be serialised.
pub fn render_batch(batch: &[ProductRecord]) -> Result<Vec<u8>, ScraperError> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    batch.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Writes `batch` to `dir/file_name`, creating `dir` if needed. Returns the
/// written path.
///
/// # Errors
///
/// Returns [`ScraperError::Output`] on any filesystem failure and
/// [`ScraperError::Serialize`] if rendering fails.
pub async fn write_batch(
    dir: &Path,
    file_name: &str,
    batch: &[ProductRecord],
) -> Result<PathBuf, ScraperError> {
    let body = render_batch(batch)?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ScraperError::Output {
            path: dir.display().to_string(),
            source,
        })?;

    let path = dir.join(file_name);
    tokio::fs::write(&path, body)
        .await
        .map_err(|source| ScraperError::Output {
            path: path.display().to_string(),
            source,
        })?;

    tracing::info!(path = %path.display(), records = batch.len(), "wrote product batch");
    Ok(path)
}
