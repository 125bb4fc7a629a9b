//! Annotation log persistence
//!
//! Writes a session's annotation log to disk as a pretty-printed JSON array
//! of `{text, start, end, label}` records and reads it back. Each save
//! overwrites the destination wholesale; there is no append mode and no
//! versioning. Failures are returned to the caller with context. The
//! in-memory log is never touched from here, so a failed save can simply be
//! retried.

use std::path::Path;

use anyhow::{Context, Result};

use crate::session::Annotation;

/// Serialize `annotations` to `path`, overwriting any existing file.
pub async fn write_annotations(path: &Path, annotations: &[Annotation]) -> Result<()> {
    let json =
        serde_json::to_string_pretty(annotations).context("serializing annotation log")?;

    tokio::fs::write(path, json.as_bytes())
        .await
        .with_context(|| format!("writing annotations to '{}'", path.display()))?;

    Ok(())
}

/// Read an annotation log previously written by [`write_annotations`].
pub async fn read_annotations(path: &Path) -> Result<Vec<Annotation>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading annotations from '{}'", path.display()))?;

    let annotations = serde_json::from_str(&raw).context("parsing annotation log")?;
    Ok(annotations)
}
