use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Reads one category's source file. A missing file is not an error:
/// the caller treats it as zero records for that category. An empty or
/// whitespace-only file yields an empty record list. Malformed JSON is
/// fatal and carries the file path plus serde_json's line/column in
/// its context chain.
pub(crate) fn parse_category_file<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read source file {}", path.display()))?;

    if raw.trim().is_empty() {
        return Ok(Some(Vec::new()));
    }

    let records: Vec<T> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to decode source file {}", path.display()))?;

    Ok(Some(records))
}
