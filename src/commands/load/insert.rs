use anyhow::{Context, Result};
use rusqlite::{Transaction, params};
use tracing::debug;

use crate::model::{Category, Entry, Form};

/// Rows per statement batch. Batching only affects throughput and log
/// granularity; callers see one logical insert.
pub(crate) const BATCH_SIZE: usize = 5000;

/// Inserts entry rows inside the run transaction and back-fills each
/// entry's generated id in caller order, which is what lets the
/// materializer correlate forms with their source records by position.
pub(crate) fn insert_entries(
    tx: &Transaction<'_>,
    category: &Category,
    entries: &mut [Entry],
) -> Result<usize> {
    if entries.is_empty() {
        return Ok(0);
    }

    let sql = format!("INSERT INTO {}(class) VALUES(?1)", category.entry_table);
    let mut statement = tx
        .prepare(&sql)
        .with_context(|| format!("failed to prepare entry insert for {}", category.entry_table))?;

    let total = entries.len();
    let mut inserted = 0;
    for chunk in entries.chunks_mut(BATCH_SIZE) {
        for entry in chunk.iter_mut() {
            statement.execute(params![entry.class]).with_context(|| {
                format!(
                    "failed to insert entry '{}' into {}",
                    entry.class, category.entry_table
                )
            })?;
            entry.id = Some(tx.last_insert_rowid());
        }
        inserted += chunk.len();
        debug!(
            category = category.name,
            inserted, total, "entry insert batch complete"
        );
    }

    Ok(inserted)
}

/// Inserts form rows in batches. Storage failures (including composite
/// primary key violations) propagate unretried.
pub(crate) fn insert_forms(
    tx: &Transaction<'_>,
    category: &Category,
    forms: &[Form],
) -> Result<usize> {
    if forms.is_empty() {
        return Ok(0);
    }

    let sql = match category.variant_column {
        Some(column) => format!(
            "INSERT INTO {}(entry_id, {column}, form) VALUES(?1, ?2, ?3)",
            category.form_table
        ),
        None => format!(
            "INSERT INTO {}(entry_id, form) VALUES(?1, ?2)",
            category.form_table
        ),
    };
    let mut statement = tx
        .prepare(&sql)
        .with_context(|| format!("failed to prepare form insert for {}", category.form_table))?;

    let mut inserted = 0;
    for chunk in forms.chunks(BATCH_SIZE) {
        for form in chunk {
            let result = match category.variant_column {
                Some(_) => statement.execute(params![form.entry_id, form.variant, form.form]),
                None => statement.execute(params![form.entry_id, form.form]),
            };
            result.with_context(|| {
                format!(
                    "failed to insert form '{}' for entry {} into {}",
                    form.form, form.entry_id, category.form_table
                )
            })?;
        }
        inserted += chunk.len();
        debug!(
            category = category.name,
            inserted,
            total = forms.len(),
            "form insert batch complete"
        );
    }

    Ok(inserted)
}
