use anyhow::{Context, Result};
use rusqlite::Connection;

pub(crate) fn configure_connection(connection: &Connection) -> Result<()> {
    connection
        .pragma_update(None, "journal_mode", "WAL")
        .context("failed to set journal_mode=WAL")?;
    connection
        .pragma_update(None, "synchronous", "NORMAL")
        .context("failed to set synchronous=NORMAL")?;
    connection
        .pragma_update(None, "foreign_keys", "ON")
        .context("failed to set foreign_keys=ON")?;
    Ok(())
}

/// Creates the four parallel entry/form table pairs. Deleting an entry
/// cascades to its forms; the composite primary key on each form table
/// rejects duplicate submissions.
pub(crate) fn ensure_schema(connection: &Connection) -> Result<()> {
    connection
        .execute_batch(
            "
            CREATE TABLE IF NOT EXISTS adjective_entry (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              class TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS adjective_form (
              entry_id INTEGER NOT NULL REFERENCES adjective_entry(id) ON DELETE CASCADE,
              degree TEXT NOT NULL,
              form TEXT NOT NULL,
              PRIMARY KEY (entry_id, degree, form)
            );

            CREATE TABLE IF NOT EXISTS verb_entry (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              class TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS verb_form (
              entry_id INTEGER NOT NULL REFERENCES verb_entry(id) ON DELETE CASCADE,
              section TEXT NOT NULL,
              form TEXT NOT NULL,
              PRIMARY KEY (entry_id, section, form)
            );

            CREATE TABLE IF NOT EXISTS noun_entry (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              class TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS noun_form (
              entry_id INTEGER NOT NULL REFERENCES noun_entry(id) ON DELETE CASCADE,
              number TEXT NOT NULL,
              form TEXT NOT NULL,
              PRIMARY KEY (entry_id, number, form)
            );

            CREATE TABLE IF NOT EXISTS adverb_entry (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              class TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS adverb_form (
              entry_id INTEGER NOT NULL REFERENCES adverb_entry(id) ON DELETE CASCADE,
              form TEXT NOT NULL,
              PRIMARY KEY (entry_id, form)
            );
            ",
        )
        .context("failed to create loader schema")?;

    Ok(())
}
