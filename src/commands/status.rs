use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::CATEGORY_ORDER;

pub fn run(args: StatusArgs) -> Result<()> {
    if !args.db_path.exists() {
        warn!(path = %args.db_path.display(), "database file missing");
        return Ok(());
    }

    let connection = Connection::open(&args.db_path)
        .with_context(|| format!("failed to open database {}", args.db_path.display()))?;

    info!(path = %args.db_path.display(), "database status");

    for category in CATEGORY_ORDER {
        let entries = query_count(&connection, category.entry_table).unwrap_or(0);
        let forms = query_count(&connection, category.form_table).unwrap_or(0);
        info!(category = category.name, entries, forms, "table counts");
    }

    Ok(())
}

fn query_count(connection: &Connection, table: &str) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    let count = connection.query_row(&sql, [], |row| row.get(0))?;
    Ok(count)
}
