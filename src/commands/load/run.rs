use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, Transaction};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::cli::LoadArgs;
use crate::commands::load::db_setup::{configure_connection, ensure_schema};
use crate::commands::load::insert::{insert_entries, insert_forms};
use crate::commands::load::materialize::{build_entries, build_forms};
use crate::commands::load::parse::parse_category_file;
use crate::commands::load::records::{DimensionedRecord, FlatRecord, SourceRecord};
use crate::config::{DataFilePaths, LoaderConfig};
use crate::model::{ADJECTIVE, ADVERB, Category, CategoryReport, LoadRunReport, NOUN, VERB};
use crate::normalize::Normalizer;
use crate::util::{now_utc_string, write_json_pretty};

pub fn run(args: LoadArgs) -> Result<()> {
    let started_at = now_utc_string();

    let config = LoaderConfig::load(&args.config_path)?;
    let db_path = args
        .db_path
        .clone()
        .unwrap_or_else(|| config.database_path.clone());

    info!(
        db_path = %db_path.display(),
        adjectives = %config.data_files.adjectives.display(),
        verbs = %config.data_files.verbs.display(),
        nouns = %config.data_files.nouns.display(),
        adverbs = %config.data_files.adverbs.display(),
        "starting load run"
    );

    let normalizer = Normalizer::new()?;

    let mut connection = Connection::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    configure_connection(&connection)?;
    ensure_schema(&connection)?;

    let load_result = run_load(&mut connection, &normalizer, &config.data_files);

    if let Some(report_path) = &args.report_path {
        let status = if load_result.is_ok() {
            "committed"
        } else {
            "rolled_back"
        };
        let report = LoadRunReport {
            report_version: 1,
            status: status.to_string(),
            started_at,
            finished_at: now_utc_string(),
            db_path: db_path.display().to_string(),
            categories: load_result.as_deref().unwrap_or_default().to_vec(),
        };
        match write_json_pretty(report_path, &report) {
            Ok(()) => info!(path = %report_path.display(), "wrote load run report"),
            // A failed run's original error takes precedence over a
            // report-write failure.
            Err(report_err) if load_result.is_err() => {
                warn!(error = %report_err, "failed to write load run report")
            }
            Err(report_err) => return Err(report_err),
        }
    }

    load_result?;
    info!("load run completed successfully");
    Ok(())
}

/// Runs all four categories inside one transaction. Either every
/// category's rows become durable together, or a failure in any
/// category rolls the whole run back and the error propagates.
pub(crate) fn run_load(
    connection: &mut Connection,
    normalizer: &Normalizer,
    files: &DataFilePaths,
) -> Result<Vec<CategoryReport>> {
    let tx = connection
        .transaction()
        .context("failed to begin transaction")?;
    info!("database transaction started");

    match load_all_categories(&tx, normalizer, files) {
        Ok(reports) => {
            tx.commit().context("failed to commit transaction")?;
            info!("database transaction committed");
            Ok(reports)
        }
        Err(err) => {
            warn!("load failed, rolling back transaction");
            match tx.rollback() {
                Ok(()) => info!("database transaction rolled back"),
                Err(rollback_err) => {
                    warn!(error = %rollback_err, "transaction rollback failed")
                }
            }
            Err(err)
        }
    }
}

fn load_all_categories(
    tx: &Transaction<'_>,
    normalizer: &Normalizer,
    files: &DataFilePaths,
) -> Result<Vec<CategoryReport>> {
    // Fixed order so logs stay reproducible across runs.
    Ok(vec![
        load_category::<DimensionedRecord>(tx, normalizer, &ADJECTIVE, &files.adjectives)?,
        load_category::<DimensionedRecord>(tx, normalizer, &VERB, &files.verbs)?,
        load_category::<DimensionedRecord>(tx, normalizer, &NOUN, &files.nouns)?,
        load_category::<FlatRecord>(tx, normalizer, &ADVERB, &files.adverbs)?,
    ])
}

fn load_category<T: SourceRecord + DeserializeOwned>(
    tx: &Transaction<'_>,
    normalizer: &Normalizer,
    category: &Category,
    path: &Path,
) -> Result<CategoryReport> {
    let mut report = CategoryReport {
        category: category.name.to_string(),
        ..CategoryReport::default()
    };

    info!(category = category.name, path = %path.display(), "category started");

    let Some(records) = parse_category_file::<T>(path)? else {
        warn!(
            category = category.name,
            path = %path.display(),
            "source file missing, loading zero records"
        );
        return Ok(report);
    };
    report.source_present = true;
    report.records_parsed = records.len();
    info!(
        category = category.name,
        records = records.len(),
        "parsed source records"
    );

    let mut entry_build = build_entries(normalizer, &records);
    report.records_skipped_blank_class = entry_build.skipped_blank_class;
    if entry_build.skipped_blank_class > 0 {
        info!(
            category = category.name,
            skipped = entry_build.skipped_blank_class,
            "skipped records with blank class"
        );
    }

    report.entries_inserted = insert_entries(tx, category, &mut entry_build.entries)?;
    info!(
        category = category.name,
        entries = report.entries_inserted,
        "inserted entries"
    );

    let form_build = build_forms(
        normalizer,
        category,
        &entry_build.entries,
        &entry_build.record_indices,
        &records,
    );
    report.entries_missing_id = form_build.entries_missing_id;
    report.duplicate_forms_dropped = form_build.duplicates_dropped;
    if form_build.duplicates_dropped > 0 {
        info!(
            category = category.name,
            duplicates = form_build.duplicates_dropped,
            "dropped duplicate forms"
        );
    }

    report.forms_inserted = insert_forms(tx, category, &form_build.forms)?;
    info!(
        category = category.name,
        forms = report.forms_inserted,
        "inserted forms"
    );

    Ok(report)
}
