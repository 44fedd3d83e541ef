use std::collections::HashSet;

use tracing::warn;

use crate::commands::load::records::SourceRecord;
use crate::model::{Category, Entry, Form};
use crate::normalize::Normalizer;

pub(crate) struct EntryBuild {
    pub entries: Vec<Entry>,
    /// Index into the source record slice for each entry, in order.
    /// Entry ids are assigned only after the bulk insert, so forms are
    /// attached to the right record by position, not by lookup.
    pub record_indices: Vec<usize>,
    pub skipped_blank_class: usize,
}

pub(crate) struct FormBuild {
    pub forms: Vec<Form>,
    pub entries_missing_id: usize,
    pub duplicates_dropped: usize,
}

/// Builds one entry per record with a usable class name, preserving
/// input order. Records whose class normalizes to empty produce
/// nothing, not even a warning: blank classes are routine in the
/// source data.
pub(crate) fn build_entries<T: SourceRecord>(
    normalizer: &Normalizer,
    records: &[T],
) -> EntryBuild {
    let mut entries = Vec::new();
    let mut record_indices = Vec::new();
    let mut skipped_blank_class = 0;

    for (index, record) in records.iter().enumerate() {
        let class = normalizer.clean(record.class_name());
        if class.is_empty() {
            skipped_blank_class += 1;
            continue;
        }
        entries.push(Entry { id: None, class });
        record_indices.push(index);
    }

    EntryBuild {
        entries,
        record_indices,
        skipped_blank_class,
    }
}

/// Builds form rows for every entry that received an id. An entry the
/// insert phase left without an id loses all its forms with a warning;
/// the run continues. Dimension keys and form values that normalize to
/// empty are dropped, and duplicates of the composite key
/// `(entry_id, variant, form)` are dropped so the primary key cannot
/// be violated by dirty source data.
pub(crate) fn build_forms<T: SourceRecord>(
    normalizer: &Normalizer,
    category: &Category,
    entries: &[Entry],
    record_indices: &[usize],
    records: &[T],
) -> FormBuild {
    let mut forms = Vec::new();
    let mut seen: HashSet<Form> = HashSet::new();
    let mut entries_missing_id = 0;
    let mut duplicates_dropped = 0;

    for (entry, &record_index) in entries.iter().zip(record_indices) {
        let Some(entry_id) = entry.id else {
            warn!(
                category = category.name,
                class = %entry.class,
                "entry did not receive an id after insert, skipping its forms"
            );
            entries_missing_id += 1;
            continue;
        };

        let record = &records[record_index];
        for group in record.form_groups() {
            let variant = match group.variant {
                Some(raw) => {
                    let cleaned = normalizer.clean(Some(raw));
                    if cleaned.is_empty() {
                        continue;
                    }
                    Some(cleaned)
                }
                None => None,
            };

            for value in group.values {
                let form_text = normalizer.clean(Some(value));
                if form_text.is_empty() {
                    continue;
                }
                let form = Form {
                    entry_id,
                    variant: variant.clone(),
                    form: form_text,
                };
                if seen.insert(form.clone()) {
                    forms.push(form);
                } else {
                    duplicates_dropped += 1;
                }
            }
        }
    }

    FormBuild {
        forms,
        entries_missing_id,
        duplicates_dropped,
    }
}
