use serde::Serialize;

/// Parent row for one word: the grammatical class it belongs to.
/// `id` is populated by the entry insert and never changes afterward.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: Option<i64>,
    pub class: String,
}

/// Child row: one inflected surface string tied to a parent entry.
/// `variant` is the category dimension (degree, number, section);
/// adverbs carry no dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Form {
    pub entry_id: i64,
    pub variant: Option<String>,
    pub form: String,
}

/// Static description of one word category's table pair.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub entry_table: &'static str,
    pub form_table: &'static str,
    pub variant_column: Option<&'static str>,
}

pub const ADJECTIVE: Category = Category {
    name: "adjective",
    entry_table: "adjective_entry",
    form_table: "adjective_form",
    variant_column: Some("degree"),
};

pub const VERB: Category = Category {
    name: "verb",
    entry_table: "verb_entry",
    form_table: "verb_form",
    variant_column: Some("section"),
};

pub const NOUN: Category = Category {
    name: "noun",
    entry_table: "noun_entry",
    form_table: "noun_form",
    variant_column: Some("number"),
};

pub const ADVERB: Category = Category {
    name: "adverb",
    entry_table: "adverb_entry",
    form_table: "adverb_form",
    variant_column: None,
};

/// Load order is fixed so runs produce reproducible logs.
pub const CATEGORY_ORDER: [&Category; 4] = [&ADJECTIVE, &VERB, &NOUN, &ADVERB];

#[derive(Debug, Clone, Serialize, Default)]
pub struct CategoryReport {
    pub category: String,
    pub source_present: bool,
    pub records_parsed: usize,
    pub records_skipped_blank_class: usize,
    pub entries_inserted: usize,
    pub forms_inserted: usize,
    pub entries_missing_id: usize,
    pub duplicate_forms_dropped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadRunReport {
    pub report_version: u32,
    pub status: String,
    pub started_at: String,
    pub finished_at: String,
    pub db_path: String,
    pub categories: Vec<CategoryReport>,
}
