use std::fmt;

use serde::Deserialize;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};

/// Uniform view of a parsed source record, shared by the materializer
/// across all four categories.
pub(crate) trait SourceRecord {
    fn class_name(&self) -> Option<&str>;
    fn form_groups(&self) -> Vec<FormGroup<'_>>;
}

/// One group of form values under a single dimension key; flat
/// categories use a single group with no variant.
pub(crate) struct FormGroup<'a> {
    pub variant: Option<&'a str>,
    pub values: &'a [String],
}

/// Source shape for adjectives, nouns, and verbs: a class name plus a
/// map of dimension key to form values. Field names are matched
/// case-insensitively and map order is preserved as written, which is
/// why `Deserialize` is hand-written instead of derived.
#[derive(Debug, Clone, Default)]
pub(crate) struct DimensionedRecord {
    pub class: Option<String>,
    pub forms: Option<Vec<(String, Vec<String>)>>,
}

/// Source shape for adverbs: a class name plus a flat list of forms.
#[derive(Debug, Clone, Default)]
pub(crate) struct FlatRecord {
    pub class: Option<String>,
    pub forms: Option<Vec<String>>,
}

impl SourceRecord for DimensionedRecord {
    fn class_name(&self) -> Option<&str> {
        self.class.as_deref()
    }

    fn form_groups(&self) -> Vec<FormGroup<'_>> {
        self.forms
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|(variant, values)| FormGroup {
                variant: Some(variant),
                values,
            })
            .collect()
    }
}

impl SourceRecord for FlatRecord {
    fn class_name(&self) -> Option<&str> {
        self.class.as_deref()
    }

    fn form_groups(&self) -> Vec<FormGroup<'_>> {
        match self.forms.as_deref() {
            Some(values) => vec![FormGroup {
                variant: None,
                values,
            }],
            None => Vec::new(),
        }
    }
}

/// Insertion-ordered forms map. serde_json's default map type would
/// shuffle dimension keys, which would make form insertion order
/// nondeterministic across runs.
struct OrderedFormsMap(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for OrderedFormsMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FormsMapVisitor;

        impl<'de> Visitor<'de> for FormsMapVisitor {
            type Value = OrderedFormsMap;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of dimension key to a list of form strings")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((key, values)) = map.next_entry::<String, Vec<String>>()? {
                    entries.push((key, values));
                }
                Ok(OrderedFormsMap(entries))
            }
        }

        deserializer.deserialize_map(FormsMapVisitor)
    }
}

impl<'de> Deserialize<'de> for DimensionedRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = DimensionedRecord;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("an object with 'class' and 'forms' fields, or null")
            }

            // Source arrays may contain null records; they carry no
            // class and are skipped downstream.
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(DimensionedRecord::default())
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut record = DimensionedRecord::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("class") {
                        record.class = map.next_value::<Option<String>>()?;
                    } else if key.eq_ignore_ascii_case("forms") {
                        record.forms = map
                            .next_value::<Option<OrderedFormsMap>>()?
                            .map(|forms| forms.0);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(record)
            }
        }

        deserializer.deserialize_any(RecordVisitor)
    }
}

impl<'de> Deserialize<'de> for FlatRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = FlatRecord;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("an object with 'class' and a list-valued 'forms' field, or null")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlatRecord::default())
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut record = FlatRecord::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("class") {
                        record.class = map.next_value::<Option<String>>()?;
                    } else if key.eq_ignore_ascii_case("forms") {
                        record.forms = map.next_value::<Option<Vec<String>>>()?;
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(record)
            }
        }

        deserializer.deserialize_any(RecordVisitor)
    }
}
