use crate::constants::{HOURS_MILES_COLUMN, IMAGE_COLUMN, TITLE_COLUMN, YEAR_MAKE_MODEL_COLUMN};
use std::collections::BTreeMap;

/// One column of an equipment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    YearMakeModel,
    HoursMiles,
    Image,
}

impl Field {
    pub fn header(self) -> &'static str {
        match self {
            Field::Title => TITLE_COLUMN,
            Field::YearMakeModel => YEAR_MAKE_MODEL_COLUMN,
            Field::HoursMiles => HOURS_MILES_COLUMN,
            Field::Image => IMAGE_COLUMN,
        }
    }
}

/// How image references leave the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageMode {
    /// `Image` column holds an `=IMAGE("<url>")` cell formula.
    #[default]
    Formula,
    /// `Image` column is dropped and URLs are collected for the archive.
    Collect,
}

/// The flat output unit for one scraped listing.
///
/// Every field of the producing schema is present; values may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentRecord {
    values: BTreeMap<Field, String>,
}

impl EquipmentRecord {
    /// A record holding an empty string for every field in `schema`.
    pub fn empty(schema: &[Field]) -> Self {
        Self {
            values: schema.iter().map(|f| (*f, String::new())).collect(),
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Value of `field`, or `""` when the field is not in this record's schema.
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    /// Cell values in `schema` order.
    pub fn row(&self, schema: &[Field]) -> Vec<&str> {
        schema.iter().map(|f| self.get(*f)).collect()
    }
}

/// An image URL collected in [`ImageMode::Collect`], tagged with its 1-based input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedImage {
    pub row: usize,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct ItemFailure {
    pub row: usize,
    pub url: String,
    pub error: String,
}

/// Everything one batch run produces.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub schema: Vec<Field>,
    /// One record per input URL, in input order.
    pub records: Vec<EquipmentRecord>,
    /// Only populated in [`ImageMode::Collect`]; compacted, not row-aligned.
    pub images: Vec<CollectedImage>,
    pub failures: Vec<ItemFailure>,
}
