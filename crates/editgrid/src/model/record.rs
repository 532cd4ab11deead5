//! Records: one row of host-supplied data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::column::ColumnDefinition;
use super::value::CellValue;

/// Default name of the identifier field.
pub const DEFAULT_ID_FIELD: &str = "id";

/// One row of domain data, keyed by field name.
///
/// The grid treats records as opaque: it reads fields by name and never
/// interprets them beyond validation and sorting.
///
/// # Example
///
/// ```
/// use editgrid::model::{CellValue, Record};
///
/// let record = Record::new()
///     .with("id", 7)
///     .with("recordCode", "A1");
///
/// assert_eq!(record.id("id"), Some(&CellValue::Int(7)));
/// assert_eq!(record.get("recordCode").and_then(CellValue::as_str), Some("A1"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, CellValue>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Returns the value of a field.
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields.get(field)
    }

    /// Sets a field, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Option<CellValue> {
        self.fields.insert(field.into(), value.into())
    }

    /// Removes a field.
    pub fn remove(&mut self, field: &str) -> Option<CellValue> {
        self.fields.remove(field)
    }

    /// Returns `true` if the field is present (even when its value is `None`).
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// The identifier value under `id_field`.
    pub fn id(&self, id_field: &str) -> Option<&CellValue> {
        self.get(id_field)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copies every field of `other` over this record.
    pub fn apply(&mut self, other: &Record) {
        for (field, value) in &other.fields {
            self.fields.insert(field.clone(), value.clone());
        }
    }

    /// Converts each field to the representation its column stores (see
    /// [`CellValue::coerce`]).
    pub fn coerce_to(&mut self, columns: &[ColumnDefinition]) {
        for column in columns {
            if let Some(value) = self.fields.get_mut(&column.field) {
                *value = std::mem::take(value).coerce(&column.kind);
            }
        }
    }

    /// A new record holding only the listed fields.
    ///
    /// Fields absent from this record are filled with [`CellValue::None`].
    pub fn project<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> Record {
        fields
            .into_iter()
            .map(|field| (field.to_string(), self.get(field).cloned().unwrap_or_default()))
            .collect()
    }
}

impl FromIterator<(String, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
