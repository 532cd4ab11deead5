//! Sort specification for the record collection.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::record::Record;
use super::value::CellValue;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9).
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    /// Descending order (Z-A, 9-0).
    #[serde(alias = "desc")]
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Sort on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDescriptor {
    /// Field to sort by.
    pub field: String,
    /// Sort direction.
    #[serde(default, alias = "dir")]
    pub direction: SortOrder,
}

impl SortDescriptor {
    /// Creates an ascending sort on `field`.
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortOrder::Ascending,
        }
    }

    /// Creates a descending sort on `field`.
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortOrder::Descending,
        }
    }
}

/// Compares two records by a sort specification.
///
/// The first descriptor is most significant. Missing fields compare as
/// [`CellValue::None`].
pub fn compare_records(a: &Record, b: &Record, sort: &[SortDescriptor]) -> Ordering {
    static MISSING: CellValue = CellValue::None;

    sort.iter()
        .map(|descriptor| {
            let left = a.get(&descriptor.field).unwrap_or(&MISSING);
            let right = b.get(&descriptor.field).unwrap_or(&MISSING);
            let ordering = left.sort_cmp(right);
            match descriptor.direction {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        })
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Sorts records in place. Stable: records with equal keys keep their order.
pub fn sort_records(records: &mut [Record], sort: &[SortDescriptor]) {
    if sort.is_empty() {
        return;
    }
    records.sort_by(|a, b| compare_records(a, b, sort));
}
