//! Cell values.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::column::DataKind;

/// Date format used when dates travel as text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single value stored in a record field.
///
/// Deserialization is untagged: JSON/TOML scalars map onto the matching
/// variant. Strings always load as [`CellValue::String`], even when they look
/// like dates; [`coerce`](Self::coerce) turns them into dates for date
/// columns. Dates serialize as `YYYY-MM-DD` text.
///
/// # Example
///
/// ```
/// use editgrid::model::CellValue;
///
/// let value = CellValue::from("A1");
/// assert_eq!(value.as_str(), Some("A1"));
/// assert!(!value.is_blank());
/// assert!(CellValue::from("  ").is_blank());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// No value.
    #[default]
    None,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Calendar date.
    #[serde(skip_deserializing)]
    Date(NaiveDate),
    /// Text value.
    String(String),
}

impl CellValue {
    /// Returns `true` if this is `CellValue::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, CellValue::None)
    }

    /// Returns `true` for `None` and for text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::None => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Get as a string slice if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get as an integer if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as a float. Integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(n) => Some(*n),
            CellValue::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Get as a bool if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as a date if this is a date value.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Converts text to the representation a column of `kind` stores.
    ///
    /// Only date columns convert: `YYYY-MM-DD` text becomes a date. Anything
    /// else, including unparsable text, is returned unchanged.
    pub fn coerce(self, kind: &DataKind) -> CellValue {
        match (kind, self) {
            (DataKind::Date, CellValue::String(text)) => {
                match NaiveDate::parse_from_str(text.trim(), DATE_FORMAT) {
                    Ok(date) => CellValue::Date(date),
                    Err(_) => CellValue::String(text),
                }
            }
            (_, value) => value,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::None => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Date(_) => 3,
            CellValue::String(_) => 4,
        }
    }

    /// Total ordering used for sorting.
    ///
    /// Values of different kinds order as
    /// `None < Bool < numbers < Date < String`; integers and floats compare
    /// numerically.
    pub fn sort_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::String(a), CellValue::String(b)) => a.cmp(b),
            (a, b) if a.rank() == 2 && b.rank() == 2 => {
                let a = a.as_float().unwrap_or_default();
                let b = b.as_float().unwrap_or_default();
                a.total_cmp(&b)
            }
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::None => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Float(n) => write!(f, "{n}"),
            CellValue::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            CellValue::String(s) => f.write_str(s),
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Int(n as i64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::None, Into::into)
    }
}
