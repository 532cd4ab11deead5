//! Form validation for rows in edit mode.
//!
//! Validation is a pure function of an [`EditSchema`] and a working copy:
//! [`validate`] holds no state, so it can be called on every keystroke and
//! from any thread.
//!
//! # Checks
//!
//! - **Required**: a required field whose value is blank (missing, `None`, or
//!   whitespace-only text) fails with [`REQUIRED_MESSAGE`].
//! - **Type**: a non-blank value must fit the column's [`DataKind`]. Text that
//!   parses as the column kind is accepted, since editors may hand back raw
//!   input.
//!
//! Blank optional fields always pass. There is no cross-field validation.
//!
//! # Example
//!
//! ```
//! use editgrid::model::{DataKind, Record};
//! use editgrid::validation::{validate, EditSchema, FieldRule};
//!
//! let schema = EditSchema::new(vec![FieldRule::required("code", DataKind::String)]);
//!
//! let result = validate(&schema, &Record::new().with("code", ""));
//! assert!(!result.is_valid());
//!
//! let result = validate(&schema, &Record::new().with("code", "A1"));
//! assert!(result.is_valid());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{CellValue, ColumnDefinition, DATE_FORMAT, DataKind, Record};

/// Message attached to a required field that has no value.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Validation constraints for one editable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    /// Field name.
    pub field: String,
    /// Whether a value must be present.
    pub required: bool,
    /// Expected kind of value.
    pub kind: DataKind,
}

impl FieldRule {
    /// A rule for a field that must have a value.
    pub fn required(field: impl Into<String>, kind: DataKind) -> Self {
        Self {
            field: field.into(),
            required: true,
            kind,
        }
    }

    /// A rule for a field that may be left blank.
    pub fn optional(field: impl Into<String>, kind: DataKind) -> Self {
        Self {
            field: field.into(),
            required: false,
            kind,
        }
    }

    fn check(&self, value: &CellValue) -> FieldValidation {
        if value.is_blank() {
            return if self.required {
                FieldValidation::fail(ValidationKind::Required, REQUIRED_MESSAGE)
            } else {
                FieldValidation::pass()
            };
        }

        match check_kind(&self.kind, value) {
            Ok(()) => FieldValidation::pass(),
            Err(message) => FieldValidation::fail(ValidationKind::Type, message),
        }
    }
}

/// The ordered set of editable fields and their rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSchema {
    rules: Vec<FieldRule>,
}

impl EditSchema {
    /// Creates a schema from explicit rules.
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Derives the schema from column definitions: one rule per editable column.
    pub fn from_columns(columns: &[ColumnDefinition]) -> Self {
        let rules = columns
            .iter()
            .filter(|column| column.editable)
            .map(|column| FieldRule {
                field: column.field.clone(),
                required: column.required,
                kind: column.kind.clone(),
            })
            .collect();
        Self { rules }
    }

    /// The rule for `field`, if it is editable.
    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.field == field)
    }

    /// Editable field names in column order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.field.as_str())
    }

    /// All rules.
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Number of editable fields.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no field is editable.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Which check a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationKind {
    /// A required value was missing.
    Required,
    /// The value does not fit the column's data kind.
    Type,
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationKind::Required => write!(f, "required"),
            ValidationKind::Type => write!(f, "type"),
        }
    }
}

/// Outcome for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidation {
    /// Whether the field passed.
    pub valid: bool,
    /// The failed check, when `valid` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ValidationKind>,
    /// Human-readable message, when `valid` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldValidation {
    /// A passing outcome.
    pub fn pass() -> Self {
        Self {
            valid: true,
            kind: None,
            message: None,
        }
    }

    /// A failing outcome.
    pub fn fail(kind: ValidationKind, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            kind: Some(kind),
            message: Some(message.into()),
        }
    }
}

/// Per-field outcomes for one row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    fields: BTreeMap<String, FieldValidation>,
}

impl ValidationResult {
    /// The outcome for `field`.
    pub fn get(&self, field: &str) -> Option<&FieldValidation> {
        self.fields.get(field)
    }

    /// Returns `true` when every field passed.
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|outcome| outcome.valid)
    }

    /// Failing fields with their outcomes.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &FieldValidation)> {
        self.fields
            .iter()
            .filter(|(_, outcome)| !outcome.valid)
            .map(|(field, outcome)| (field.as_str(), outcome))
    }

    /// Number of failing fields.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Iterates every outcome in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValidation)> {
        self.fields.iter().map(|(field, outcome)| (field.as_str(), outcome))
    }

    /// Number of validated fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if nothing was validated.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Validates a working copy against a schema.
///
/// Every field in the schema gets an outcome; fields absent from `values`
/// are treated as blank. Fields in `values` that the schema does not name
/// are ignored.
pub fn validate(schema: &EditSchema, values: &Record) -> ValidationResult {
    const BLANK: CellValue = CellValue::None;

    let fields = schema
        .rules
        .iter()
        .map(|rule| {
            let outcome = match values.get(&rule.field) {
                Some(value) => rule.check(value),
                None => rule.check(&BLANK),
            };
            (rule.field.clone(), outcome)
        })
        .collect();

    ValidationResult { fields }
}

fn check_kind(kind: &DataKind, value: &CellValue) -> Result<(), String> {
    let text = value.as_str().map(str::trim);
    match kind {
        DataKind::Boolean
            if value.as_bool().is_none() && !matches!(text, Some("true" | "false")) =>
        {
            Err("Must be true or false".to_string())
        }
        DataKind::Integer
            if value.as_int().is_none() && !text.is_some_and(|t| t.parse::<i64>().is_ok()) =>
        {
            Err("Must be a whole number".to_string())
        }
        DataKind::Decimal
            if value.as_float().is_none() && !text.is_some_and(|t| t.parse::<f64>().is_ok()) =>
        {
            Err("Must be a number".to_string())
        }
        DataKind::Date
            if value.as_date().is_none()
                && !text.is_some_and(|t| NaiveDate::parse_from_str(t, DATE_FORMAT).is_ok()) =>
        {
            Err(format!("Must be a date ({DATE_FORMAT})"))
        }
        _ => Ok(()),
    }
}

static_assertions::assert_impl_all!(EditSchema: Send, Sync);
static_assertions::assert_impl_all!(ValidationResult: Send, Sync);
