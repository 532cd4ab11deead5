//! Grid configuration.
//!
//! A [`GridConfig`] bundles what the grid needs at construction: the ordered
//! column list, the initial records and the sort specification. It can be
//! built in code or loaded from TOML or JSON.
//!
//! ```toml
//! id_field = "recordId"
//! focus_delay_ms = 500
//!
//! [[columns]]
//! field = "recordId"
//! header = "Id"
//! kind = "integer"
//! editable = false
//!
//! [[columns]]
//! field = "recordCode"
//! header = "Code"
//! required = true
//!
//! [[sort]]
//! field = "recordCode"
//! direction = "descending"
//!
//! [[records]]
//! recordId = 1
//! recordCode = "A1"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::edit::DEFAULT_FOCUS_DELAY;
use crate::error::{GridError, Result};
use crate::model::{ColumnDefinition, DEFAULT_ID_FIELD, Record, SortDescriptor};

fn default_id_field() -> String {
    DEFAULT_ID_FIELD.to_string()
}

fn default_focus_delay_ms() -> u64 {
    DEFAULT_FOCUS_DELAY.as_millis() as u64
}

/// Construction-time configuration for an [`EditableGrid`](crate::EditableGrid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Ordered column definitions.
    pub columns: Vec<ColumnDefinition>,
    /// Initial record collection.
    #[serde(default)]
    pub records: Vec<Record>,
    /// Sort specification; empty means insertion order.
    #[serde(default)]
    pub sort: Vec<SortDescriptor>,
    /// Name of the identifier field in each record.
    #[serde(default = "default_id_field")]
    pub id_field: String,
    /// Delay before focusing a clicked cell's editor, in milliseconds.
    #[serde(default = "default_focus_delay_ms")]
    pub focus_delay_ms: u64,
}

impl GridConfig {
    /// Creates a configuration with the given columns and defaults elsewhere.
    pub fn new(columns: Vec<ColumnDefinition>) -> Self {
        Self {
            columns,
            records: Vec::new(),
            sort: Vec::new(),
            id_field: default_id_field(),
            focus_delay_ms: default_focus_delay_ms(),
        }
    }

    /// Sets the initial records using builder pattern.
    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    /// Sets the sort specification using builder pattern.
    pub fn with_sort(mut self, sort: Vec<SortDescriptor>) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the identifier field using builder pattern.
    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    /// Sets the focus delay using builder pattern.
    pub fn with_focus_delay(mut self, delay: Duration) -> Self {
        self.focus_delay_ms = delay.as_millis() as u64;
        self
    }

    /// The focus delay as a duration.
    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }

    /// Parses a TOML configuration.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON configuration.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file, choosing the format by extension
    /// (`.json` is JSON, anything else TOML).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| GridError::io(path, e))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_toml_str(&source),
        }
    }

    /// Checks structural consistency: non-empty, unique column fields and a
    /// sort specification naming sortable columns.
    pub fn validate(&self) -> Result<()> {
        for (index, column) in self.columns.iter().enumerate() {
            if column.field.is_empty() {
                return Err(GridError::config(format!("column {index} has an empty field name")));
            }
            if self.columns[..index].iter().any(|c| c.field == column.field) {
                return Err(GridError::config(format!(
                    "duplicate column field '{}'",
                    column.field
                )));
            }
        }

        for descriptor in &self.sort {
            let sortable = self
                .columns
                .iter()
                .any(|c| c.field == descriptor.field && c.sortable);
            if !sortable {
                return Err(GridError::NotSortable {
                    field: descriptor.field.clone(),
                });
            }
        }
        Ok(())
    }
}
