//! Declarative column definitions.
//!
//! A [`ColumnDef`] describes one table column: its id and header, how a cell
//! value is extracted from a row (the accessor), whether it can be sorted or
//! filtered, and an optional custom cell renderer. Column definitions are
//! owned by the caller and handed to the engine once; the engine never mutates
//! them.
//!
//! # Example
//!
//! ```rust
//! use datagrid::table::{ColumnDef, FilterSpec};
//! use serde_json::{json, Value};
//!
//! let columns: Vec<ColumnDef<Value>> = vec![
//!     ColumnDef::keyed("name", "Name").sortable(),
//!     ColumnDef::keyed("status", "Status")
//!         .filter(FilterSpec::select(["Open", "Closed"])),
//! ];
//!
//! let row = json!({"name": "Alpha", "status": "Open"});
//! assert_eq!(columns[0].value(&row).to_string(), "Alpha");
//! ```

use crate::domain::{CellValue, GridError, Result};
use crate::table::filter::{FilterKind, FilterSpec};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Extracts a cell value from a row.
pub type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Produces the display text of a cell, replacing the stringified value.
pub type CellRenderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Rows that expose named fields, enabling keyed accessors.
///
/// Keys may be dotted paths (`"owner.name"`) for nested records.
pub trait FieldAccess {
    fn field(&self, key: &str) -> CellValue;
}

impl FieldAccess for serde_json::Value {
    fn field(&self, key: &str) -> CellValue {
        if let Some(value) = self.get(key) {
            return CellValue::from_json(value);
        }

        let mut current = self;
        for segment in key.split('.') {
            match current.get(segment) {
                Some(next) => current = next,
                None => return CellValue::Null,
            }
        }
        CellValue::from_json(current)
    }
}

impl FieldAccess for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> CellValue {
        match self.get(key) {
            Some(value) => CellValue::from_json(value),
            None => {
                let (head, rest) = key.split_once('.').unwrap_or((key, ""));
                match self.get(head) {
                    Some(nested) if !rest.is_empty() => nested.field(rest),
                    _ => CellValue::Null,
                }
            }
        }
    }
}

impl FieldAccess for BTreeMap<String, CellValue> {
    fn field(&self, key: &str) -> CellValue {
        self.get(key).cloned().unwrap_or_default()
    }
}

/// Declarative description of a table column.
pub struct ColumnDef<T> {
    /// Stable identifier used by sort state, filter state and visibility.
    pub id: String,
    pub header: String,
    accessor: Accessor<T>,
    pub sortable: bool,
    pub filterable: bool,
    filter: Option<FilterSpec>,
    /// Preferred display width in characters.
    pub width: Option<usize>,
    renderer: Option<CellRenderer<T>>,
    /// Whether the column starts hidden.
    pub hidden: bool,
}

impl<T> ColumnDef<T> {
    /// Creates a column whose value is derived by an arbitrary function.
    pub fn new<F>(id: impl Into<String>, header: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            header: header.into(),
            accessor: Arc::new(accessor),
            sortable: false,
            filterable: false,
            filter: None,
            width: None,
            renderer: None,
            hidden: false,
        }
    }

    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Makes the column filterable with the given filter specification.
    #[must_use]
    pub fn filter(mut self, spec: FilterSpec) -> Self {
        self.filterable = true;
        self.filter = Some(spec);
        self
    }

    /// Makes the column filterable with a plain text filter.
    #[must_use]
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Sets a custom cell renderer.
    #[must_use]
    pub fn renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Extracts this column's value from a row.
    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    /// Display text for a row: the custom renderer's output, or the
    /// stringified accessor value.
    pub fn render(&self, row: &T) -> String {
        self.renderer
            .as_ref()
            .map_or_else(|| self.value(row).to_string(), |render| render(row))
    }

    #[must_use]
    pub const fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// The column's filter kind, if it accepts filters at all.
    #[must_use]
    pub fn filter_kind(&self) -> Option<FilterKind> {
        if !self.filterable {
            return None;
        }
        Some(self.filter.as_ref().map_or(FilterKind::Text, |spec| spec.kind))
    }

    #[must_use]
    pub const fn filter_spec(&self) -> Option<&FilterSpec> {
        self.filter.as_ref()
    }
}

impl<T: FieldAccess + 'static> ColumnDef<T> {
    /// Creates a column reading the field named by its id.
    pub fn keyed(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        let key = id.clone();
        Self::new(id, header, move |row: &T| row.field(&key))
    }

    /// Creates a column reading an explicit (possibly dotted) field key.
    pub fn field(id: impl Into<String>, header: impl Into<String>, key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(id, header, move |row: &T| row.field(&key))
    }
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: Arc::clone(&self.accessor),
            sortable: self.sortable,
            filterable: self.filterable,
            filter: self.filter.clone(),
            width: self.width,
            renderer: self.renderer.clone(),
            hidden: self.hidden,
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("filter", &self.filter)
            .field("width", &self.width)
            .field("has_renderer", &self.renderer.is_some())
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

/// Checks that column ids are non-empty and unique.
///
/// # Errors
///
/// Returns [`GridError::Column`] naming the first offending id.
pub fn validate_columns<T>(columns: &[ColumnDef<T>]) -> Result<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if column.id.trim().is_empty() {
            return Err(GridError::Column("column id must not be empty".to_string()));
        }
        if !seen.insert(column.id.as_str()) {
            return Err(GridError::Column(format!("duplicate column id '{}'", column.id)));
        }
    }
    Ok(())
}

/// Finds a column by id.
pub fn find_column<'a, T>(columns: &'a [ColumnDef<T>], id: &str) -> Option<&'a ColumnDef<T>> {
    columns.iter().find(|column| column.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn keyed_columns_read_nested_fields() {
        let column: ColumnDef<Value> = ColumnDef::field("owner", "Owner", "owner.name");
        let row = json!({"owner": {"name": "Dana"}});
        assert_eq!(column.value(&row), CellValue::Text("Dana".into()));
        assert!(column.value(&json!({})).is_null());
    }

    #[test]
    fn renderer_overrides_display_text() {
        let column: ColumnDef<Value> =
            ColumnDef::keyed("amount", "Amount").renderer(|row: &Value| format!("${}", row["amount"]));
        let row = json!({"amount": 12});
        assert_eq!(column.render(&row), "$12");
        assert_eq!(column.value(&row), CellValue::Number(12.0));
    }

    #[test]
    fn filter_kind_defaults_to_text() {
        let plain: ColumnDef<Value> = ColumnDef::keyed("name", "Name").filterable();
        let none: ColumnDef<Value> = ColumnDef::keyed("id", "Id");
        assert_eq!(plain.filter_kind(), Some(FilterKind::Text));
        assert_eq!(none.filter_kind(), None);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let columns: Vec<ColumnDef<Value>> =
            vec![ColumnDef::keyed("a", "A"), ColumnDef::keyed("a", "Again")];
        assert!(matches!(validate_columns(&columns), Err(GridError::Column(_))));
    }

    #[test]
    fn map_rows_support_keyed_access() {
        let mut row = BTreeMap::new();
        row.insert("name".to_string(), CellValue::from("Beta"));
        let column: ColumnDef<BTreeMap<String, CellValue>> = ColumnDef::keyed("name", "Name");
        assert_eq!(column.render(&row), "Beta");
    }
}
