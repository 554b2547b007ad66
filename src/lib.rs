//! Datagrid: a headless data-table engine.
//!
//! Datagrid turns a list of column definitions plus rows (or a remote data
//! source) into an interactive table model:
//! - Typed column filters (text, select, multi-select, date, date range,
//!   number, number range) and a global search
//! - Tri-state column sorting with page or cursor pagination
//! - Identity-based row selection with row and bulk actions
//! - Client mode (everything in memory) and server mode (debounced fetches
//!   through a [`DataSource`](table::DataSource))
//! - An immutable view model and an ANSI renderer for terminals

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Table Layer (table/)                               │  ← State machine
//! │  - Event handling                                   │
//! │  - Filter / sort / pagination / selection           │
//! │  - View model computation                           │
//! │  - Controller (fetch + callbacks)                   │
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Source Layer  │
//! │ (ui/)         │   │ (source/)     │
//! │ - Rendering   │   │ - In-memory   │
//! │ - Theming     │   │ - JSON file   │
//! │ - Components  │   │ - Query exec  │
//! └───────────────┘   └───────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory paths (infrastructure/)           │
//! │  - Error types (domain/error)                       │
//! │  - Cell values (domain/value)                       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing subscriber                               │
//! │  - Rotating log file                                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`table`]: Table state machine with event/action model
//! - [`domain`]: Core domain types (cell values, errors)
//! - [`source`]: Bundled data sources for server mode
//! - [`ui`]: Terminal rendering with theme support
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: File-based tracing
//!
//! # Configuration
//!
//! Configuration is read from a TOML file:
//!
//! ```toml
//! title = "Tickets"
//! pagination = "page"
//! page_size = 25
//! page_size_options = [25, 50, 100]
//! search_mode = "fuzzy"
//! theme_name = "catppuccin-latte"
//! trace_level = "debug"
//!
//! [[columns]]
//! id = "status"
//! header = "Status"
//! sortable = true
//! filter = "select"
//! options = ["Open", "Closed"]
//! ```
//!
//! # Examples
//!
//! ```rust
//! use datagrid::table::{handle_event, ColumnDef, DataMode, Event, FilterSpec, FilterValue, TableOptions, TableState};
//! use serde_json::{json, Value};
//!
//! let columns: Vec<ColumnDef<Value>> = vec![
//!     ColumnDef::keyed("name", "Name").sortable(),
//!     ColumnDef::keyed("status", "Status").filter(FilterSpec::select(["Open", "Closed"])),
//! ];
//! let rows = vec![
//!     json!({"name": "Alpha", "status": "Open"}),
//!     json!({"name": "Beta", "status": "Closed"}),
//! ];
//!
//! let mut state = TableState::new(columns, DataMode::Client(rows), TableOptions::default())?;
//! handle_event(
//!     &mut state,
//!     Event::FilterChanged { column: "status".to_string(), value: FilterValue::text("Closed") },
//! )?;
//!
//! let names: Vec<_> = state.page_row_ids().iter().map(|id| state.row(*id).unwrap()["name"].clone()).collect();
//! assert_eq!(names, vec![json!("Beta")]);
//! # Ok::<(), datagrid::GridError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Sequence-Guarded Fetches
//!
//! Every server fetch carries a sequence number. Responses older than the
//! newest issued request are dropped, so a slow page can never overwrite a
//! newer one.
//!
//! ## Keep Last Good Rows
//!
//! A rejected fetch leaves the previous rows on screen and surfaces the
//! message in a status line. Only a first-load failure replaces the body.
//!
//! ## Immutable View Models
//!
//! Rendering reads a computed [`TableViewModel`](ui::TableViewModel); the
//! renderer never touches table state.

pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod source;
pub mod table;
pub mod ui;

pub use domain::{CellValue, GridError, Result};
pub use table::{handle_event, Action, ColumnDef, Event, TableController, TableOptions, TableState};
pub use ui::Theme;

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use table::{FilterKind, FilterSpec, PaginationMode, SearchMode};

/// Engine configuration.
///
/// Every field has a default, so a configuration file only needs the keys it
/// changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Table title shown in the header. Default: `"Rows"`
    pub title: String,

    /// Page or cursor pagination. Default: page
    pub pagination: PaginationMode,

    /// Rows per page. Default: 10
    pub page_size: usize,

    /// Page sizes offered in the footer. Default: `[10, 25, 50, 100]`
    pub page_size_options: Vec<usize>,

    /// Quiet period before a server-mode filter change is fetched.
    /// Default: 300
    pub debounce_ms: u64,

    /// Global search matching. Default: substring
    pub search_mode: SearchMode,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level for the log file.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Directory for the log file. Defaults to the platform data directory.
    pub log_dir: Option<String>,

    /// Column definitions for JSON rows. When empty, columns are inferred
    /// from the row keys.
    pub columns: Vec<ColumnConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Rows".to_string(),
            pagination: PaginationMode::Page,
            page_size: 10,
            page_size_options: vec![10, 25, 50, 100],
            debounce_ms: 300,
            search_mode: SearchMode::Substring,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            log_dir: None,
            columns: vec![],
        }
    }
}

/// One configured column over JSON rows.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub id: String,

    /// Header label. Defaults to the id.
    pub header: Option<String>,

    /// Field key (dotted paths allowed). Defaults to the id.
    pub field: Option<String>,

    pub sortable: bool,

    /// Filter kind, if the column is filterable.
    pub filter: Option<FilterKind>,

    /// Choices for select and multi-select filters.
    pub options: Vec<String>,

    pub width: Option<usize>,
    pub hidden: bool,
}

impl ColumnConfig {
    /// Builds the column definition.
    #[must_use]
    pub fn to_column_def(&self) -> ColumnDef<Value> {
        let header = self.header.clone().unwrap_or_else(|| self.id.clone());
        let key = self.field.clone().unwrap_or_else(|| self.id.clone());
        let mut column = ColumnDef::field(self.id.clone(), header, key);

        if self.sortable {
            column = column.sortable();
        }
        if let Some(kind) = self.filter {
            column = column.filter(FilterSpec {
                options: self.options.clone(),
                ..FilterSpec::new(kind)
            });
        }
        if let Some(width) = self.width {
            column = column.width(width);
        }
        if self.hidden {
            column = column.hidden();
        }
        column
    }
}

impl Config {
    /// Parses configuration from a string key/value map.
    ///
    /// Unknown keys are ignored and unparsable values fall back to their
    /// defaults. Columns cannot be configured this way.
    ///
    /// # Parsing Rules
    ///
    /// - `title`: String
    /// - `pagination`: `page` or `cursor`
    /// - `page_size`: String → `usize` (must be positive)
    /// - `page_size_options`: Comma-separated sizes (filters invalid values)
    /// - `debounce_ms`: String → `u64`
    /// - `search_mode`: `substring` or `fuzzy`
    /// - `theme`, `theme_file`, `trace_level`, `log_dir`: String → `Option<String>`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use datagrid::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "25".to_string());
    /// map.insert("page_size_options".to_string(), "25, 50,oops".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page_size, 25);
    /// assert_eq!(config.page_size_options, vec![25, 50]);
    /// assert_eq!(config.debounce_ms, 300);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let pagination = match map.get("pagination").map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("cursor") => PaginationMode::Cursor,
            Some("page") => PaginationMode::Page,
            _ => defaults.pagination,
        };

        let search_mode = match map.get("search_mode").map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("fuzzy") => SearchMode::Fuzzy,
            Some("substring") => SearchMode::Substring,
            _ => defaults.search_mode,
        };

        let page_size = map
            .get("page_size")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.page_size);

        let page_size_options = map
            .get("page_size_options")
            .map(|s| {
                s.split(',')
                    .filter_map(|p| p.trim().parse::<usize>().ok())
                    .filter(|&n| n > 0)
                    .collect::<Vec<_>>()
            })
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.page_size_options);

        let debounce_ms = map
            .get("debounce_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.debounce_ms);

        Self {
            title: map.get("title").cloned().unwrap_or(defaults.title),
            pagination,
            page_size,
            page_size_options,
            debounce_ms,
            search_mode,
            theme_name: map.get("theme").cloned(),
            theme_file: map.get("theme_file").cloned(),
            trace_level: map.get("trace_level").cloned(),
            log_dir: map.get("log_dir").cloned(),
            columns: vec![],
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// - [`GridError::Io`] if the file cannot be read
    /// - [`GridError::Config`] if the TOML is invalid or `page_size` is zero
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| GridError::Config(format!("{}: {e}", path.display())))?;

        if config.page_size == 0 {
            return Err(GridError::Config("page_size must be positive".to_string()));
        }

        tracing::debug!(path = %path.display(), columns = config.columns.len(), "loaded config");
        Ok(config)
    }

    /// Resolves the theme: `theme_file`, then `theme_name`, then the default.
    /// Load failures fall back to the default theme.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(
            || {
                self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                })
            },
            |theme_file| {
                let path = infrastructure::expand_tilde(theme_file);
                Theme::from_file(&path).unwrap_or_else(|e| {
                    tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                    Theme::default()
                })
            },
        )
    }

    /// Column definitions for JSON rows.
    ///
    /// Uses the configured columns when present. Otherwise one sortable,
    /// text-filterable column is inferred per key, in first-seen order over
    /// the object rows.
    #[must_use]
    pub fn column_defs(&self, rows: &[Value]) -> Vec<ColumnDef<Value>> {
        if !self.columns.is_empty() {
            return self.columns.iter().map(ColumnConfig::to_column_def).collect();
        }

        let mut keys: Vec<&str> = Vec::new();
        for object in rows.iter().filter_map(Value::as_object) {
            for key in object.keys() {
                if !keys.contains(&key.as_str()) {
                    keys.push(key);
                }
            }
        }

        keys.into_iter()
            .map(|key| ColumnDef::keyed(key, key).sortable().filterable())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn map_parsing_is_lenient() {
        let mut map = BTreeMap::new();
        map.insert("pagination".to_string(), "Cursor".to_string());
        map.insert("search_mode".to_string(), "bogus".to_string());
        map.insert("page_size".to_string(), "0".to_string());
        map.insert("theme".to_string(), "catppuccin-latte".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.pagination, PaginationMode::Cursor);
        assert_eq!(config.search_mode, SearchMode::Substring);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    }

    #[test]
    fn configured_columns_are_built() {
        let config = Config {
            columns: vec![ColumnConfig {
                id: "status".to_string(),
                header: Some("Status".to_string()),
                sortable: true,
                filter: Some(FilterKind::Select),
                options: vec!["Open".to_string(), "Closed".to_string()],
                ..ColumnConfig::default()
            }],
            ..Config::default()
        };

        let columns = config.column_defs(&[]);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].header, "Status");
        assert!(columns[0].sortable);
        assert_eq!(columns[0].filter_kind(), Some(FilterKind::Select));
        assert_eq!(columns[0].filter_spec().map(|s| s.options.len()), Some(2));
    }

    #[test]
    fn columns_are_inferred_from_row_keys() {
        let rows = vec![json!({"name": "Alpha"}), json!({"name": "Beta", "status": "Closed"}), json!(3)];
        let columns = Config::default().column_defs(&rows);

        let ids: Vec<_> = columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["name", "status"]);
        assert!(columns.iter().all(|c| c.sortable && c.filterable));
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, Theme::default().name);
    }
}
