//! Global search and typed column filters.
//!
//! This module holds the filter model ([`FilterKind`], [`FilterSpec`],
//! [`FilterValue`], [`FilterState`]) and the evaluator that turns a
//! [`FilterState`] into a set of matching rows.
//!
//! # Matching Rules
//!
//! A row passes when both hold:
//!
//! 1. **Global search**: the search string is blank, or at least one visible
//!    column's stringified value contains it (case-insensitive substring, or a
//!    skim fuzzy match in [`SearchMode::Fuzzy`]).
//! 2. **Column filters**: every active filter matches the column's value:
//!    - `text`: case-insensitive substring
//!    - `select`: exact match against the chosen option
//!    - `multi_select`: substring match against any chosen option
//!    - `date` / `date_range`: on or within the bounds, open sides allowed
//!    - `number` / `number_range`: numeric comparison, open sides allowed
//!
//! Null values fail every active filter. Filters that do not apply (unknown
//! column, non-filterable column, value shape that does not fit the column's
//! kind, unparsable date or number) are ignored.
//!
//! # Example
//!
//! ```rust
//! use datagrid::table::{ColumnDef, FilterSpec, FilterState, FilterValue, SearchMode};
//! use datagrid::table::filter::CompiledFilters;
//! use serde_json::{json, Value};
//!
//! let columns: Vec<ColumnDef<Value>> = vec![
//!     ColumnDef::keyed("name", "Name"),
//!     ColumnDef::keyed("status", "Status").filter(FilterSpec::select(["Open", "Closed"])),
//! ];
//! let rows = vec![
//!     json!({"name": "Alpha", "status": "Open"}),
//!     json!({"name": "Beta", "status": "Closed"}),
//! ];
//!
//! let mut state = FilterState::default();
//! state.set_column("status", FilterValue::text("Closed"));
//!
//! let filters = CompiledFilters::compile(&columns, |_| true, &state, SearchMode::Substring);
//! let matched = filters.apply(&rows);
//! assert_eq!(matched.len(), 1);
//! assert_eq!(rows[matched[0].0]["name"], "Beta");
//! ```

use crate::domain::value::parse_date;
use crate::domain::CellValue;
use crate::table::column::{find_column, ColumnDef};
use crate::table::selection::RowId;
use chrono::NaiveDate;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The kind of filter a column accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    #[default]
    Text,
    Select,
    MultiSelect,
    Date,
    DateRange,
    Number,
    NumberRange,
}

/// A column's filter capability: its kind plus the choices offered by
/// select-style filters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    pub kind: FilterKind,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl FilterSpec {
    #[must_use]
    pub const fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            options: Vec::new(),
            placeholder: None,
        }
    }

    #[must_use]
    pub const fn text() -> Self {
        Self::new(FilterKind::Text)
    }

    pub fn select<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            ..Self::new(FilterKind::Select)
        }
    }

    pub fn multi_select<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            ..Self::new(FilterKind::MultiSelect)
        }
    }

    #[must_use]
    pub const fn date() -> Self {
        Self::new(FilterKind::Date)
    }

    #[must_use]
    pub const fn date_range() -> Self {
        Self::new(FilterKind::DateRange)
    }

    #[must_use]
    pub const fn number() -> Self {
        Self::new(FilterKind::Number)
    }

    #[must_use]
    pub const fn number_range() -> Self {
        Self::new(FilterKind::NumberRange)
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// How the global search string is matched against cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Case-insensitive substring match.
    #[default]
    Substring,
    /// Skim-style fuzzy match (characters in order, gaps allowed).
    Fuzzy,
}

/// A value entered into a column filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum FilterValue {
    /// Text, select, or single date/number filters.
    Text(String),
    /// Multi-select choices.
    Many(Vec<String>),
    NumberRange { min: Option<f64>, max: Option<f64> },
    DateRange { from: Option<NaiveDate>, to: Option<NaiveDate> },
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn many<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Many(values.into_iter().map(Into::into).collect())
    }

    /// Whether the value leaves the filter inactive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Many(values) => values.iter().all(|v| v.trim().is_empty()),
            Self::NumberRange { min, max } => min.is_none() && max.is_none(),
            Self::DateRange { from, to } => from.is_none() && to.is_none(),
        }
    }

    /// Parses user input for a filter of the given kind.
    ///
    /// - Multi-select choices are separated by `|` or `,`.
    /// - Ranges use `from..to`; either side may be left empty. A value without
    ///   `..` is treated as the exact bound on both sides.
    ///
    /// Returns `None` when the input is blank or a range bound cannot be parsed.
    ///
    /// ```rust
    /// use datagrid::table::{FilterKind, FilterValue};
    ///
    /// assert_eq!(
    ///     FilterValue::parse(FilterKind::NumberRange, "10.."),
    ///     Some(FilterValue::NumberRange { min: Some(10.0), max: None })
    /// );
    /// assert_eq!(
    ///     FilterValue::parse(FilterKind::MultiSelect, "Open|Pending"),
    ///     Some(FilterValue::many(["Open", "Pending"]))
    /// );
    /// ```
    #[must_use]
    pub fn parse(kind: FilterKind, input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        match kind {
            FilterKind::Text | FilterKind::Select | FilterKind::Date | FilterKind::Number => {
                Some(Self::Text(input.to_string()))
            }
            FilterKind::MultiSelect => {
                let choices: Vec<String> = input
                    .split(['|', ','])
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(String::from)
                    .collect();
                (!choices.is_empty()).then_some(Self::Many(choices))
            }
            FilterKind::NumberRange => {
                let (min, max) = parse_bounds(input, |s| s.parse::<f64>().ok())?;
                Some(Self::NumberRange { min, max })
            }
            FilterKind::DateRange => {
                let (from, to) = parse_bounds(input, parse_date)?;
                Some(Self::DateRange { from, to })
            }
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn side<V: fmt::Display>(bound: Option<&V>) -> String {
            bound.map(ToString::to_string).unwrap_or_default()
        }

        match self {
            Self::Text(s) => f.write_str(s),
            Self::Many(values) => f.write_str(&values.join(" | ")),
            Self::NumberRange { min, max } => write!(f, "{}..{}", side(min.as_ref()), side(max.as_ref())),
            Self::DateRange { from, to } => write!(f, "{}..{}", side(from.as_ref()), side(to.as_ref())),
        }
    }
}

/// Splits `from..to` input and parses each non-empty side.
fn parse_bounds<V: Copy>(input: &str, parse: impl Fn(&str) -> Option<V>) -> Option<(Option<V>, Option<V>)> {
    let side = |s: &str| -> Option<Option<V>> {
        let s = s.trim();
        if s.is_empty() {
            Some(None)
        } else {
            parse(s).map(Some)
        }
    };

    match input.split_once("..") {
        Some((lo, hi)) => Some((side(lo)?, side(hi)?)),
        None => {
            let exact = side(input)?;
            Some((exact, exact))
        }
    }
}

/// Current global search string plus per-column filter values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub global: String,
    #[serde(default)]
    pub columns: BTreeMap<String, FilterValue>,
}

impl FilterState {
    /// Replaces the global search string. Returns whether it changed.
    pub fn set_global(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if self.global == query {
            return false;
        }
        self.global = query;
        true
    }

    /// Sets a column filter; an empty value removes it. Returns whether the
    /// state changed.
    pub fn set_column(&mut self, column: impl Into<String>, value: FilterValue) -> bool {
        let column = column.into();
        if value.is_empty() {
            return self.columns.remove(&column).is_some();
        }
        if self.columns.get(&column) == Some(&value) {
            return false;
        }
        self.columns.insert(column, value);
        true
    }

    pub fn clear_column(&mut self, column: &str) -> bool {
        self.columns.remove(column).is_some()
    }

    /// Clears the search string and every column filter.
    pub fn reset(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.global.clear();
        self.columns.clear();
        true
    }

    #[must_use]
    pub fn column(&self, column: &str) -> Option<&FilterValue> {
        self.columns.get(column)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global.trim().is_empty() && self.columns.is_empty()
    }

    /// Number of active constraints, counting the search string as one.
    #[must_use]
    pub fn active_count(&self) -> usize {
        usize::from(!self.global.trim().is_empty()) + self.columns.len()
    }
}

/// A column filter compiled against its column kind.
#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    Contains(String),
    Equals(String),
    AnyOf(Vec<String>),
    Dates {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    Numbers {
        min: Option<f64>,
        max: Option<f64>,
    },
}

impl Predicate {
    fn compile(kind: FilterKind, value: &FilterValue) -> Option<Self> {
        if value.is_empty() {
            return None;
        }

        match (kind, value) {
            (FilterKind::Text, FilterValue::Text(s)) => Some(Self::Contains(s.trim().to_lowercase())),
            (FilterKind::Select, FilterValue::Text(s)) => Some(Self::Equals(s.trim().to_string())),
            (FilterKind::MultiSelect, FilterValue::Text(s)) => Some(Self::AnyOf(vec![s.trim().to_lowercase()])),
            (FilterKind::MultiSelect, FilterValue::Many(choices)) => Some(Self::AnyOf(
                choices
                    .iter()
                    .map(|c| c.trim().to_lowercase())
                    .filter(|c| !c.is_empty())
                    .collect(),
            )),
            (FilterKind::Date, FilterValue::Text(s)) => {
                parse_date(s).map(|d| Self::Dates { from: Some(d), to: Some(d) })
            }
            (FilterKind::Date | FilterKind::DateRange, FilterValue::DateRange { from, to }) => {
                Some(Self::Dates { from: *from, to: *to })
            }
            (FilterKind::Number, FilterValue::Text(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .map(|n| Self::Numbers { min: Some(n), max: Some(n) }),
            (FilterKind::Number | FilterKind::NumberRange, FilterValue::NumberRange { min, max }) => {
                Some(Self::Numbers { min: *min, max: *max })
            }
            _ => None,
        }
    }

    fn matches(&self, value: &CellValue) -> bool {
        if value.is_null() {
            return false;
        }

        match self {
            Self::Contains(needle) => value.to_string().to_lowercase().contains(needle.as_str()),
            Self::Equals(expected) => value.to_string() == *expected,
            Self::AnyOf(choices) => {
                let haystack = value.to_string().to_lowercase();
                choices.iter().any(|choice| haystack.contains(choice.as_str()))
            }
            Self::Dates { from, to } => value.as_date().is_some_and(|d| {
                from.map_or(true, |f| d >= f) && to.map_or(true, |t| d <= t)
            }),
            Self::Numbers { min, max } => value.as_number().is_some_and(|n| {
                min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m)
            }),
        }
    }
}

/// Matcher for the global search string.
enum SearchMatcher {
    Substring(String),
    Fuzzy { query: String, matcher: SkimMatcherV2 },
}

impl SearchMatcher {
    fn new(query: &str, mode: SearchMode) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(match mode {
            SearchMode::Substring => Self::Substring(query.to_lowercase()),
            SearchMode::Fuzzy => Self::Fuzzy {
                query: query.to_string(),
                matcher: SkimMatcherV2::default(),
            },
        })
    }

    fn matches(&self, text: &str) -> bool {
        match self {
            Self::Substring(needle) => text.to_lowercase().contains(needle.as_str()),
            Self::Fuzzy { query, matcher } => matcher.fuzzy_match(text, query).is_some(),
        }
    }
}

/// A [`FilterState`] compiled against a column set, ready to test rows.
pub struct CompiledFilters<'a, T> {
    search: Option<SearchMatcher>,
    search_columns: Vec<&'a ColumnDef<T>>,
    predicates: Vec<(&'a ColumnDef<T>, Predicate)>,
}

impl<'a, T> CompiledFilters<'a, T> {
    /// Compiles the filter state.
    ///
    /// `is_visible` receives a column id and decides whether that column takes
    /// part in global search. Column filters apply regardless of visibility.
    pub fn compile(
        columns: &'a [ColumnDef<T>],
        is_visible: impl Fn(&str) -> bool,
        state: &FilterState,
        mode: SearchMode,
    ) -> Self {
        let search = SearchMatcher::new(&state.global, mode);
        let search_columns = columns.iter().filter(|c| is_visible(&c.id)).collect();

        let predicates = state
            .columns
            .iter()
            .filter_map(|(id, value)| {
                let Some(column) = find_column(columns, id) else {
                    tracing::debug!(column = %id, "ignoring filter on unknown column");
                    return None;
                };
                let Some(kind) = column.filter_kind() else {
                    tracing::debug!(column = %id, "ignoring filter on non-filterable column");
                    return None;
                };
                let predicate = Predicate::compile(kind, value);
                if predicate.is_none() {
                    tracing::debug!(column = %id, kind = ?kind, "ignoring filter value that does not fit column kind");
                }
                predicate.map(|p| (column, p))
            })
            .collect();

        Self {
            search,
            search_columns,
            predicates,
        }
    }

    /// Whether any constraint is in effect.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.search.is_some() || !self.predicates.is_empty()
    }

    /// Tests a single row.
    pub fn matches(&self, row: &T) -> bool {
        if let Some(search) = &self.search {
            let hit = self
                .search_columns
                .iter()
                .any(|column| search.matches(&column.value(row).to_string()));
            if !hit {
                return false;
            }
        }

        self.predicates
            .iter()
            .all(|(column, predicate)| predicate.matches(&column.value(row)))
    }

    /// Returns the ids of all matching rows, in input order.
    pub fn apply(&self, rows: &[T]) -> Vec<RowId> {
        rows.iter()
            .enumerate()
            .filter(|(_, row)| self.matches(row))
            .map(|(index, _)| RowId(index))
            .collect()
    }
}

/// Computes character ranges of `text` matched by the search query.
///
/// Returned ranges are `(start, end)` character indices with exclusive end,
/// suitable for highlighting.
#[must_use]
pub fn highlight_ranges(text: &str, query: &str, mode: SearchMode) -> Vec<(usize, usize)> {
    let query = query.trim();
    if query.is_empty() || text.is_empty() {
        return vec![];
    }

    match mode {
        SearchMode::Substring => substring_ranges(text, query),
        SearchMode::Fuzzy => SkimMatcherV2::default()
            .fuzzy_indices(text, query)
            .map_or_else(Vec::new, |(_score, indices)| coalesce_indices(&indices)),
    }
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn substring_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let hay: Vec<char> = text.chars().map(fold_char).collect();
    let needle: Vec<char> = query.chars().map(fold_char).collect();

    let mut ranges = Vec::new();
    let mut start = 0;
    while start + needle.len() <= hay.len() {
        if hay[start..start + needle.len()] == needle[..] {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}

/// Collapses sorted character indices into contiguous `(start, end)` runs.
fn coalesce_indices(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = None;
    let mut prev = None;

    for &idx in indices {
        match (start, prev) {
            (None, _) => {
                start = Some(idx);
                prev = Some(idx);
            }
            (Some(_), Some(p)) if idx == p + 1 => {
                prev = Some(idx);
            }
            (Some(s), Some(p)) => {
                ranges.push((s, p + 1));
                start = Some(idx);
                prev = Some(idx);
            }
            _ => {}
        }
    }

    if let (Some(s), Some(p)) = (start, prev) {
        ranges.push((s, p + 1));
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn columns() -> Vec<ColumnDef<Value>> {
        vec![
            ColumnDef::keyed("name", "Name").filterable(),
            ColumnDef::keyed("status", "Status").filter(FilterSpec::select(["Open", "Closed"])),
            ColumnDef::keyed("tags", "Tags").filter(FilterSpec::multi_select(["urgent", "billing"])),
            ColumnDef::keyed("due", "Due").filter(FilterSpec::date_range()),
            ColumnDef::keyed("amount", "Amount").filter(FilterSpec::number_range()),
            ColumnDef::keyed("notes", "Notes"),
        ]
    }

    fn rows() -> Vec<Value> {
        vec![
            json!({"name": "Alpha", "status": "Open", "tags": "urgent", "due": "2024-01-10", "amount": 100, "notes": "call back"}),
            json!({"name": "Beta", "status": "Closed", "tags": "billing", "due": "2024-02-20", "amount": 250.5, "notes": null}),
            json!({"name": "Gamma", "status": "Open", "tags": "urgent, billing", "due": null, "amount": null, "notes": "waiting"}),
        ]
    }

    fn run(state: &FilterState) -> Vec<usize> {
        let columns = columns();
        let rows = rows();
        CompiledFilters::compile(&columns, |_| true, state, SearchMode::Substring)
            .apply(&rows)
            .into_iter()
            .map(|id| id.0)
            .collect()
    }

    #[test]
    fn select_filter_matches_exactly() {
        let columns: Vec<ColumnDef<Value>> = vec![
            ColumnDef::keyed("name", "Name"),
            ColumnDef::keyed("status", "Status").filter(FilterSpec::select(["Open", "Closed"])),
        ];
        let rows = vec![
            json!({"name": "Alpha", "status": "Open"}),
            json!({"name": "Beta", "status": "Closed"}),
        ];
        let mut state = FilterState::default();
        state.set_column("status", FilterValue::text("Closed"));

        let matched = CompiledFilters::compile(&columns, |_| true, &state, SearchMode::Substring).apply(&rows);
        assert_eq!(matched, vec![RowId(1)]);
        assert_eq!(rows[matched[0].0], json!({"name": "Beta", "status": "Closed"}));
    }

    #[test]
    fn clearing_a_filter_restores_every_row() {
        let mut state = FilterState::default();
        state.set_column("status", FilterValue::text("Open"));
        assert_eq!(run(&state), vec![0, 2]);

        state.clear_column("status");
        assert_eq!(run(&state), vec![0, 1, 2]);
    }

    #[test]
    fn blank_global_search_keeps_every_row() {
        let mut state = FilterState::default();
        state.set_global("");
        assert_eq!(run(&state), vec![0, 1, 2]);
        state.set_global("   ");
        assert_eq!(run(&state), vec![0, 1, 2]);
    }

    #[test]
    fn global_search_is_case_insensitive_across_columns() {
        let mut state = FilterState::default();
        state.set_global("WAIT");
        assert_eq!(run(&state), vec![2]);
        state.set_global("bet");
        assert_eq!(run(&state), vec![1]);
    }

    #[test]
    fn global_search_skips_hidden_columns() {
        let columns = columns();
        let rows = rows();
        let mut state = FilterState::default();
        state.set_global("call back");

        let visible = CompiledFilters::compile(&columns, |_| true, &state, SearchMode::Substring);
        let hidden = CompiledFilters::compile(&columns, |id| id != "notes", &state, SearchMode::Substring);
        assert_eq!(visible.apply(&rows), vec![RowId(0)]);
        assert!(hidden.apply(&rows).is_empty());
    }

    #[test]
    fn multi_select_is_disjunctive() {
        let mut state = FilterState::default();
        state.set_column("tags", FilterValue::many(["billing"]));
        assert_eq!(run(&state), vec![1, 2]);
        state.set_column("tags", FilterValue::many(["urgent", "billing"]));
        assert_eq!(run(&state), vec![0, 1, 2]);
    }

    #[test]
    fn column_filters_are_conjunctive() {
        let mut state = FilterState::default();
        state.set_column("status", FilterValue::text("Open"));
        state.set_column("tags", FilterValue::many(["billing"]));
        assert_eq!(run(&state), vec![2]);
    }

    #[test]
    fn date_range_with_open_side() {
        let mut state = FilterState::default();
        state.set_column(
            "due",
            FilterValue::DateRange { from: NaiveDate::from_ymd_opt(2024, 2, 1), to: None },
        );
        assert_eq!(run(&state), vec![1]);

        state.set_column(
            "due",
            FilterValue::DateRange { from: None, to: NaiveDate::from_ymd_opt(2024, 1, 10) },
        );
        assert_eq!(run(&state), vec![0]);
    }

    #[test]
    fn number_range_bounds_are_inclusive_and_nulls_fail() {
        let mut state = FilterState::default();
        state.set_column("amount", FilterValue::NumberRange { min: Some(100.0), max: Some(250.5) });
        assert_eq!(run(&state), vec![0, 1]);
        state.set_column("amount", FilterValue::NumberRange { min: None, max: Some(99.0) });
        assert!(run(&state).is_empty());
    }

    #[test]
    fn single_date_and_number_filters_match_exact_values() {
        let columns: Vec<ColumnDef<Value>> = vec![
            ColumnDef::keyed("due", "Due").filter(FilterSpec::date()),
            ColumnDef::keyed("amount", "Amount").filter(FilterSpec::number()),
        ];
        let rows = rows();
        let matching = |state: &FilterState| -> Vec<usize> {
            CompiledFilters::compile(&columns, |_| true, state, SearchMode::Substring)
                .apply(&rows)
                .into_iter()
                .map(|id| id.0)
                .collect()
        };

        let mut state = FilterState::default();
        state.set_column("due", FilterValue::text("2024/02/20"));
        assert_eq!(matching(&state), vec![1]);

        state.reset();
        state.set_column("amount", FilterValue::text(" 100 "));
        assert_eq!(matching(&state), vec![0]);

        state.set_column("amount", FilterValue::text("250"));
        assert!(matching(&state).is_empty());

        state.reset();
        state.set_column("due", FilterValue::text("someday"));
        assert_eq!(matching(&state), vec![0, 1, 2]);
    }

    #[test]
    fn mismatched_and_unknown_filters_are_ignored() {
        let mut state = FilterState::default();
        state.set_column("amount", FilterValue::text("lots"));
        state.set_column("nope", FilterValue::text("x"));
        state.set_column("notes", FilterValue::text("waiting"));
        assert_eq!(run(&state), vec![0, 1, 2]);
    }

    #[test]
    fn empty_values_remove_filters() {
        let mut state = FilterState::default();
        assert!(state.set_column("name", FilterValue::text("a")));
        assert!(!state.set_column("name", FilterValue::text("a")));
        assert!(state.set_column("name", FilterValue::text("")));
        assert!(state.is_empty());
    }

    #[test]
    fn fuzzy_search_matches_scattered_characters() {
        let columns = columns();
        let rows = rows();
        let mut state = FilterState::default();
        state.set_global("gma");
        let fuzzy = CompiledFilters::compile(&columns, |_| true, &state, SearchMode::Fuzzy);
        assert_eq!(fuzzy.apply(&rows), vec![RowId(2)]);
    }

    #[test]
    fn parse_handles_ranges_and_bad_input() {
        assert_eq!(
            FilterValue::parse(FilterKind::DateRange, "2024-01-01..2024-01-31"),
            Some(FilterValue::DateRange {
                from: NaiveDate::from_ymd_opt(2024, 1, 1),
                to: NaiveDate::from_ymd_opt(2024, 1, 31),
            })
        );
        assert_eq!(
            FilterValue::parse(FilterKind::NumberRange, "5"),
            Some(FilterValue::NumberRange { min: Some(5.0), max: Some(5.0) })
        );
        assert_eq!(FilterValue::parse(FilterKind::NumberRange, "a..b"), None);
        assert_eq!(FilterValue::parse(FilterKind::Text, "  "), None);
    }

    #[test]
    fn highlight_ranges_cover_every_occurrence() {
        assert_eq!(highlight_ranges("Banana", "an", SearchMode::Substring), vec![(1, 3), (3, 5)]);
        assert!(highlight_ranges("Alpha", "", SearchMode::Substring).is_empty());
        assert_eq!(coalesce_indices(&[0, 1, 2, 5, 6, 9]), vec![(0, 3), (5, 7), (9, 10)]);
    }
}
