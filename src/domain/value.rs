//! Cell values extracted from rows by column accessors.
//!
//! The engine never looks inside a row directly. Every column accessor turns a
//! row into a [`CellValue`], and filtering, sorting, searching and rendering all
//! operate on that value. This keeps the row type fully generic while still
//! giving typed filters (numbers, dates) something concrete to compare.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Date formats accepted when coercing text into a date.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

/// Date-time formats accepted when coercing text into a date.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// A single cell's underlying value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing value. Fails every active column filter.
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl CellValue {
    /// Converts a JSON value into a cell value.
    ///
    /// Arrays are joined with `", "` and objects are kept as compact JSON text,
    /// so every JSON field can at least be searched and displayed.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::Text(s.clone()),
            serde_json::Value::Array(items) => Self::Text(
                items
                    .iter()
                    .map(|item| Self::from_json(item).to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            serde_json::Value::Object(_) => Self::Text(value.to_string()),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view of the value. Text is parsed after trimming.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Calendar-date view of the value. Text is parsed with [`parse_date`].
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Text(s) => parse_date(s),
            _ => None,
        }
    }

    /// Orders two values for sorting. Equivalent to comparing their
    /// [`SortKey`]s.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }

    /// The key this value sorts by.
    ///
    /// Text that parses as a number sorts as that number, and text that parses
    /// as a date sorts as that date. Every other text sorts case-insensitively.
    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        match self {
            Self::Null => SortKey::Null,
            Self::Bool(b) => SortKey::Bool(*b),
            Self::Number(n) => SortKey::Number(*n),
            Self::Date(d) => SortKey::Date(*d),
            Self::Text(s) => self
                .as_number()
                .map(SortKey::Number)
                .or_else(|| parse_date(s).map(SortKey::Date))
                .unwrap_or_else(|| SortKey::Text(s.to_lowercase())),
        }
    }
}

/// Totally ordered sort key of a [`CellValue`].
///
/// Keys of different classes order by class: booleans, then numbers, then
/// dates, then text, then nulls. Keys of one class compare by value (numbers
/// with [`f64::total_cmp`]).
#[derive(Debug, Clone)]
pub enum SortKey {
    Bool(bool),
    Number(f64),
    Date(NaiveDate),
    Text(String),
    Null,
}

impl SortKey {
    const fn class(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Date(_) => 2,
            Self::Text(_) => 3,
            Self::Null => 4,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.class().cmp(&other.class()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Parses a calendar date from user or row text.
///
/// Accepts plain dates (`2024-03-01`, `2024/03/01`, `01.03.2024`), naive
/// date-times, and RFC 3339 timestamps (the date part of the timestamp in its
/// own offset is used).
///
/// ```
/// use datagrid::domain::value::parse_date;
///
/// assert!(parse_date("2024-03-01").is_some());
/// assert!(parse_date("2024-03-01T12:30:00Z").is_some());
/// assert!(parse_date("next tuesday").is_none());
/// ```
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_values_map_to_cells() {
        assert_eq!(CellValue::from_json(&json!(null)), CellValue::Null);
        assert_eq!(CellValue::from_json(&json!(3)), CellValue::Number(3.0));
        assert_eq!(CellValue::from_json(&json!("x")), CellValue::Text("x".into()));
        assert_eq!(
            CellValue::from_json(&json!(["a", 1])),
            CellValue::Text("a, 1".into())
        );
    }

    #[test]
    fn whole_numbers_display_without_fraction() {
        assert_eq!(CellValue::Number(42.0).to_string(), "42");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Null.to_string(), "");
    }

    #[test]
    fn text_coerces_to_numbers_and_dates() {
        assert_eq!(CellValue::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(CellValue::from("abc").as_number(), None);
        assert_eq!(
            CellValue::from("2024-02-29").as_date(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(
            CellValue::from("2024-02-29T23:10:00+02:00").as_date(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn compare_uses_numeric_order_for_numbers() {
        let nine = CellValue::Number(9.0);
        let ten = CellValue::Number(10.0);
        assert_eq!(nine.compare(&ten), Ordering::Less);
        assert_eq!(CellValue::from("9").compare(&ten), Ordering::Less);
    }

    #[test]
    fn mixed_values_order_by_class() {
        let ten = CellValue::Number(10.0);
        let ten_a = CellValue::from("10a");
        let nine = CellValue::from("9");

        assert_eq!(ten.compare(&ten_a), Ordering::Less);
        assert_eq!(nine.compare(&ten), Ordering::Less);
        assert_eq!(nine.compare(&ten_a), Ordering::Less);
        assert_eq!(CellValue::from("2024-01-02").compare(&CellValue::Number(1e9)), Ordering::Greater);
        assert_eq!(CellValue::Bool(true).compare(&CellValue::Number(-1.0)), Ordering::Less);
    }

    #[test]
    fn compare_text_is_case_insensitive() {
        assert_eq!(
            CellValue::from("alpha").compare(&CellValue::from("Beta")),
            Ordering::Less
        );
    }

    #[test]
    fn options_map_none_to_null() {
        let none: Option<&str> = None;
        assert!(CellValue::from(none).is_null());
        assert_eq!(CellValue::from(Some(1_i64)), CellValue::Number(1.0));
    }
}
