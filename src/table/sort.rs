//! Single-column sort state and client-side sorting.
//!
//! # State Machine
//!
//! ```text
//!            click f            click f             click f
//! Unsorted ──────────▶ Asc(f) ──────────▶ Desc(f) ──────────▶ Asc(f)
//!                         │                   │
//!                         └──── click g ──────┴──────────────▶ Asc(g)
//! ```
//!
//! Clicking a non-sortable column is handled by the caller as a no-op; this
//! module only models the transition for sortable fields.

use crate::domain::SortKey;
use crate::table::column::ColumnDef;
use crate::table::selection::RowId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Header indicator glyph.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// The active sort: none, or one field in one direction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "direction", content = "field")]
pub enum SortState {
    #[default]
    Unsorted,
    Asc(String),
    Desc(String),
}

impl SortState {
    /// The state after a header click on `field`.
    #[must_use]
    pub fn toggled(&self, field: &str) -> Self {
        match self {
            Self::Asc(current) if current == field => Self::Desc(field.to_string()),
            _ => Self::Asc(field.to_string()),
        }
    }

    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Unsorted => None,
            Self::Asc(f) | Self::Desc(f) => Some(f),
        }
    }

    #[must_use]
    pub const fn direction(&self) -> Option<SortDirection> {
        match self {
            Self::Unsorted => None,
            Self::Asc(_) => Some(SortDirection::Asc),
            Self::Desc(_) => Some(SortDirection::Desc),
        }
    }

    /// The direction if the table is sorted by `field`.
    #[must_use]
    pub fn direction_for(&self, field: &str) -> Option<SortDirection> {
        (self.field() == Some(field)).then(|| self.direction()).flatten()
    }
}

/// Sorts row ids by a column's values.
///
/// The sort is stable, so rows with equal values keep their relative order.
/// Null values sort last in both directions.
pub fn sort_rows<T>(rows: &[T], ids: &mut [RowId], column: &ColumnDef<T>, direction: SortDirection) {
    let mut keyed: Vec<(RowId, SortKey)> = ids
        .iter()
        .map(|id| {
            let key = rows.get(id.0).map_or(SortKey::Null, |row| column.value(row).sort_key());
            (*id, key)
        })
        .collect();

    keyed.sort_by(|(_, a), (_, b)| match (a, b) {
        (SortKey::Null, SortKey::Null) => Ordering::Equal,
        (SortKey::Null, _) => Ordering::Greater,
        (_, SortKey::Null) => Ordering::Less,
        _ => match direction {
            SortDirection::Asc => a.cmp(b),
            SortDirection::Desc => b.cmp(a),
        },
    });

    for (slot, (id, _)) in ids.iter_mut().zip(keyed) {
        *slot = id;
    }
}
