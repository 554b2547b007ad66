//! Toolbar and view toggles local to one table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Row density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Compact,
    #[default]
    Standard,
    Comfortable,
}

impl Density {
    /// The next density in the toolbar's cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Compact => Self::Standard,
            Self::Standard => Self::Comfortable,
            Self::Comfortable => Self::Compact,
        }
    }

    /// Blank lines above and below each row's content.
    #[must_use]
    pub const fn row_padding(self) -> usize {
        match self {
            Self::Compact | Self::Standard => 0,
            Self::Comfortable => 1,
        }
    }

    /// Spaces between cells.
    #[must_use]
    pub const fn cell_gap(self) -> usize {
        match self {
            Self::Compact => 1,
            Self::Standard => 2,
            Self::Comfortable => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Standard => "standard",
            Self::Comfortable => "comfortable",
        }
    }
}

/// Which toolbar controls are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarConfig {
    pub search: bool,
    pub column_toggle: bool,
    pub density: bool,
    pub full_screen: bool,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            search: true,
            column_toggle: true,
            density: true,
            full_screen: true,
        }
    }
}

/// Current view toggles.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewOptions {
    /// Ids of hidden columns.
    pub hidden: BTreeSet<String>,
    pub density: Density,
    pub full_screen: bool,
}

impl ViewOptions {
    #[must_use]
    pub fn is_visible(&self, column: &str) -> bool {
        !self.hidden.contains(column)
    }

    /// Flips a column's visibility. Returns `true` if it is now visible.
    pub fn toggle_column(&mut self, column: &str) -> bool {
        if self.hidden.remove(column) {
            true
        } else {
            self.hidden.insert(column.to_string());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_cycles_through_all_levels() {
        let start = Density::default();
        assert_eq!(start.next().next().next(), start);
        assert_eq!(Density::Comfortable.row_padding(), 1);
    }

    #[test]
    fn toggling_a_column_twice_restores_it() {
        let mut view = ViewOptions::default();
        assert!(!view.toggle_column("status"));
        assert!(!view.is_visible("status"));
        assert!(view.toggle_column("status"));
        assert!(view.is_visible("status"));
    }
}
