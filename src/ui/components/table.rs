//! Table grid renderer: column headers and rows.
//!
//! Columns are laid out left to right in the view model's order, separated by
//! a density-dependent gap. Selectable tables get a leading checkbox column
//! and tables with row actions a trailing actions column.

use crate::ui::helpers::{fit, width, write_highlighted};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HeaderCell, RowView};
use crate::table::Density;

/// Widest a column grows from its content when it has no explicit width.
const MAX_AUTO_WIDTH: usize = 32;
const MIN_WIDTH: usize = 3;
const CHECKBOX: &str = "[ ] ";

/// Layout shared by the header row and every body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub widths: Vec<usize>,
    pub gap: usize,
    pub selectable: bool,
    pub row_padding: usize,
}

impl GridLayout {
    /// Computes column widths from explicit widths or content, shrinking the
    /// widest columns until the grid fits `cols`.
    #[must_use]
    pub fn compute(columns: &[HeaderCell], rows: &[RowView], selectable: bool, density: Density, cols: usize) -> Self {
        let gap = density.cell_gap();

        let mut widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                column.width.unwrap_or_else(|| {
                    let content = rows
                        .iter()
                        .filter_map(|row| row.cells.get(i))
                        .map(|cell| width(&cell.text))
                        .max()
                        .unwrap_or(0);
                    content.max(width(&column.display_label())).min(MAX_AUTO_WIDTH)
                })
            })
            .map(|w| w.max(MIN_WIDTH))
            .collect();

        let actions = rows.first().map_or(0, |row| actions_width(row));
        let fixed = if selectable { width(CHECKBOX) } else { 0 } + actions + 1;
        let available = cols.saturating_sub(fixed + gap * widths.len().saturating_sub(1));

        while widths.iter().sum::<usize>() > available {
            let Some(widest) = widths.iter_mut().filter(|w| **w > MIN_WIDTH).max_by_key(|w| **w) else {
                break;
            };
            *widest -= 1;
        }

        Self {
            widths,
            gap,
            selectable,
            row_padding: density.row_padding(),
        }
    }
}

fn actions_width(row: &RowView) -> usize {
    row.actions.iter().map(|a| width(&a.label) + 3).sum()
}

/// Renders the column header row with sort indicators and active filters.
pub fn render_table_headers(out: &mut String, columns: &[HeaderCell], layout: &GridLayout, theme: &Theme) {
    out.push(' ');
    if layout.selectable {
        out.push_str(&" ".repeat(width(CHECKBOX)));
    }

    for (i, (column, w)) in columns.iter().zip(&layout.widths).enumerate() {
        if i > 0 {
            out.push_str(&" ".repeat(layout.gap));
        }

        let label = if column.filter.is_some() {
            format!("{}*", column.display_label())
        } else {
            column.display_label()
        };

        out.push_str(Theme::bold());
        if column.sort.is_some() {
            out.push_str(&Theme::fg(&theme.colors.accent_fg));
        } else {
            out.push_str(&Theme::fg(&theme.colors.column_header_fg));
        }
        out.push_str(&fit(&label, *w));
        out.push_str(Theme::reset());
    }
    out.push('\n');

    let filters: Vec<String> = columns
        .iter()
        .filter_map(|c| c.filter.as_ref().map(|f| format!("{}: {f}", c.label)))
        .collect();
    if !filters.is_empty() {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&format!(" * {}", filters.join(", ")));
        out.push_str(Theme::reset());
        out.push('\n');
    }
}

/// Renders every row of the current page.
pub fn render_table_rows(out: &mut String, rows: &[RowView], layout: &GridLayout, theme: &Theme) {
    for row in rows {
        for _ in 0..layout.row_padding {
            out.push('\n');
        }
        render_table_row(out, row, layout, theme);
        for _ in 0..layout.row_padding {
            out.push('\n');
        }
    }
}

/// Renders a single row.
///
/// # Styling Precedence
///
/// 1. Selection colors (if selected)
/// 2. Search match highlights (unless selected)
/// 3. Normal text color
fn render_table_row(out: &mut String, row: &RowView, layout: &GridLayout, theme: &Theme) {
    let base = if row.selected {
        format!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg))
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    out.push_str(&base);
    out.push(' ');

    if layout.selectable {
        out.push_str(if row.selected { "[x] " } else { CHECKBOX });
    }

    for (i, (cell, w)) in row.cells.iter().zip(&layout.widths).enumerate() {
        if i > 0 {
            out.push_str(&" ".repeat(layout.gap));
        }

        let text = fit(&cell.text, *w);
        if width(&cell.text) > *w {
            // Truncated text no longer lines up with the match ranges.
            out.push_str(&text);
        } else {
            write_highlighted(out, &text, &cell.highlight_ranges, theme, row.selected);
            if !row.selected && !cell.highlight_ranges.is_empty() {
                out.push_str(&base);
            }
        }
    }

    if !row.actions.is_empty() {
        out.push(' ');
        out.push_str(&Theme::fg(&theme.colors.accent_fg));
        for action in &row.actions {
            out.push_str(&format!(" [{}]", action.label));
        }
    }

    out.push_str(Theme::reset());
    out.push('\n');
}
