//! Composable UI component renderers.
//!
//! Each component appends its lines to a frame buffer.
//!
//! # Components
//!
//! - [`header`]: Title bar and toolbar line
//! - [`search`]: Search input box
//! - [`table`]: Column headers and rows
//! - [`empty`]: Loading, error and empty body states
//! - [`footer`]: Pagination, page sizes, selection and bulk actions
//!
//! # Layout
//!
//! ```text
//! [Header]            (omitted in full-screen mode)
//! [Toolbar]           (omitted in full-screen mode)
//! [Border]
//! [Search Bar]        (when the toolbar offers search)
//! [Error banner]      (when a fetch failed but rows remain)
//! [Table Headers]
//! [Body]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod search;
mod table;

pub use table::GridLayout;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyState, TableViewModel};

use empty::{render_empty_state, render_error, render_loading};
use footer::render_footer;
use header::{render_header, render_toolbar};
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal separator line.
fn render_border(out: &mut String, color: &str, cols: usize) {
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Renders a complete frame for a view model.
pub fn render_frame(out: &mut String, vm: &TableViewModel, theme: &Theme, cols: usize) {
    if !vm.full_screen {
        render_header(out, &vm.header, theme, cols);
        render_toolbar(out, &vm.toolbar, theme, cols);
    }
    render_border(out, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        render_search_bar(out, search, theme, cols);
    }

    if let Some(error) = &vm.error_banner {
        out.push_str(&Theme::fg(&theme.colors.error_fg));
        out.push_str(&format!(" ! {error}"));
        out.push_str(Theme::reset());
        out.push('\n');
    }

    let rows = match &vm.body {
        BodyState::Rows(rows) => rows.as_slice(),
        _ => &[],
    };
    let layout = GridLayout::compute(&vm.columns, rows, vm.selectable, vm.density, cols);
    render_table_headers(out, &vm.columns, &layout, theme);

    match &vm.body {
        BodyState::Loading => render_loading(out, theme, cols),
        BodyState::Error { message } => render_error(out, message, theme, cols),
        BodyState::Empty(empty) => render_empty_state(out, empty, theme, cols),
        BodyState::Rows(rows) => render_table_rows(out, rows, &layout, theme),
    }

    if vm.refreshing {
        out.push_str(Theme::dim());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(" Refreshing…");
        out.push_str(Theme::reset());
        out.push('\n');
    }

    render_border(out, &theme.colors.border, cols);
    render_footer(out, &vm.footer, theme, cols);
}
