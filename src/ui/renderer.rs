//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: transform `TableState` into `TableViewModel`
//! 2. **Component Rendering**: delegate to the component renderers, which
//!    append to one frame buffer
//!
//! # Example
//!
//! ```rust
//! use datagrid::table::{ColumnDef, DataMode, TableOptions, TableState};
//! use datagrid::ui::{render, Theme};
//! use serde_json::{json, Value};
//!
//! let columns: Vec<ColumnDef<Value>> = vec![ColumnDef::keyed("name", "Name")];
//! let state = TableState::new(columns, DataMode::Client(vec![json!({"name": "Alpha"})]), TableOptions::default())?;
//!
//! let frame = render(&state, &Theme::default(), 80);
//! assert!(frame.contains("Alpha"));
//! # Ok::<(), datagrid::domain::GridError>(())
//! ```

use crate::table::TableState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TableViewModel;

/// Renders a table to an ANSI-styled frame.
///
/// # Parameters
///
/// * `state` - Current table state
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// # Output
///
/// Returns the frame as a string of newline-terminated lines. Does not clear
/// the screen or manage cursor position.
#[must_use]
pub fn render<T>(state: &TableState<T>, theme: &Theme, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel();
    render_viewmodel(&viewmodel, theme, cols)
}

/// Renders a pre-computed view model.
#[must_use]
pub fn render_viewmodel(vm: &TableViewModel, theme: &Theme, cols: usize) -> String {
    let _span = tracing::debug_span!("render", cols, full_screen = vm.full_screen).entered();

    let mut out = String::new();
    components::render_frame(&mut out, vm, theme, cols.max(20));
    out
}
