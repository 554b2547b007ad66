//! User interface layer: view models and the ANSI terminal renderer.
//!
//! ```text
//! TableState → compute_viewmodel → TableViewModel → render → ANSI frame
//! ```
//!
//! The view model is the headless output any front end can consume; the
//! renderer is one such front end.
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing a renderable table
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, truncation)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{
    BodyState, CellView, EmptyState, FooterInfo, HeaderCell, HeaderInfo, PaginationView, RowView, SearchBarInfo,
    TableViewModel,
};
