//! Title bar and toolbar renderers.

use crate::ui::helpers::{center, fit};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HeaderInfo, ToolbarInfo};

/// Renders the centered title bar.
///
/// # Layout
///
/// ```text
/// [left padding] Title (42 rows, 2 filters) [right padding]
/// ```
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let filters = match header.active_filters {
        0 => String::new(),
        1 => ", 1 filter".to_string(),
        n => format!(", {n} filters"),
    };
    let title = format!(" {} ({} rows{filters}) ", header.title, header.total);

    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    out.push_str(&center(&title, cols));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Renders the toolbar line: column toggles, density and full-screen state.
///
/// Writes nothing when the toolbar offers none of these controls.
pub fn render_toolbar(out: &mut String, toolbar: &ToolbarInfo, theme: &Theme, cols: usize) {
    let mut parts = Vec::new();

    if let Some(toggles) = &toolbar.column_toggles {
        let columns: Vec<String> = toggles
            .iter()
            .map(|t| format!("[{}] {}", if t.visible { "x" } else { " " }, t.label))
            .collect();
        parts.push(format!("Columns: {}", columns.join(" ")));
    }
    if let Some(density) = toolbar.density {
        parts.push(format!("Density: {}", density.label()));
    }
    if let Some(full_screen) = toolbar.full_screen {
        parts.push(format!("Full screen: {}", if full_screen { "on" } else { "off" }));
    }

    if parts.is_empty() {
        return;
    }

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&fit(&format!(" {}", parts.join("  ·  ")), cols));
    out.push_str(Theme::reset());
    out.push('\n');
}
