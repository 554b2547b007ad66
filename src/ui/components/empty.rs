//! Body messages shown instead of rows: loading, error and empty states.

use crate::ui::helpers::center;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state as a centered message and dimmed subtitle.
///
/// # Layout
///
/// ```text
/// [blank line]
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// [blank line]
/// ```
pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, cols: usize) {
    out.push('\n');
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    out.push_str(&center(&empty.message, cols));
    out.push_str(Theme::reset());
    out.push('\n');

    if !empty.subtitle.is_empty() {
        out.push_str(Theme::dim());
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&center(&empty.subtitle, cols));
        out.push_str(Theme::reset());
        out.push('\n');
    }
    out.push('\n');
}

pub fn render_loading(out: &mut String, theme: &Theme, cols: usize) {
    out.push('\n');
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&center("Loading…", cols));
    out.push_str(Theme::reset());
    out.push_str("\n\n");
}

/// Renders a fetch error in place of the rows.
pub fn render_error(out: &mut String, message: &str, theme: &Theme, cols: usize) {
    out.push('\n');
    out.push_str(&Theme::fg(&theme.colors.error_fg));
    out.push_str(&center(message, cols));
    out.push_str(Theme::reset());
    out.push_str("\n\n");
}
