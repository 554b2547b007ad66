//! Search bar component renderer.
//!
//! Renders the global search input as a bordered box with the query text.

use crate::ui::helpers::fit;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the search input box.
///
/// # Layout
///
/// ```text
/// [margin] ┌─────────────┐
/// [margin] │ Search: ... │
/// [margin] └─────────────┘
/// ```
///
/// The box width is `cols - 2 * SEARCH_BOX_MARGIN`; the query is truncated
/// to the inner width.
pub fn render_search_bar(out: &mut String, search: &SearchBarInfo, theme: &Theme, cols: usize) {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.search_bar_border);

    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());
    out.push('\n');

    let text = if search.query.is_empty() {
        " Search: ".to_string()
    } else {
        format!(" Search: {}", search.query)
    };

    out.push_str(&margin);
    out.push_str(&border);
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&fit(&text, inner_width));
    out.push_str(&border);
    out.push('│');
    out.push_str(Theme::reset());
    out.push('\n');

    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());
    out.push('\n');
}
