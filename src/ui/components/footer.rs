//! Footer component renderer: pagination, page sizes, selection and bulk
//! actions.

use crate::ui::helpers::fit;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, PaginationView};

/// Renders the footer line.
///
/// # Layout
///
/// ```text
///  ‹ Page 2 of 5 (48 rows) ›   Rows per page: 10 [25] 50   3 selected: [Delete]
/// ```
///
/// Arrows are dimmed when there is no page in that direction. The line is
/// truncated to the terminal width.
pub fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    let (has_prev, has_next, page_size) = match footer.pagination {
        PaginationView::Page {
            has_prev,
            has_next,
            page_size,
            ..
        }
        | PaginationView::Cursor {
            has_prev,
            has_next,
            page_size,
            ..
        } => (has_prev, has_next, page_size),
    };

    let mut parts = vec![format!(
        "{} {} {}",
        if has_prev { "‹" } else { " " },
        footer.pagination.summary(),
        if has_next { "›" } else { " " }
    )];

    if footer.page_size_options.len() > 1 {
        let sizes: Vec<String> = footer
            .page_size_options
            .iter()
            .map(|size| {
                if *size == page_size {
                    format!("[{size}]")
                } else {
                    size.to_string()
                }
            })
            .collect();
        parts.push(format!("Rows per page: {}", sizes.join(" ")));
    }

    if let Some(selection) = footer.selection.filter(|s| s.selected > 0) {
        let actions: Vec<String> = footer.bulk_actions.iter().map(|a| format!("[{}]", a.label)).collect();
        if actions.is_empty() {
            parts.push(format!("{} selected", selection.selected));
        } else {
            parts.push(format!("{} selected: {}", selection.selected, actions.join(" ")));
        }
    }

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&fit(&format!(" {}", parts.join("   ")), cols));
    out.push_str(Theme::reset());
    out.push('\n');
}
