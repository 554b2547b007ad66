//! Shared rendering utilities and helpers.
//!
//! Low-level text utilities used across the UI components: width-aware
//! truncation and padding, and search match highlighting with proper ANSI
//! escape sequence management.
//!
//! All widths are measured in characters, not bytes, so multi-byte text lines
//! up in the table grid.
//!
//! # Example
//!
//! ```rust
//! use datagrid::ui::helpers::{fit, write_highlighted};
//! use datagrid::ui::Theme;
//!
//! let theme = Theme::default();
//! let mut out = String::new();
//! write_highlighted(&mut out, "my-project", &[(0, 2)], &theme, false);
//! assert!(out.contains("project"));
//!
//! assert_eq!(fit("abcdef", 4), "abc…");
//! assert_eq!(fit("ab", 4), "ab  ");
//! ```

use crate::ui::theme::Theme;

/// Number of characters in `text`.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Truncates `text` to at most `max` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

/// Truncates or right-pads `text` to exactly `max` characters.
#[must_use]
pub fn fit(text: &str, max: usize) -> String {
    let mut fitted = truncate(text, max);
    let len = width(&fitted);
    fitted.push_str(&" ".repeat(max.saturating_sub(len)));
    fitted
}

/// Centers `text` within `cols` characters.
#[must_use]
pub fn center(text: &str, cols: usize) -> String {
    let text = truncate(text, cols);
    let len = width(&text);
    let left = cols.saturating_sub(len) / 2;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(cols.saturating_sub(left + len)))
}

/// Writes text with highlighted character ranges for search matches.
///
/// Highlighted sections use match highlight colors unless the row is
/// selected, in which case the selection colors take precedence and no
/// highlighting is applied.
///
/// # Parameters
///
/// * `out` - Frame buffer to append to
/// * `text` - The text to write
/// * `ranges` - Character index ranges `(start, end)`, exclusive end
/// * `theme` - Active color theme
/// * `is_selected` - Whether the row is selected
///
/// # Character Indices
///
/// Ranges use character indices, not byte indices. Ranges past the end of
/// the text are clipped.
pub fn write_highlighted(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);

        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        out.extend(&chars[current_pos..]);
    }
}
