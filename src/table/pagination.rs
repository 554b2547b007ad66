//! Page-based and cursor-based pagination.
//!
//! The pagination mode is fixed when the table is created. Page mode tracks a
//! one-based page index clamped to the known total; cursor mode carries the
//! opaque continuation token returned by the data source plus a history of
//! previously used tokens so the caller can step back.

use serde::{Deserialize, Serialize};

/// Which pagination scheme a table uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    #[default]
    Page,
    Cursor,
}

/// Page-mode position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// One-based page index.
    pub page: usize,
    pub page_size: usize,
}

impl PageState {
    /// Number of pages for `total` rows, never less than one.
    #[must_use]
    pub const fn total_pages(&self, total: usize) -> usize {
        if self.page_size == 0 || total == 0 {
            return 1;
        }
        total.div_ceil(self.page_size)
    }

    /// Zero-based offset of the first row on the current page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_sub(1) * self.page_size
    }
}

/// Cursor-mode position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CursorState {
    /// Token used to fetch the current page (`None` for the first page).
    pub cursor: Option<String>,
    pub page_size: usize,
    /// Tokens of earlier pages, most recent last.
    pub history: Vec<Option<String>>,
    /// Token returned with the current page, used by `next`.
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode")]
pub enum Pagination {
    Page(PageState),
    Cursor(CursorState),
}

impl Pagination {
    #[must_use]
    pub fn new(mode: PaginationMode, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        match mode {
            PaginationMode::Page => Self::Page(PageState { page: 1, page_size }),
            PaginationMode::Cursor => Self::Cursor(CursorState {
                page_size,
                ..CursorState::default()
            }),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> PaginationMode {
        match self {
            Self::Page(_) => PaginationMode::Page,
            Self::Cursor(_) => PaginationMode::Cursor,
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        match self {
            Self::Page(p) => p.page_size,
            Self::Cursor(c) => c.page_size,
        }
    }

    /// Current one-based page index (page mode) or the number of pages
    /// stepped through so far (cursor mode).
    #[must_use]
    pub fn page(&self) -> usize {
        match self {
            Self::Page(p) => p.page,
            Self::Cursor(c) => c.history.len() + 1,
        }
    }

    /// Advances one page. Returns whether the position changed.
    ///
    /// In page mode the move is bounded by `total`; in cursor mode it requires
    /// a continuation token and `has_more`.
    pub fn next(&mut self, total: usize) -> bool {
        match self {
            Self::Page(p) => {
                if p.page >= p.total_pages(total) {
                    return false;
                }
                p.page += 1;
                true
            }
            Self::Cursor(c) => {
                if !c.has_more {
                    return false;
                }
                let Some(next) = c.next_cursor.take() else {
                    return false;
                };
                c.history.push(c.cursor.replace(next));
                c.has_more = false;
                true
            }
        }
    }

    /// Steps back one page. Returns whether the position changed.
    pub fn prev(&mut self) -> bool {
        match self {
            Self::Page(p) => {
                if p.page <= 1 {
                    return false;
                }
                p.page -= 1;
                true
            }
            Self::Cursor(c) => match c.history.pop() {
                Some(previous) => {
                    c.cursor = previous;
                    c.next_cursor = None;
                    c.has_more = false;
                    true
                }
                None => false,
            },
        }
    }

    /// Jumps to a one-based page, clamped to `[1, total_pages]`. No-op in
    /// cursor mode. Returns whether the position changed.
    pub fn go_to(&mut self, page: usize, total: usize) -> bool {
        match self {
            Self::Page(p) => {
                let target = page.clamp(1, p.total_pages(total));
                let changed = target != p.page;
                p.page = target;
                changed
            }
            Self::Cursor(_) => false,
        }
    }

    /// Pulls the page index back into range after the total shrank.
    pub fn clamp(&mut self, total: usize) -> bool {
        match self {
            Self::Page(p) => {
                let last = p.total_pages(total);
                if p.page > last {
                    p.page = last;
                    return true;
                }
                false
            }
            Self::Cursor(_) => false,
        }
    }

    /// Returns to the first page, forgetting cursor history.
    pub fn reset(&mut self) {
        match self {
            Self::Page(p) => p.page = 1,
            Self::Cursor(c) => {
                c.cursor = None;
                c.history.clear();
                c.next_cursor = None;
                c.has_more = false;
            }
        }
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        match self {
            Self::Page(p) => p.page_size = page_size,
            Self::Cursor(c) => c.page_size = page_size,
        }
        self.reset();
    }

    /// Stores the continuation token of a successful cursor-mode fetch.
    pub fn record_response(&mut self, next_cursor: Option<String>, has_more: Option<bool>) {
        if let Self::Cursor(c) = self {
            c.has_more = has_more.unwrap_or(next_cursor.is_some());
            c.next_cursor = next_cursor;
        }
    }

    /// Whether a previous page exists.
    #[must_use]
    pub fn has_prev(&self) -> bool {
        match self {
            Self::Page(p) => p.page > 1,
            Self::Cursor(c) => !c.history.is_empty(),
        }
    }

    /// Whether a next page exists, given the known row total (page mode).
    #[must_use]
    pub fn has_next(&self, total: usize) -> bool {
        match self {
            Self::Page(p) => p.page < p.total_pages(total),
            Self::Cursor(c) => c.has_more && c.next_cursor.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_at_least_one() {
        let state = PageState { page: 1, page_size: 10 };
        assert_eq!(state.total_pages(0), 1);
        assert_eq!(state.total_pages(10), 1);
        assert_eq!(state.total_pages(11), 2);
    }

    #[test]
    fn page_moves_are_bounded() {
        let mut pagination = Pagination::new(PaginationMode::Page, 10);
        assert!(!pagination.prev());
        assert!(pagination.next(25));
        assert!(pagination.next(25));
        assert!(!pagination.next(25));
        assert_eq!(pagination.page(), 3);

        assert!(pagination.go_to(99, 25));
        assert_eq!(pagination.page(), 3);
        assert!(pagination.go_to(0, 25));
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn clamp_follows_a_shrinking_total() {
        let mut pagination = Pagination::new(PaginationMode::Page, 10);
        pagination.go_to(4, 40);
        assert!(pagination.clamp(15));
        assert_eq!(pagination.page(), 2);
    }

    #[test]
    fn page_size_change_returns_to_first_page() {
        let mut pagination = Pagination::new(PaginationMode::Page, 10);
        pagination.go_to(3, 100);
        pagination.set_page_size(25);
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.page_size(), 25);
    }

    #[test]
    fn cursor_history_steps_back() {
        let mut pagination = Pagination::new(PaginationMode::Cursor, 2);
        assert!(!pagination.next(0));

        pagination.record_response(Some("c2".into()), Some(true));
        assert!(pagination.next(0));
        pagination.record_response(Some("c3".into()), None);
        assert!(pagination.next(0));
        pagination.record_response(None, Some(false));
        assert!(!pagination.next(0));
        assert_eq!(pagination.page(), 3);

        assert!(pagination.prev());
        let Pagination::Cursor(state) = &pagination else {
            panic!("expected cursor pagination");
        };
        assert_eq!(state.cursor.as_deref(), Some("c2"));

        assert!(pagination.prev());
        assert!(!pagination.prev());
        assert_eq!(pagination.page(), 1);
    }
}
