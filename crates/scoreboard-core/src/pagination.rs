//! Pagination over ordered key sets.
//!
//! Both stores keep their keys in a sorted map, so a page is a skip/take
//! over the keys walked forwards or backwards. Raw caller input is clamped
//! into a [`PageWindow`] first and the window, not the raw input, is echoed
//! back in the [`Page`].

use serde::Serialize;

/// Limit applied when the caller does not supply one.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Direction of a listing over the natural key ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Smallest key first.
    #[default]
    Asc,
    /// Largest key first.
    Desc,
}

impl SortOrder {
    /// Parses a caller-supplied order. Only a case-insensitive `"DESC"`
    /// selects descending; anything else falls back to ascending.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("DESC") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// An effective, clamped pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Keys to skip, never negative.
    pub skip: usize,
    /// Keys to return, in `[1, max_limit]`.
    pub limit: usize,
    /// Listing direction.
    pub order: SortOrder,
}

impl PageWindow {
    /// Clamps raw caller input into a window: `skip` is raised to zero and
    /// `limit` is forced into `[1, max_limit]`.
    #[must_use]
    pub fn clamped(skip: i64, limit: i64, order: SortOrder, max_limit: usize) -> Self {
        let max_limit = max_limit.max(1);
        let skip = usize::try_from(skip.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(1)).map_or(max_limit, |l| l.min(max_limit));
        Self { skip, limit, order }
    }

    /// Applies the window to keys that are already in ascending order.
    pub fn apply<I, K>(&self, ascending: I) -> Vec<K>
    where
        I: DoubleEndedIterator<Item = K>,
    {
        match self.order {
            SortOrder::Asc => ascending.skip(self.skip).take(self.limit).collect(),
            SortOrder::Desc => ascending.rev().skip(self.skip).take(self.limit).collect(),
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Size of the whole key set, independent of the window.
    pub total: usize,
    /// Effective skip.
    pub skip: usize,
    /// Effective limit.
    pub limit: usize,
    /// Keys inside the window.
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Builds a page that echoes the effective window.
    #[must_use]
    pub fn new(total: usize, window: PageWindow, items: Vec<T>) -> Self {
        Self {
            total,
            skip: window.skip,
            limit: window.limit,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_parse_is_lenient() {
        assert_eq!(SortOrder::parse("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("ASC"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("bogus"), SortOrder::Asc);
        assert_eq!(SortOrder::parse(""), SortOrder::Asc);
    }

    #[test]
    fn test_clamped_raises_negative_skip_and_caps_limit() {
        let window = PageWindow::clamped(-5, 1000, SortOrder::parse("bogus"), 100);

        assert_eq!(
            window,
            PageWindow {
                skip: 0,
                limit: 100,
                order: SortOrder::Asc
            }
        );
    }

    #[test]
    fn test_clamped_raises_limit_below_one() {
        assert_eq!(PageWindow::clamped(0, 0, SortOrder::Asc, 50).limit, 1);
        assert_eq!(PageWindow::clamped(0, -20, SortOrder::Asc, 50).limit, 1);
    }

    #[test]
    fn test_apply_walks_forwards_and_backwards() {
        let keys = [1, 2, 3, 4, 5];

        let asc = PageWindow::clamped(1, 2, SortOrder::Asc, 50).apply(keys.iter().copied());
        let desc = PageWindow::clamped(1, 2, SortOrder::Desc, 50).apply(keys.iter().copied());

        assert_eq!(asc, vec![2, 3]);
        assert_eq!(desc, vec![4, 3]);
    }

    #[test]
    fn test_apply_past_the_end_is_empty() {
        let keys = ["a", "b"];

        let items = PageWindow::clamped(10, 5, SortOrder::Asc, 50).apply(keys.iter());

        assert!(items.is_empty());
    }

    #[test]
    fn test_page_echoes_effective_window() {
        let window = PageWindow::clamped(-1, 500, SortOrder::Desc, 50);

        let page = Page::new(3, window, vec![3, 2, 1]);

        assert_eq!(page.total, 3);
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 50);
    }
}
