use serde::Serialize;

use super::errors::app_error::AppError;

/// Posts per page on every listing.
pub const PAGE_SIZE: i64 = 10;

/// The row range a validated page number maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub total_pages: i64,
    pub limit: i64,
    pub offset: i64,
}

impl PageWindow {
    /// Validates a 1-based `page` against `total_items`.
    ///
    /// An empty listing still has one (empty) page. Pages past the end are
    /// reported instead of being clamped to the last page.
    pub fn resolve(page: i64, total_items: i64, page_size: i64) -> Result<Self, AppError> {
        let total_pages = ((total_items.max(0) + page_size - 1) / page_size).max(1);
        if page < 1 || page > total_pages {
            return Err(AppError::InvalidPage { page, total_pages });
        }

        Ok(Self {
            page,
            total_pages,
            limit: page_size,
            offset: (page - 1) * page_size,
        })
    }

    pub fn into_page<T>(self, items: Vec<T>, total_items: i64) -> Page<T> {
        Page {
            items,
            current_page: self.page,
            total_pages: self.total_pages,
            total_items,
            has_previous: self.page > 1,
            has_next: self.page < self.total_pages,
        }
    }
}

/// One page of a reverse-chronological listing
#[derive(Debug, Serialize)]
pub struct Page<T> {
    /// Items on this page, newest first
    pub items: Vec<T>,
    /// Current page number (starts at 1)
    pub current_page: i64,
    /// Total number of pages, at least 1
    pub total_pages: i64,
    /// Total number of items across all pages
    pub total_items: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 0, 1, 0)]
    #[case(1, 10, 1, 0)]
    #[case(2, 11, 2, 10)]
    #[case(3, 25, 3, 20)]
    fn resolves_valid_pages(
        #[case] page: i64,
        #[case] total: i64,
        #[case] expected_pages: i64,
        #[case] expected_offset: i64,
    ) {
        let window = PageWindow::resolve(page, total, PAGE_SIZE).unwrap();
        assert_eq!(window.total_pages, expected_pages);
        assert_eq!(window.offset, expected_offset);
        assert_eq!(window.limit, PAGE_SIZE);
    }

    #[rstest]
    #[case(0, 5)]
    #[case(-1, 5)]
    #[case(2, 10)]
    #[case(2, 0)]
    #[case(4, 25)]
    fn rejects_out_of_range_pages(#[case] page: i64, #[case] total: i64) {
        let err = PageWindow::resolve(page, total, PAGE_SIZE).unwrap_err();
        assert!(matches!(err, AppError::InvalidPage { page: p, .. } if p == page));
    }

    #[test]
    fn navigation_flags_follow_position() {
        let first = PageWindow::resolve(1, 25, PAGE_SIZE)
            .unwrap()
            .into_page(vec![(); 10], 25);
        assert!(!first.has_previous);
        assert!(first.has_next);

        let middle = PageWindow::resolve(2, 25, PAGE_SIZE)
            .unwrap()
            .into_page(vec![(); 10], 25);
        assert!(middle.has_previous);
        assert!(middle.has_next);

        let last = PageWindow::resolve(3, 25, PAGE_SIZE)
            .unwrap()
            .into_page(vec![(); 5], 25);
        assert!(last.has_previous);
        assert!(!last.has_next);
    }
}
