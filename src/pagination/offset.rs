//! Page-number pagination over a counted collection

/// Slice bounds for one numbered page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetPage {
    /// 1-based page number, never less than 1
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    /// Always at least 1, even for an empty collection
    pub total_pages: usize,
}

impl OffsetPage {
    /// Compute the page for `page_number`
    ///
    /// Page numbers below 1 become 1; a zero page size is treated as one.
    /// Pages past the end are not clamped and simply select nothing.
    pub fn new(total_count: usize, page_number: i64, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let page = usize::try_from(page_number.max(1)).unwrap_or(usize::MAX);

        Self {
            page,
            page_size,
            total_count,
            total_pages: total_count.div_ceil(page_size).max(1),
        }
    }

    /// Number of items before this page
    pub fn skip(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Maximum number of items on this page
    pub fn take(&self) -> usize {
        self.page_size
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Select this page's items from an already ordered sequence
    pub fn slice<T, I>(&self, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        items.into_iter().skip(self.skip()).take(self.take()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection_has_one_page() {
        let page = OffsetPage::new(0, 1, 6);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.skip(), 0);
        assert_eq!(page.take(), 6);
        assert!(!page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(OffsetPage::new(13, 1, 6).total_pages, 3);
        assert_eq!(OffsetPage::new(12, 1, 6).total_pages, 2);
        assert_eq!(OffsetPage::new(1, 1, 6).total_pages, 1);
    }

    #[test]
    fn test_skip_and_take() {
        let page = OffsetPage::new(13, 3, 6);
        assert_eq!(page.skip(), 12);
        assert_eq!(page.take(), 6);
        assert_eq!(page.slice(0..13), vec![12]);
        assert!(page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = OffsetPage::new(13, 4, 6);
        assert_eq!(page.page, 4);
        assert_eq!(page.skip(), 18);
        assert!(page.slice(0..13).is_empty());
    }

    #[test]
    fn test_page_number_clamped_to_one() {
        assert_eq!(OffsetPage::new(13, 0, 6).page, 1);
        assert_eq!(OffsetPage::new(13, -5, 6).skip(), 0);
    }

    #[test]
    fn test_zero_page_size() {
        let page = OffsetPage::new(3, 2, 0);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.slice(["a", "b", "c"]), vec!["b"]);
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let page = OffsetPage::new(5, i64::MAX, 6);
        assert!(page.slice(0..5).is_empty());
    }
}
