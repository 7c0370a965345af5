//! Page request coercion and the counted page container.

use serde::Serialize;

/// Page number used when the caller supplies none or a non-positive value.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller supplies none or a non-positive value.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// A normalised slice request: 1-based page number plus page size.
///
/// Construction goes through [`PageRequest::normalised`], which coerces
/// non-positive input into the defaults, so a `PageRequest` always describes
/// a valid slice.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::normalised(0, -5);
/// assert_eq!(request.page(), 1);
/// assert_eq!(request.page_size(), 10);
/// assert_eq!(request.offset(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    /// Build a request, coercing `page <= 0` to 1 and `page_size <= 0` to 10.
    pub fn normalised(page: i64, page_size: i64) -> Self {
        Self {
            page: if page <= 0 { DEFAULT_PAGE } else { page },
            page_size: if page_size <= 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    /// 1-based page number.
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Number of items per page.
    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Number of items to skip before this page starts.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    /// Same request re-pointed at another page, typically after clamping
    /// against the total page count.
    pub fn at_page(self, page: i64) -> Self {
        Self::normalised(page, self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::normalised(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

/// Total page count for `total` items at `page_size` per page.
///
/// Always at least 1, so an empty result still has a well-defined single
/// (empty) page to link to.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 {
        return 1;
    }
    let divisor = page_size.max(1);
    (total + divisor - 1) / divisor
}

/// Clamp a requested page into `[1, total_pages]`.
pub fn clamp_page(page: i64, total_pages: i64) -> i64 {
    page.clamp(1, total_pages.max(1))
}

/// One page of results plus the total match count across all pages.
///
/// The count and the slice are produced by two separate store operations, so
/// under concurrent writes `total` may not agree with the slice. Callers get
/// the two-step behaviour, not a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    items: Vec<T>,
    total: i64,
    page: i64,
    page_size: i64,
}

impl<T> PageResult<T> {
    /// Assemble a page from the fetched slice, the filtered total, and the
    /// (clamped) request that produced the slice.
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page(),
            page_size: request.page_size(),
        }
    }

    /// Items on this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, yielding its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Total matching items across all pages.
    pub fn total(&self) -> i64 {
        self.total
    }

    /// 1-based page number this slice belongs to.
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Page size the slice was cut with.
    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Ceiling of `total / page_size`, clamped to a minimum of 1.
    pub fn total_pages(&self) -> i64 {
        total_pages(self.total, self.page_size)
    }

    /// Whether pages beyond this one exist.
    pub fn has_more(&self) -> bool {
        self.page * self.page_size < self.total
    }

    /// Project every item, keeping the page bookkeeping.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Page metadata block of the response envelope.
///
/// `number` is zero-based to match the wire contract, while [`PageResult`]
/// counts pages from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Page size the slice was cut with.
    pub size: i64,
    /// Total matching items across all pages.
    pub total_elements: i64,
    /// Total page count, at least 1.
    pub total_pages: i64,
    /// Zero-based index of the current page.
    pub number: i64,
}

impl<T> From<&PageResult<T>> for PageMeta {
    fn from(result: &PageResult<T>) -> Self {
        Self {
            size: result.page_size(),
            total_elements: result.total(),
            total_pages: result.total_pages(),
            number: result.page() - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 1, 10)]
    #[case(-3, -1, 1, 10)]
    #[case(2, 25, 2, 25)]
    #[case(1, 0, 1, 10)]
    #[case(0, 5, 1, 5)]
    fn normalised_coerces_non_positive_input(
        #[case] page: i64,
        #[case] page_size: i64,
        #[case] expected_page: i64,
        #[case] expected_size: i64,
    ) {
        let request = PageRequest::normalised(page, page_size);
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.page_size(), expected_size);
    }

    #[rstest]
    #[case(1, 10, 0)]
    #[case(2, 10, 10)]
    #[case(4, 7, 21)]
    fn offset_skips_preceding_pages(#[case] page: i64, #[case] size: i64, #[case] expected: i64) {
        assert_eq!(PageRequest::normalised(page, size).offset(), expected);
    }

    #[rstest]
    #[case(0, 10, 1)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(15, 10, 2)]
    #[case(20, 10, 2)]
    #[case(21, 10, 3)]
    fn total_pages_rounds_up_and_clamps(
        #[case] total: i64,
        #[case] page_size: i64,
        #[case] expected: i64,
    ) {
        assert_eq!(total_pages(total, page_size), expected);
    }

    #[rstest]
    #[case(0, 3, 1)]
    #[case(1, 3, 1)]
    #[case(3, 3, 3)]
    #[case(9, 3, 3)]
    #[case(5, 0, 1)]
    fn clamp_page_stays_within_bounds(#[case] page: i64, #[case] pages: i64, #[case] expected: i64) {
        assert_eq!(clamp_page(page, pages), expected);
    }

    #[rstest]
    fn page_result_reports_remaining_pages() {
        let request = PageRequest::normalised(1, 10);
        let result = PageResult::new(vec![1, 2, 3], 15, request);

        assert_eq!(result.total_pages(), 2);
        assert!(result.has_more());

        let last = PageResult::new(vec![4, 5], 15, request.at_page(2));
        assert!(!last.has_more());
    }

    #[rstest]
    fn empty_result_still_has_one_page() {
        let result = PageResult::<i32>::new(Vec::new(), 0, PageRequest::default());
        assert_eq!(result.total_pages(), 1);
        assert!(!result.has_more());
    }

    #[rstest]
    fn map_preserves_bookkeeping() {
        let result = PageResult::new(vec![1, 2], 7, PageRequest::normalised(2, 2));
        let mapped = result.map(|n| n * 10);

        assert_eq!(mapped.items(), &[10, 20]);
        assert_eq!(mapped.total(), 7);
        assert_eq!(mapped.page(), 2);
    }

    #[rstest]
    fn meta_uses_zero_based_page_number() {
        let result = PageResult::new(vec![()], 15, PageRequest::normalised(2, 10));
        let meta = PageMeta::from(&result);

        assert_eq!(meta.size, 10);
        assert_eq!(meta.total_elements, 15);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(meta.number, 1);
    }
}
