//! Pagination of post listings.

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page
    pub items: &'a [T],

    /// 1-based page number after clamping
    pub number: usize,

    /// Total number of pages (at least 1)
    pub total_pages: usize,

    /// Total number of items across all pages
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slice out page `page` of `items`.
///
/// Out of range page numbers are clamped into `1..=total_pages`.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size).max(1);
    let number = page.clamp(1, total_pages);

    let start = ((number - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Page {
        items: &items[start..end],
        number,
        total_pages,
        total_items: items.len(),
    }
}
