use serde::Serialize;

/// One window of a sorted listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
    pub current_page: usize,
}

impl<T> Page<T> {
    /// Cut page `page` (1-indexed) of `page_size` items out of `items`.
    ///
    /// Page 0 is read as page 1 and a zero page size as 1. A page past the
    /// end yields no items rather than an error.
    pub fn slice(items: Vec<T>, page: usize, page_size: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_pages = items.len().div_ceil(page_size);

        let start = (page - 1).saturating_mul(page_size);
        let items = items.into_iter().skip(start).take(page_size).collect();

        Self {
            items,
            total_pages,
            current_page: page,
        }
    }
}
