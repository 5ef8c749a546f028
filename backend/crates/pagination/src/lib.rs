//! Offset pagination primitives shared by every transport adapter.
//!
//! A [`PageRequest`] names a zero-based page index and a page size. A
//! [`Page`] carries one window of results together with metadata describing
//! the whole result set. Adapters render the page with the field names
//! `current_page`, `pages`, `items_per_page`, `total_items` and `data`.
//!
//! ## Invariants
//! - `current_page * items_per_page` items precede the first element of
//!   `data`.
//! - `total_items` counts every matching row, independent of the page size.
//! - `pages == ceil(total_items / items_per_page)`, and `pages == 0` when
//!   `total_items == 0`.

use serde::{Deserialize, Serialize};

/// Page size used when a caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size accepted by [`PageRequest::new`].
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// The page size was zero.
    #[error("page size must be greater than zero")]
    ZeroSize,
    /// The page size exceeded [`MAX_PAGE_SIZE`].
    #[error("page size must not exceed {max}, got {size}")]
    SizeTooLarge {
        /// Requested size.
        size: u32,
        /// Upper bound.
        max: u32,
    },
}

/// Zero-based page index plus page size.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(2, 25).expect("valid request");
/// assert_eq!(request.offset(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Validate and build a page request.
    pub fn new(page: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        if size > MAX_PAGE_SIZE {
            return Err(PageRequestError::SizeTooLarge {
                size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self { page, size })
    }

    /// Zero-based page index.
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of items preceding this page.
    pub const fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One window of a paginated result set.
///
/// The zero value (`Page::default()`) reports no pages, no items and an
/// empty `data` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Zero-based index of this page.
    #[serde(default)]
    pub current_page: u32,
    /// Total number of pages.
    #[serde(default, rename = "pages")]
    pub pages: u32,
    /// Requested page size.
    #[serde(default)]
    pub items_per_page: u32,
    /// Count of all matching items.
    #[serde(default)]
    pub total_items: u64,
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            current_page: 0,
            pages: 0,
            items_per_page: 0,
            total_items: 0,
            data: Vec::new(),
        }
    }
}

impl<T> Page<T> {
    /// Assemble a page from the window contents and the total match count.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageRequest};
    ///
    /// let page = Page::new(vec!["a", "b"], PageRequest::default(), 2);
    /// assert_eq!(page.pages, 1);
    /// assert_eq!(page.items_per_page, 10);
    /// ```
    pub fn new(data: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            current_page: request.page(),
            pages: page_count(total_items, request.size()),
            items_per_page: request.size(),
            total_items,
            data,
        }
    }

    /// Transform every item while keeping the metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            current_page: self.current_page,
            pages: self.pages,
            items_per_page: self.items_per_page,
            total_items: self.total_items,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}

/// Number of pages needed to hold `total_items` items of `size` each.
pub fn page_count(total_items: u64, size: u32) -> u32 {
    if size == 0 {
        return 0;
    }
    u32::try_from(total_items.div_ceil(u64::from(size))).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(4, 3, 2)]
    fn page_count_rounds_up(#[case] total: u64, #[case] size: u32, #[case] expected: u32) {
        assert_eq!(page_count(total, size), expected);
    }

    #[rstest]
    fn zero_size_is_rejected() {
        assert_eq!(PageRequest::new(0, 0), Err(PageRequestError::ZeroSize));
    }

    #[rstest]
    fn oversized_request_is_rejected() {
        let err = PageRequest::new(0, MAX_PAGE_SIZE + 1).expect_err("too large");
        assert!(err.to_string().contains("must not exceed"));
    }

    #[rstest]
    fn default_request_is_first_page_of_ten() {
        let request = PageRequest::default();
        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), DEFAULT_PAGE_SIZE);
        assert_eq!(request.offset(), 0);
    }

    #[rstest]
    fn page_serialises_with_envelope_field_names() {
        let page = Page::new(vec![1, 2, 3, 4], PageRequest::default(), 4);
        let value = serde_json::to_value(&page).expect("serialise page");
        assert_eq!(
            value,
            json!({
                "current_page": 0,
                "pages": 1,
                "items_per_page": 10,
                "total_items": 4,
                "data": [1, 2, 3, 4]
            })
        );
    }

    #[rstest]
    fn missing_fields_fall_back_to_zero_defaults() {
        let page: Page<Value> = serde_json::from_value(json!({})).expect("deserialise");
        assert_eq!(page, Page::default());
    }

    #[rstest]
    fn page_envelope_survives_json_round_trip() {
        let page = Page::new(vec!["x".to_owned()], PageRequest::new(3, 1).expect("req"), 7);
        let text = serde_json::to_string(&page).expect("serialise");
        let back: Page<String> = serde_json::from_str(&text).expect("deserialise");
        assert_eq!(back, page);
        assert_eq!(back.pages, 7);
    }

    #[rstest]
    fn map_preserves_metadata() {
        let page = Page::new(vec![1, 2], PageRequest::new(1, 2).expect("req"), 5);
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.data, vec![10, 20]);
        assert_eq!(mapped.current_page, 1);
        assert_eq!(mapped.pages, 3);
        assert_eq!(mapped.total_items, 5);
    }
}
