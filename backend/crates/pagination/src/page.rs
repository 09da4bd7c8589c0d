//! Page envelope returned by listing queries.

use serde::{Deserialize, Serialize};

use crate::{PageRequest, Pagination, PaginationError};

/// One page of items together with its navigation state.
///
/// Serialises as
/// `{ "page", "pageItems", "pagesTotal", "itemsTotal", "hasNext",
/// "hasPrevious", "items" }`.
///
/// # Examples
/// ```
/// use pagination::{Page, PageRequest, Pagination};
///
/// let request = PageRequest::new(1, 2).expect("valid request");
/// let page = Page::new(vec!["a", "b"], Pagination::new(request, 3));
/// assert!(page.pagination().has_next());
/// assert_eq!(page.items(), ["a", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PageDto<T>", into = "PageDto<T>")]
#[serde(bound(serialize = "T: Serialize + Clone", deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    items: Vec<T>,
    pagination: Pagination,
}

impl<T> Page<T> {
    /// Wrap fetched items with their pagination.
    #[must_use]
    pub const fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    /// An empty page for `request` over an empty result set.
    #[must_use]
    pub const fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), Pagination::new(request, 0))
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Navigation state of this page.
    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Transform every item while keeping the navigation state.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageDto<T> {
    page: u32,
    page_items: u32,
    pages_total: u64,
    items_total: u64,
    has_next: bool,
    has_previous: bool,
    items: Vec<T>,
}

impl<T> From<Page<T>> for PageDto<T> {
    fn from(value: Page<T>) -> Self {
        let Page { items, pagination } = value;
        Self {
            page: pagination.page(),
            page_items: pagination.page_items(),
            pages_total: pagination.pages_total(),
            items_total: pagination.items_total(),
            has_next: pagination.has_next(),
            has_previous: pagination.has_previous(),
            items,
        }
    }
}

impl<T> TryFrom<PageDto<T>> for Page<T> {
    type Error = PaginationError;

    fn try_from(value: PageDto<T>) -> Result<Self, Self::Error> {
        let request = PageRequest::new(value.page, value.page_items)?;
        Ok(Self::new(value.items, Pagination::new(request, value.items_total)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn serialises_navigation_fields() {
        let request = PageRequest::new(2, 2).expect("valid request");
        let page = Page::new(vec![3, 4], Pagination::new(request, 5));
        let value = serde_json::to_value(&page).expect("page serialises");
        assert_eq!(
            value,
            json!({
                "page": 2,
                "pageItems": 2,
                "pagesTotal": 3,
                "itemsTotal": 5,
                "hasNext": true,
                "hasPrevious": true,
                "items": [3, 4],
            })
        );
    }

    #[test]
    fn deserialise_recomputes_navigation() {
        let value = json!({
            "page": 1,
            "pageItems": 10,
            "pagesTotal": 99,
            "itemsTotal": 4,
            "hasNext": true,
            "hasPrevious": true,
            "items": ["a"],
        });
        let page: Page<String> = serde_json::from_value(value).expect("page deserialises");
        assert_eq!(page.pagination().pages_total(), 1);
        assert!(!page.pagination().has_next());
        assert!(!page.pagination().has_previous());
    }

    #[test]
    fn map_keeps_pagination() {
        let request = PageRequest::new(1, 3).expect("valid request");
        let page = Page::new(vec![1, 2, 3], Pagination::new(request, 9));
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.items(), ["1", "2", "3"]);
        assert_eq!(mapped.pagination().items_total(), 9);
    }

    #[test]
    fn empty_page_has_no_navigation() {
        let page: Page<Value> = Page::empty(PageRequest::default());
        assert!(page.items().is_empty());
        assert_eq!(page.pagination().pages_total(), 0);
    }
}
