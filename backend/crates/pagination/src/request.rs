//! Validated page request parameters.

use serde::{Deserialize, Serialize};

use crate::PaginationError;

/// First page number.
pub const FIRST_PAGE: u32 = 1;
/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_ITEMS: u32 = 100;
/// Largest page size a caller may request.
pub const MAX_PAGE_ITEMS: u32 = 100;

/// A validated request for one page of a result set.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= page_items <= MAX_PAGE_ITEMS`
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 20).expect("valid request");
/// assert_eq!(request.offset(), 40);
/// assert_eq!(request.limit(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest", into = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    page_items: u32,
}

impl PageRequest {
    /// Validate and build a page request.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when `page` is zero or `page_items` is
    /// outside `1..=MAX_PAGE_ITEMS`.
    pub const fn new(page: u32, page_items: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        if page_items == 0 {
            return Err(PaginationError::ZeroPageItems);
        }
        if page_items > MAX_PAGE_ITEMS {
            return Err(PaginationError::PageItemsTooLarge {
                max: MAX_PAGE_ITEMS,
                actual: page_items,
            });
        }
        Ok(Self { page, page_items })
    }

    /// Request the first page with the given page size.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when `page_items` is out of range.
    pub const fn first(page_items: u32) -> Result<Self, PaginationError> {
        Self::new(FIRST_PAGE, page_items)
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn page_items(&self) -> u32 {
        self.page_items
    }

    /// Number of items preceding this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_items as u64
    }

    /// Alias for [`Self::page_items`] for storage adapters speaking in
    /// `LIMIT`/`OFFSET` terms.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.page_items
    }

    /// The same page size pointing at another page.
    #[must_use]
    pub(crate) const fn with_page(self, page: u32) -> Self {
        Self {
            page,
            page_items: self.page_items,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: FIRST_PAGE,
            page_items: DEFAULT_PAGE_ITEMS,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawPageRequest {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_page_items")]
    page_items: u32,
}

const fn default_page() -> u32 {
    FIRST_PAGE
}

const fn default_page_items() -> u32 {
    DEFAULT_PAGE_ITEMS
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PaginationError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(value.page, value.page_items)
    }
}

impl From<PageRequest> for RawPageRequest {
    fn from(value: PageRequest) -> Self {
        Self {
            page: value.page,
            page_items: value.page_items,
        }
    }
}
