//! Page maths over a known result-set size.

use crate::PageRequest;

/// Navigation state for one page of a result set of known size.
///
/// # Examples
/// ```
/// use pagination::{PageRequest, Pagination};
///
/// let request = PageRequest::new(2, 10).expect("valid request");
/// let pagination = Pagination::new(request, 25);
/// assert_eq!(pagination.pages_total(), 3);
/// assert!(pagination.has_next());
/// assert!(pagination.has_previous());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    request: PageRequest,
    items_total: u64,
}

impl Pagination {
    /// Describe `request` against a result set holding `items_total` items.
    #[must_use]
    pub const fn new(request: PageRequest, items_total: u64) -> Self {
        Self {
            request,
            items_total,
        }
    }

    /// The request this pagination was computed for.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Current one-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.request.page()
    }

    /// Page size.
    #[must_use]
    pub const fn page_items(&self) -> u32 {
        self.request.page_items()
    }

    /// Number of items in the whole result set.
    #[must_use]
    pub const fn items_total(&self) -> u64 {
        self.items_total
    }

    /// Number of pages needed to hold every item; zero for an empty set.
    #[must_use]
    pub const fn pages_total(&self) -> u64 {
        self.items_total.div_ceil(self.request.page_items() as u64)
    }

    /// Whether a page follows the current one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        (self.request.page() as u64) < self.pages_total()
    }

    /// Whether a page precedes the current one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.request.page() > 1
    }

    /// Request for the following page, if there is one.
    #[must_use]
    pub const fn next_request(&self) -> Option<PageRequest> {
        match self.request.page().checked_add(1) {
            Some(page) if self.has_next() => Some(self.request.with_page(page)),
            _ => None,
        }
    }

    /// Request for the preceding page, if there is one.
    #[must_use]
    pub const fn previous_request(&self) -> Option<PageRequest> {
        if self.has_previous() {
            Some(self.request.with_page(self.request.page() - 1))
        } else {
            None
        }
    }

    /// Lazily enumerate a request for every page of the result set.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, Pagination};
    ///
    /// let request = PageRequest::new(1, 2).expect("valid request");
    /// let pages: Vec<u32> = Pagination::new(request, 5)
    ///     .page_requests()
    ///     .map(|page| page.page())
    ///     .collect();
    /// assert_eq!(pages, vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub const fn page_requests(&self) -> PageRequests {
        let pages_total = self.pages_total();
        PageRequests {
            template: self.request,
            next: 1,
            // Page numbers are `u32`; later pages cannot be requested.
            last: if pages_total < LAST_PAGE { pages_total } else { LAST_PAGE },
        }
    }
}

/// Iterator over every page of a result set.
///
/// Returned by [`Pagination::page_requests`].
#[derive(Debug, Clone)]
pub struct PageRequests {
    template: PageRequest,
    next: u64,
    last: u64,
}

const LAST_PAGE: u64 = u32::MAX as u64;

impl Iterator for PageRequests {
    type Item = PageRequest;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.last {
            return None;
        }
        let page = u32::try_from(self.next).ok()?;
        self.next += 1;
        Some(self.template.with_page(page))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last + 1).saturating_sub(self.next);
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}
