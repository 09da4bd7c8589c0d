//! Offset pagination primitives shared by Basket backend services.
//!
//! The crate is independent of any storage engine or transport. Storage
//! adapters translate a [`PageRequest`] into `LIMIT`/`OFFSET` (or an
//! in-memory slice), count the full result set, and wrap the fetched rows in a
//! [`Page`]. Callers then navigate with [`Pagination`].
//!
//! # Example
//!
//! ```
//! use pagination::{Page, PageRequest, Pagination};
//!
//! let rows: Vec<u32> = (1..=25).collect();
//! let request = PageRequest::new(3, 10).expect("valid request");
//! let start = usize::try_from(request.offset()).expect("offset fits");
//! let items: Vec<u32> = rows.iter().skip(start).take(10).copied().collect();
//! let page = Page::new(items, Pagination::new(request, 25));
//!
//! assert_eq!(page.items(), [21, 22, 23, 24, 25]);
//! assert!(!page.pagination().has_next());
//! assert!(page.pagination().has_previous());
//! ```

mod error;
mod page;
mod pagination;
mod request;

pub use error::PaginationError;
pub use page::Page;
pub use pagination::{PageRequests, Pagination};
pub use request::{DEFAULT_PAGE_ITEMS, FIRST_PAGE, MAX_PAGE_ITEMS, PageRequest};
