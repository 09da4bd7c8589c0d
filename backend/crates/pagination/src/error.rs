//! Error types raised while building pagination requests.

use thiserror::Error;

/// Reasons a [`crate::PageRequest`] cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Pages are numbered from one.
    #[error("page must be greater than zero")]
    ZeroPage,

    /// A page must hold at least one item.
    #[error("page items must be greater than zero")]
    ZeroPageItems,

    /// The requested page size exceeds the allowed maximum.
    #[error("page items must be at most {max}, got {actual}")]
    PageItemsTooLarge {
        /// Largest accepted page size.
        max: u32,
        /// Page size supplied by the caller.
        actual: u32,
    },
}
