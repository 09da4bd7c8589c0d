//! HTTP boundary: error envelopes, success envelopes and pagination
//! extraction shared by every endpoint.

pub mod envelope;
pub mod error;
pub mod page_query;

pub use self::page_query::PageQuery;
