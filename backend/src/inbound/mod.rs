//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! Only the HTTP boundary contract lives under [`http`]: envelope rendering,
//! error mapping and pagination extraction.

pub mod http;
