//! Basket backend core.
//!
//! Shared shopping lists for groups of users, organised as a hexagon:
//!
//! - [`domain`]: validation, value objects, records, ports and services.
//! - [`inbound`]: the HTTP boundary contract (envelope rendering, error
//!   mapping, pagination query parsing).
//! - [`outbound`]: in-memory repositories, the user snapshot store and the
//!   Argon2 password hasher.
//! - [`cleanup`]: settings and orchestration for the expired-account run.

pub mod cleanup;
pub mod domain;
pub mod inbound;
pub mod outbound;
