//! Outbound adapters implementing domain ports.
//!
//! - **memory**: `tokio::sync::RwLock`-guarded tables for every repository port
//! - **snapshot**: JSON persistence for the user table, written atomically
//! - **argon**: Argon2id implementation of the password hasher port
//!
//! Adapters translate between domain types and their storage representation.
//! They contain no business rules beyond the uniqueness checks a database
//! would enforce with constraints.

pub mod argon;
pub mod memory;
pub mod snapshot;
