//! Error shared by every repository port.

use super::define_port_error;

define_port_error! {
    /// Errors raised by repository adapters.
    pub enum RepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Duplicate { message: String } => "repository rejected duplicate: {message}",
    }
}
