//! Error type shared by the relation store ports.
//!
//! Every collection lives in the same store, so the repository ports share
//! one failure vocabulary instead of each declaring an identical enum.

use super::define_port_error;

define_port_error! {
    /// Errors raised by relation store adapters.
    pub enum StoreError {
        /// The store could not be reached or the pool was exhausted.
        Connection { message: String } =>
            "relation store connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } =>
            "relation store query failed: {message}",
        /// An insert collided with an existing key.
        DuplicateKey { message: String } =>
            "relation store key already exists: {message}",
    }
}
