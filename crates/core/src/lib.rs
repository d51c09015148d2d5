//! Investor Dashboard Core - Domain entities, aggregation and view state.
//!
//! This crate holds everything the dashboard needs except the network. It
//! defines the data-source trait that the `client` crate implements over HTTP
//! and that tests implement in memory.

pub mod commitments;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod investors;
pub mod utils;

// Re-export common types from the domain modules
pub use commitments::*;
pub use investors::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
