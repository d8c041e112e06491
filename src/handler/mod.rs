//! Request handler module
//!
//! Responsible for request routing dispatch and the config document API.

mod configs;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
