//! HTTP protocol layer module
//!
//! Response builders shared by the request handlers, decoupled from routing
//! and storage.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_201_response, build_400_response, build_404_response, build_405_response,
    build_500_response, build_config_head_response, build_config_response,
    build_health_response, build_json_response,
};
