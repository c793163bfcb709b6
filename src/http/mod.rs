//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from
//! request routing: status-code builders, MIME detection, and the fixed
//! security header set.

pub mod headers;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_500_response, build_file_response,
    build_html_response, build_options_response, build_redirect_response,
};
