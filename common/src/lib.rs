//! Shared building blocks for the agro portal workspace.
//!
//! Holds the small value types every other crate reaches for when it
//! reports an error: where it happened and which HTTP status came back.
//!
//! ## Architecture
//!
//! - **common** (this crate): error location + status code values
//! - **portal-client**: session, query and decoding logic for the reporting portal
//! - **agro-portal**: command-line caller wiring everything together

pub mod error;
pub mod http_status;

pub use error::error_location::ErrorLocation;
pub use http_status::HttpStatusCode;

#[cfg(test)]
mod tests;
