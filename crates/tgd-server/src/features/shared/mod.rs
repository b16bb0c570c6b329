//! Shared utilities and types for feature modules
//!
//! - **pagination**: page resolution and pagination metadata
//! - **validation**: input validation for titles, comments, credentials and images
//! - **error_helpers**: database constraint violation helpers
//! - **test_helpers**: test fixtures (test-only)

pub mod error_helpers;
pub mod pagination;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use pagination::{Paginated, PaginationMetadata, PageResolution};
