//! TGD Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the TGD project.
//!
//! # Overview
//!
//! - **Error Handling**: [`TgdError`] and the crate [`Result`] alias
//! - **Filters**: the line filter bundle and length buckets shared by the
//!   filtered-subset queries and the statistics query
//! - **Checksums**: SHA-256 digests for session tokens
//! - **Logging**: `tracing` subscriber setup driven by [`logging::LogConfig`]
//!
//! # Example
//!
//! ```
//! use tgd_common::filter::{LengthBucket, LineFilter};
//!
//! let filter = LineFilter::default()
//!     .with_alphanumeric_only(true)
//!     .with_length(Some(LengthBucket::Short));
//!
//! assert_eq!(filter.describe(), "alphanumeric only, short length");
//! ```

pub mod checksum;
pub mod error;
pub mod filter;
pub mod logging;

// Re-export commonly used types
pub use error::{Result, TgdError};
