//! Shared pagination utilities
//!
//! Pages are 1-indexed. A listing over `N` items has `max(ceil(N / per_page), 1)`
//! pages, so an empty listing still has a (blank) first page. Requests for a
//! page outside that range are not errors: [`resolve_page`] tells the caller
//! which page to redirect to instead.
//!
//! # Examples
//!
//! ```rust,ignore
//! use tgd_server::features::shared::pagination::{resolve_page, PageResolution};
//!
//! match resolve_page(Some(7), 42, 10) {
//!     PageResolution::Page(page) => { /* fetch page */ }
//!     PageResolution::Redirect(page) => { /* 303 to ?page=5 */ }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Datasets shown per listing page
pub const DATASETS_PER_PAGE: i64 = 10;

/// Outcome of checking a requested page against the listing size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageResolution {
    /// The page exists and can be served
    Page(i64),
    /// The page is out of range; the client should be sent here instead
    Redirect(i64),
}

/// Number of pages for `total` items, never less than one
pub fn page_count(total: i64, per_page: i64) -> i64 {
    let per_page = per_page.max(1);
    let total = total.max(0);
    ((total + per_page - 1) / per_page).max(1)
}

/// Clamp a requested page into `1..=page_count`
pub fn resolve_page(requested: Option<i64>, total: i64, per_page: i64) -> PageResolution {
    let pages = page_count(total, per_page);
    match requested {
        None => PageResolution::Page(1),
        Some(page) if page < 1 => PageResolution::Redirect(1),
        Some(page) if page > pages => PageResolution::Redirect(pages),
        Some(page) => PageResolution::Page(page),
    }
}

/// SQL OFFSET for a 1-indexed page
pub fn offset(page: i64, per_page: i64) -> i64 {
    (page.max(1) - 1) * per_page
}

/// Pagination metadata for response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMetadata {
    /// Current page number (1-indexed)
    pub page: i64,

    /// Items per page
    pub per_page: i64,

    /// Total number of items
    pub total: i64,

    /// Total number of pages (at least 1)
    pub pages: i64,

    pub has_next: bool,

    pub has_prev: bool,
}

impl PaginationMetadata {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let pages = page_count(total, per_page);
        Self {
            page,
            per_page,
            total,
            pages,
            has_next: page < pages,
            has_prev: page > 1,
        }
    }
}

/// Wrapper for paginated list responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMetadata,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, pagination: PaginationMetadata) -> Self {
        Self { items, pagination }
    }
}
