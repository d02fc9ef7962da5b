//! Pagination types for ledger pages.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    25
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

/// Invalid page requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// Pages are numbered from 1.
    #[error("Page numbers start at 1")]
    ZeroPage,

    /// A page needs room for at least one item.
    #[error("Page length must be at least 1")]
    ZeroPageLength,

    /// The requested page lies past the last page.
    #[error("Page {page} is past the last page ({last})")]
    PastLastPage {
        /// Requested page.
        page: u32,
        /// Last existing page.
        last: u32,
    },
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl PageRequest {
    /// Creates a request for `page` with `per_page` items.
    #[must_use]
    pub const fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Calculates the offset of the first item on this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Returns the maximum number of items on this page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }

    /// Checks the request against a collection of `total` items.
    ///
    /// An empty collection still has one (empty) page.
    pub fn validate(&self, total: u64) -> Result<(), PageError> {
        if self.per_page == 0 {
            return Err(PageError::ZeroPageLength);
        }
        if self.page == 0 {
            return Err(PageError::ZeroPage);
        }
        let last = total_pages(total, self.per_page);
        if self.page > last {
            return Err(PageError::PastLastPage {
                page: self.page,
                last,
            });
        }
        Ok(())
    }
}

/// Number of pages needed for `total` items, never less than one.
#[must_use]
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    if total == 0 || per_page == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(per_page));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            data,
            meta: PageMeta {
                page,
                per_page,
                total,
                total_pages: total_pages(total, per_page),
            },
        }
    }

    /// Returns true if a later page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.meta.page < self.meta.total_pages
    }

    /// Returns true if an earlier page exists.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.meta.page > 1
    }
}
