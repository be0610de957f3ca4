//! Offset pagination primitives shared by listing endpoints.
//!
//! A [`PageRequest`] normalises the `page` and `limit` query parameters into
//! a validated window (1-based page, positive limit). A [`Paginated`]
//! envelope carries one page of items together with the total match count
//! and the derived page count.
//!
//! # Examples
//!
//! ```
//! use pagination::{PageRequest, Paginated};
//!
//! let request = PageRequest::new(Some(3), None, 10).expect("valid request");
//! assert_eq!(request.offset(), 20);
//!
//! let page = Paginated::new(vec!["a", "b"], 22, request.limit());
//! assert_eq!(page.total_pages, 3);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// First page number; pages are 1-based.
pub const FIRST_PAGE: u32 = 1;

/// Largest offset a window may skip, bounded by signed 64-bit SQL offsets.
pub const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

/// Errors raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Neither the caller nor the configuration supplied a positive limit.
    #[error("page limit must be greater than zero")]
    ZeroLimit,
    /// The page lies further out than any store can skip to.
    #[error("page {page} with limit {limit} is out of range")]
    OffsetOverflow {
        /// Requested page.
        page: u32,
        /// Effective limit.
        limit: u32,
    },
}

/// Validated pagination window.
///
/// ## Invariants
/// - `page >= 1`; smaller values are clamped to the first page.
/// - `limit >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a request from optional caller input.
    ///
    /// A missing page means the first page. A missing or zero limit falls
    /// back to `default_limit`.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroLimit`] when no positive limit is
    /// available, and [`PageRequestError::OffsetOverflow`] when the offset
    /// would exceed [`MAX_OFFSET`].
    pub fn new(
        page: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
    ) -> Result<Self, PageRequestError> {
        let limit = limit
            .filter(|value| *value > 0)
            .unwrap_or(default_limit);
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        let page = page.unwrap_or(FIRST_PAGE).max(FIRST_PAGE);
        let request = Self { page, limit };
        if request.offset() > MAX_OFFSET {
            return Err(PageRequestError::OffsetOverflow { page, limit });
        }
        Ok(request)
    }

    /// Request the first page with the given limit.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroLimit`] when `limit` is zero.
    pub fn first(limit: u32) -> Result<Self, PageRequestError> {
        Self::new(None, Some(limit), 0)
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items skipped before this page: `(page - 1) * limit`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - FIRST_PAGE) * u64::from(self.limit)
    }
}

/// Number of pages needed to show `total` items `limit` at a time.
///
/// A zero limit yields zero pages.
#[must_use]
pub fn total_pages(total: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(u64::from(limit))
}

/// One page of listing results.
///
/// Serialises as `{ "success", "items", "total", "totalPages" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// Whether the listing query completed.
    pub success: bool,
    /// Items on the requested page.
    pub items: Vec<T>,
    /// Count of all matching items, ignoring pagination.
    pub total: u64,
    /// `ceil(total / limit)`.
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Wrap a page of items with its totals.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, limit: u32) -> Self {
        Self {
            success: true,
            items,
            total,
            total_pages: total_pages(total, limit),
        }
    }

    /// Transform every item while keeping the totals.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            success: self.success,
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}
