//! Page/limit pagination primitives shared by backend endpoints.
//!
//! Listing endpoints accept a 1-based `page` and a `limit` per page and
//! answer with a `{total, page, pages, limit}` envelope next to the page of
//! items. This crate owns the clamping rules and the envelope arithmetic so
//! handlers and store adapters agree on them.

use serde::{Deserialize, Serialize};

/// Default number of items per page when the caller does not specify one.
pub const DEFAULT_LIMIT: u32 = 20;

/// Upper bound on the number of items a single page may request.
pub const MAX_LIMIT: u32 = 100;

/// Errors raised when constructing a [`PageRequest`] from raw query values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// The page number was zero; pages are 1-based.
    #[error("page numbers start at 1")]
    ZeroPage,
    /// The limit was zero; a page must hold at least one item.
    #[error("limit must be at least 1")]
    ZeroLimit,
    /// The limit exceeded [`MAX_LIMIT`].
    #[error("limit must be at most {MAX_LIMIT}")]
    LimitTooLarge,
}

/// Validated pagination parameters for a listing query.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Validate raw page/limit values.
    pub fn try_new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        if limit > MAX_LIMIT {
            return Err(PageRequestError::LimitTooLarge);
        }
        Ok(Self { page, limit })
    }

    /// Build a request from optional query values, applying defaults.
    pub fn from_query(page: Option<u32>, limit: Option<u32>) -> Result<Self, PageRequestError> {
        Self::try_new(page.unwrap_or(1), limit.unwrap_or(DEFAULT_LIMIT))
    }

    /// 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip before this page starts.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Pagination metadata returned next to a page of items.
///
/// `pages` is the total page count: `ceil(total / limit)`, zero when the
/// result set is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Total number of matching items across all pages.
    pub total: u64,
    /// The 1-based page this envelope describes.
    pub page: u32,
    /// Total number of pages at the current limit.
    pub pages: u32,
    /// Items per page used for the query.
    pub limit: u32,
}

impl PageInfo {
    /// Compute the envelope for a request against `total` matching items.
    pub fn new(total: u64, request: PageRequest) -> Self {
        let limit = u64::from(request.limit());
        let pages = total.div_ceil(limit);
        Self {
            total,
            page: request.page(),
            // A listing can hold at most u32::MAX pages; saturate rather
            // than wrap for absurd totals.
            pages: u32::try_from(pages).unwrap_or(u32::MAX),
            limit: request.limit(),
        }
    }
}

/// One page of items together with its envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, already sorted by the query.
    pub items: Vec<T>,
    /// Envelope describing the full result set.
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// Bundle a page of items with its computed envelope.
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            info: PageInfo::new(total, request),
        }
    }

    /// Map the items while keeping the envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            info: self.info,
        }
    }
}
