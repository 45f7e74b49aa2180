// ABOUTME: Pagination utilities for list endpoints
// ABOUTME: Provides standardized query parameters and response metadata

use serde::Serialize;

/// Default page size for paginated queries
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size to prevent performance issues
pub const MAX_PAGE_SIZE: i64 = 100;

/// Minimum page number (1-indexed)
pub const MIN_PAGE: i64 = 1;

/// Validated pagination parameters
#[derive(Debug, Clone)]
pub struct PaginationParams {
    page: i64,
    limit: i64,
}

impl PaginationParams {
    /// Create pagination params, normalizing out-of-range values.
    ///
    /// `page` is clamped to at least 1 and `limit` to 1..=MAX_PAGE_SIZE, so
    /// an explicit `limit=0` can never reach a query or divide a page count.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(MIN_PAGE),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Get the current page number (1-indexed)
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Get SQL LIMIT clause value
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Get SQL OFFSET clause value
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(MIN_PAGE, DEFAULT_PAGE_SIZE)
    }
}

/// Metadata about pagination state
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    /// Current page number (1-indexed)
    pub page: i64,

    /// Items per page
    pub limit: i64,

    /// Total number of items matching the filter, across all pages
    pub total: i64,

    /// Total number of pages
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl PaginationMeta {
    /// Create pagination metadata from params and the filtered total count
    pub fn new(params: &PaginationParams, total: i64) -> Self {
        let limit = params.limit();
        let total_pages = (total + limit - 1) / limit;

        Self {
            page: params.page(),
            limit,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pagination_params() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_pagination_params_validation() {
        // Negative page
        let params = PaginationParams::new(-5, 10);
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);

        // Zero page
        let params = PaginationParams::new(0, 10);
        assert_eq!(params.page(), 1);

        // Oversized limit
        let params = PaginationParams::new(1, 200);
        assert_eq!(params.limit(), MAX_PAGE_SIZE);

        // Explicit zero limit is clamped, never passed through
        let params = PaginationParams::new(1, 0);
        assert_eq!(params.limit(), 1);

        // Negative limit
        let params = PaginationParams::new(1, -5);
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_pagination_offset_calculation() {
        let params = PaginationParams::new(1, 10);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams::new(2, 10);
        assert_eq!(params.offset(), 10);

        let params = PaginationParams::new(3, 10);
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn test_pagination_meta_ceil() {
        let params = PaginationParams::new(1, 10);

        let meta = PaginationMeta::new(&params, 25);
        assert_eq!(meta.total_pages, 3);

        let meta = PaginationMeta::new(&params, 30);
        assert_eq!(meta.total_pages, 3);

        let meta = PaginationMeta::new(&params, 31);
        assert_eq!(meta.total_pages, 4);
    }

    #[test]
    fn test_pagination_meta_empty() {
        let params = PaginationParams::new(1, 10);
        let meta = PaginationMeta::new(&params, 0);

        assert_eq!(meta.total, 0);
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn test_pagination_meta_beyond_last_page() {
        // Requesting page 9 of a 2-page result keeps metadata accurate
        let params = PaginationParams::new(9, 10);
        let meta = PaginationMeta::new(&params, 15);

        assert_eq!(meta.page, 9);
        assert_eq!(meta.total, 15);
        assert_eq!(meta.total_pages, 2);
    }
}
