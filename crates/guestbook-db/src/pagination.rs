//! Page/limit normalization for offset pagination.

/// A normalized page request together with the page count for a row total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Page number (1-indexed)
    pub page: i64,
    /// Rows per page, at least 1
    pub limit: i64,
    /// SQL OFFSET for this page
    pub offset: i64,
    pub total_pages: i64,
}

/// Normalize `page` and `limit` against `count` rows.
///
/// Negative inputs are flipped to their absolute value and anything below 1
/// becomes 1. Pages past the end are allowed and simply select nothing.
pub fn paginate(page: i64, limit: i64, count: i64) -> Page {
    let page = sanitize(page);
    let limit = sanitize(limit);
    let count = count.max(0);

    let offset = (page - 1).saturating_mul(limit);
    let total_pages = count / limit + i64::from(count % limit != 0);

    Page {
        page,
        limit,
        offset,
        total_pages,
    }
}

fn sanitize(value: i64) -> i64 {
    value.checked_abs().unwrap_or(i64::MAX).max(1)
}
