use serde::Serialize;

/// Page size used when the client does not send `limit`.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 6;
/// Upper bound accepted for `limit`.
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// Page selection applied to repository list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Normalise raw `page`/`limit` query values.
    pub fn from_query(page: Option<usize>, limit: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: limit
                .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
                .clamp(1, MAX_ITEMS_PER_PAGE),
        }
    }

    /// Rows to skip. Saturates, so pages past the end select nothing.
    pub fn offset(&self) -> i64 {
        let skipped = (self.page.max(1) - 1).saturating_mul(self.per_page);
        i64::try_from(skipped).unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

/// One page of results as returned to API clients.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Paginated<T> {
    /// Total number of items across all pages.
    pub count: usize,
    /// Next page number, if any.
    pub next: Option<usize>,
    /// Previous page number, if any.
    pub previous: Option<usize>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(results: Vec<T>, count: usize, pagination: Pagination) -> Self {
        let total_pages = count.div_ceil(pagination.per_page.max(1));
        let next = (pagination.page < total_pages).then_some(pagination.page + 1);
        let previous = (pagination.page > 1).then_some(pagination.page - 1);
        Self {
            count,
            next,
            previous,
            results,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
