use async_trait::async_trait;

use crate::core::error::Result;

/// Pagination window forwarded from list endpoints to the store.
///
/// `page_size <= 0` means unpaginated; `page_number` is 1-based and clamped
/// to at least 1.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page_size: i64,
    pub page_number: i64,
}

impl Pagination {
    pub fn new(page_size: i64, page_number: i64) -> Self {
        Self {
            page_size,
            page_number: page_number.max(1),
        }
    }

    pub fn none() -> Self {
        Self::new(0, 1)
    }

    /// LIMIT/OFFSET pair for the SQL tail, or `None` when unpaginated.
    ///
    /// The offset saturates instead of overflowing; both inputs come
    /// straight from query parameters.
    pub fn limit_offset(&self) -> Option<(i64, i64)> {
        if self.page_size <= 0 {
            return None;
        }
        let offset = self
            .page_number
            .saturating_sub(1)
            .saturating_mul(self.page_size);
        Some((self.page_size, offset))
    }
}

/// Generic contract over the relational store, one impl per entity.
///
/// Filters are explicit per-entity values compiled to SQL, never
/// reflection over entity fields. Every mutating call is its own
/// autocommitted statement; there is no separate save/commit step and no
/// transaction boundary exposed to callers. Store-level failures propagate
/// as opaque errors; the store performs no retries.
#[async_trait]
pub trait EntityStore<T>: Send + Sync {
    type Filter: Send + Sync;

    /// Insert and persist immediately, returning the row with
    /// server-assigned fields filled in.
    async fn create(&self, entity: T) -> Result<T>;

    /// All rows matching the optional filter, in insertion order, then
    /// paginated. `include_related` names a related entity to eager-load
    /// (ignored by stores without relations).
    async fn get_all(
        &self,
        filter: Option<&Self::Filter>,
        page: Pagination,
        include_related: Option<&str>,
    ) -> Result<Vec<T>>;

    /// First row matching the filter; a miss is a value, not an error.
    async fn get(&self, filter: &Self::Filter, include_related: Option<&str>) -> Result<Option<T>>;

    /// Delete by identity.
    async fn remove(&self, entity: &T) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_page_size_means_unpaginated() {
        assert_eq!(Pagination::new(0, 1).limit_offset(), None);
        assert_eq!(Pagination::new(-5, 3).limit_offset(), None);
        assert_eq!(Pagination::none().limit_offset(), None);
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(Pagination::new(10, 1).limit_offset(), Some((10, 0)));
        assert_eq!(Pagination::new(10, 2).limit_offset(), Some((10, 10)));
        assert_eq!(Pagination::new(3, 4).limit_offset(), Some((3, 9)));
    }

    #[test]
    fn huge_windows_saturate_instead_of_overflowing() {
        assert_eq!(
            Pagination::new(i64::MAX, 3).limit_offset(),
            Some((i64::MAX, i64::MAX))
        );
        assert_eq!(
            Pagination::new(2, i64::MAX).limit_offset(),
            Some((2, i64::MAX))
        );
    }

    #[test]
    fn page_number_clamped_to_one() {
        assert_eq!(Pagination::new(10, 0).limit_offset(), Some((10, 0)));
        assert_eq!(Pagination::new(10, -2).limit_offset(), Some((10, 0)));
    }
}
