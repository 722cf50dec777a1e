//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Pagination parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl Pagination {
    /// Maximum page size accepted from clients
    pub const MAX_PER_PAGE: u32 = 100;

    pub fn limit(&self) -> i64 {
        self.per_page.clamp(1, Self::MAX_PER_PAGE) as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page.max(1) as i64 - 1) * self.limit()
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: &Pagination, total_items: u64) -> Self {
        let per_page = pagination.limit() as u32;
        let total_pages = total_items.div_ceil(per_page as u64) as u32;
        Self {
            data,
            pagination: PaginationMeta {
                page: pagination.page.max(1),
                per_page,
                total_items,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_offset() {
        let p = Pagination { page: 3, per_page: 10 };
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn test_pagination_clamps() {
        let p = Pagination { page: 0, per_page: 500 };
        assert_eq!(p.limit(), 100);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: PaginatedResponse<u8> = PaginatedResponse::new(vec![], &Pagination::default(), 41);
        assert_eq!(page.pagination.total_pages, 3);
    }

    mod properties {
        use crate::types::{PaginatedResponse, Pagination};
        use proptest::prelude::*;

        proptest! {
            /// Pages tile the result set: consecutive, non-overlapping and covering every item
            #[test]
            fn prop_pages_cover_all_items(per_page in 0u32..500, total in 0u64..5_000) {
                let first = Pagination { page: 1, per_page };
                let limit = first.limit();
                prop_assert!((1..=Pagination::MAX_PER_PAGE as i64).contains(&limit));

                let meta = PaginatedResponse::<u8>::new(vec![], &first, total).pagination;
                let pages = meta.total_pages as i64;
                prop_assert!(pages * limit >= total as i64);
                prop_assert!((pages - 1).max(0) * limit < (total as i64).max(1));

                for page in 1..=meta.total_pages.min(5) {
                    let next = Pagination { page: page + 1, per_page };
                    let this = Pagination { page, per_page };
                    prop_assert_eq!(next.offset() - this.offset(), limit);
                }
            }
        }
    }
}
