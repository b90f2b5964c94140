//! Offset-based pagination over id-ordered listings.

use serde::{Deserialize, Serialize};

/// A page request as it arrives from the API layer.
///
/// `page` is 1-based; `items_per_page` is bounded to 1..=100 by the API
/// layer before this type is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationRequest {
    pub page: i64,
    pub items_per_page: i64,
}

impl PaginationRequest {
    pub fn new(page: i64, items_per_page: i64) -> Self {
        Self {
            page,
            items_per_page,
        }
    }

    /// Number of rows to skip for this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.items_per_page
    }
}

/// Page metadata returned alongside a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse {
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub items_per_page: i64,
}

impl PaginationResponse {
    /// Builds the metadata for a request against a known total.
    ///
    /// An empty listing has zero pages, not one.
    pub fn for_request(total_items: i64, request: &PaginationRequest) -> Self {
        let total_pages = (total_items + request.items_per_page - 1) / request.items_per_page;
        Self {
            total_items,
            total_pages,
            current_page: request.page,
            items_per_page: request.items_per_page,
        }
    }
}
