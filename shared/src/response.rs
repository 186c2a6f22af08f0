//! API Response types
//!
//! Response envelopes returned by the workshop backend.

use serde::{Deserialize, Serialize};

/// Paginated list envelope
///
/// ```json
/// { "items": [...], "total": 42, "pages": 5, "current_page": 1, "per_page": 10 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: u64,
    /// Total number of pages
    pub pages: u32,
    /// Current page number (1-based)
    pub current_page: u32,
    /// Items per page
    pub per_page: u32,
}

impl<T> PaginatedResponse<T> {
    /// Build a page; `pages` is derived from `total` and `per_page`.
    pub fn new(items: Vec<T>, total: u64, current_page: u32, per_page: u32) -> Self {
        let pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page as u64) as u32
        };
        Self {
            items,
            total,
            pages,
            current_page,
            per_page,
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.pages
    }
}

/// Plain message body used by the backend for both success notes and errors
///
/// The backend writes `msg`; some routes use `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(alias = "message")]
    pub msg: String,
    /// Raw exception text on 5xx responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
