//! HTTP route modules
//!
//! All responses share the `{success, data?, message, errors?}` envelope;
//! listing endpoints add pagination metadata.

pub mod admin;
pub mod health;
pub mod uploads;

use serde::Serialize;

/// Standard API response structure
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable outcome message
    pub message: String,
    /// Error detail list (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    pub fn error(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
            errors: if errors.is_empty() {
                None
            } else {
                Some(errors)
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    /// Current page number (1-based)
    pub page: u32,
    /// Number of items per page
    pub limit: u32,
    /// Total number of items matching the filters
    pub total: u64,
    /// Total number of pages
    pub pages: u32,
    /// Whether there is a next page
    pub has_next: bool,
    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let pages = ((total as f64) / (limit.max(1) as f64)).ceil() as u32;

        Self {
            page,
            limit,
            total,
            pages,
            has_next: page < pages,
            has_prev: page > 1,
        }
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    /// Response items
    pub items: Vec<T>,
    /// Total items matching the filters, independent of page size
    pub total: u64,
    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T>
where
    T: Serialize,
{
    pub fn new(items: Vec<T>, page: u32, limit: u32, total: u64) -> Self {
        Self {
            items,
            total,
            pagination: PaginationMeta::new(page, limit, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success("datos", "listo");
        assert!(response.success);
        assert_eq!(response.data, Some("datos"));
        assert!(response.errors.is_none());
    }

    #[test]
    fn test_api_response_error() {
        let response = ApiResponse::error("falló", vec!["detalle".to_string()]);
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.errors.as_deref(), Some(&["detalle".to_string()][..]));
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(2, 10, 25);
        assert_eq!(meta.pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let first = PaginationMeta::new(1, 10, 5);
        assert_eq!(first.pages, 1);
        assert!(!first.has_next);
        assert!(!first.has_prev);
    }
}
