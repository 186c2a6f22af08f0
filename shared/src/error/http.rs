//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound | Self::CatalogEntryNotFound => StatusCode::NOT_FOUND,

            Self::DuplicateItem | Self::AlreadySubmitted => StatusCode::CONFLICT,

            Self::InsufficientTender => StatusCode::PAYMENT_REQUIRED,

            Self::OrderRejected
            | Self::OrderNotPayable
            | Self::InsufficientStock
            | Self::ExceedsBalance => StatusCode::UNPROCESSABLE_ENTITY,

            Self::VerificationTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::NetworkError => StatusCode::SERVICE_UNAVAILABLE,

            Self::Unknown | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(ErrorCode::InvalidQuantity.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InvalidSelection.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::DuplicateItem.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::ExceedsBalance.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::VerificationTimeout.http_status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            ErrorCode::NetworkError.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
