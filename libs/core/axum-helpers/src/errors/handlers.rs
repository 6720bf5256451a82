//! Fallback handlers shared by all routers.

use super::{AppError, ErrorCode};

/// 404 fallback for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::new(
        ErrorCode::ResourceNotFound,
        ErrorCode::ResourceNotFound.default_message(),
    )
}
