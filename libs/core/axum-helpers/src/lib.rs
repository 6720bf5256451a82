//! Shared HTTP layer for the commerce APIs.
//!
//! Every resource funnels through this crate: the closed error taxonomy and
//! its single translation point, the pagination envelope, the success
//! envelope, validated body extraction, and router/server assembly.

pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod pagination;
pub mod response;
pub mod server;

pub use errors::{AppError, AppResult, ErrorCode, ErrorResponse, translate};
pub use extractors::ValidatedJson;
pub use pagination::{PageQuery, PageRequest, PageResponse, SortDirection};
pub use response::ApiResponse;
