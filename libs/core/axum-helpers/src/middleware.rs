//! Request-scoped middleware.

use crate::errors::{AppError, translate};
use axum::{
    Json,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Fill the `path` slot of error payloads from the request URI.
///
/// The error translator is path-agnostic; `AppError::into_response` stashes
/// the failure in the response extensions, and this layer re-renders the
/// body with the path the caller actually hit.
pub async fn propagate_request_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    if let Some(failure) = response.extensions_mut().remove::<AppError>() {
        let status = response.status();
        return (status, Json(translate(&failure, Some(&path)))).into_response();
    }

    response
}
