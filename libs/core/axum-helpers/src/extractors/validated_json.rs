//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Runs the `validator` crate's `Validate` trait on the deserialized body
/// and rejects with a validation-error payload carrying per-field messages.
///
/// # Example
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateUser {
///     #[validate(length(min = 3, max = 50))]
///     username: String,
///     #[validate(email)]
///     email: String,
/// }
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUser>) { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        data.validate().map_err(|e| {
            // validator hands back a HashMap, so field order is sorted here
            // for a deterministic payload; messages keep collection order.
            let mut fields: Vec<(String, Vec<String>)> = e
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let messages = errors
                        .iter()
                        .map(|err| {
                            err.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| format!("invalid value ({})", err.code))
                        })
                        .collect();
                    (field.to_string(), messages)
                })
                .collect();
            fields.sort_by(|a, b| a.0.cmp(&b.0));

            AppError::validation(fields)
        })?;

        Ok(ValidatedJson(data))
    }
}
