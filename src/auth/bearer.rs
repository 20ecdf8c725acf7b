/// Bearer credential extraction
///
/// Pulls the token out of the Authorization header. No shape validation
/// happens here; whatever follows "Bearer " is handed to the consumer
/// verbatim and rejected downstream if malformed.

use actix_web::http::header::{self, HeaderMap};

use crate::error::{AppError, AuthError};

/// Extract the bearer token from the Authorization header.
///
/// An absent or empty header is `MissingAuthorization`. A "Bearer " prefix is
/// stripped when present; otherwise the raw value is returned unchanged.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if value.is_empty() {
        return Err(AppError::Auth(AuthError::MissingAuthorization));
    }

    Ok(value.strip_prefix("Bearer ").unwrap_or(value).to_string())
}
