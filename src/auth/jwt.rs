/// Access token signing and verification
///
/// Compact HS256-signed tokens carrying `{iss, sub, iat, exp}`. Verification
/// failures are collapsed into one opaque error: a caller can never tell a
/// bad signature from an expired or malformed token.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::auth::claims::Claims;
use crate::configuration::AuthSettings;
use crate::error::{AppError, AuthError};

/// Sign a new access token for a user.
pub fn generate_access_token(user_id: Uuid, settings: &AuthSettings) -> Result<String, AppError> {
    let claims = Claims::new(user_id, settings.access_token_expiry, settings.issuer.clone());

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Verify an access token and return its subject.
///
/// Checks the HS256 signature, the issuer, and the expiry (no leeway: the
/// token is valid only while `now <= exp`).
pub fn validate_access_token(token: &str, settings: &AuthSettings) -> Result<Uuid, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&settings.issuer]);
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("Access token rejected: {}", e);
        AppError::Auth(AuthError::InvalidToken)
    })?;

    data.claims.user_id()
}
