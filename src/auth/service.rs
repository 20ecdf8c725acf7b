/// Authentication service
///
/// Composes the hasher, token codec, refresh token generator, and bearer
/// extractor into the operations the HTTP layer calls: request
/// authentication, login, access token refresh, and revocation. The signing
/// secret always arrives explicitly via `AuthSettings`; there is no ambient
/// state here.

use actix_web::http::header::HeaderMap;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::bearer::bearer_token;
use crate::auth::jwt::{generate_access_token, validate_access_token};
use crate::auth::password::verify_password;
use crate::auth::refresh_token::generate_refresh_token;
use crate::configuration::AuthSettings;
use crate::error::{AppError, AuthError};
use crate::storage::{RefreshTokenStore, User, UserStore};

/// A successful login: the verified user plus a fresh credential pair.
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Authenticate an inbound request into a verified user ID.
///
/// This is the single gate for every access-token-protected endpoint.
/// Propagates `MissingAuthorization` and `InvalidToken` unchanged.
pub fn authenticate_request(
    headers: &HeaderMap,
    settings: &AuthSettings,
) -> Result<Uuid, AppError> {
    let token = bearer_token(headers)?;
    validate_access_token(&token, settings)
}

/// Verify credentials and mint a new access/refresh token pair.
///
/// An unknown email and a wrong password both fail with the same
/// `InvalidCredentials`, so login cannot be used to probe which accounts
/// exist.
pub async fn login<S>(
    storage: &S,
    settings: &AuthSettings,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, AppError>
where
    S: UserStore + RefreshTokenStore + ?Sized,
{
    let user = storage
        .get_user_by_email(email)
        .await?
        .ok_or(AppError::Auth(AuthError::InvalidCredentials))?;

    // Argon2 verification is CPU-bound; keep it off the async workers.
    let password = password.to_string();
    let hash = user.hashed_password.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))??;

    if !matches {
        return Err(AppError::Auth(AuthError::InvalidCredentials));
    }

    let access_token = generate_access_token(user.id, settings)?;
    let refresh_token = generate_refresh_token();
    let expires_at = Utc::now() + Duration::seconds(settings.refresh_token_expiry);

    storage
        .create_refresh_token(&refresh_token, user.id, expires_at)
        .await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(LoginOutcome {
        user,
        access_token,
        refresh_token,
    })
}

/// Exchange a valid refresh token for a fresh access token.
///
/// The refresh token itself is left untouched; it stays usable until revoked
/// or expired. An absent, expired, or revoked record all fail with the same
/// `InvalidRefreshToken`.
pub async fn refresh_access_token<S>(
    storage: &S,
    settings: &AuthSettings,
    headers: &HeaderMap,
) -> Result<String, AppError>
where
    S: RefreshTokenStore + ?Sized,
{
    let token = bearer_token(headers)?;

    let record = storage
        .get_refresh_token(&token)
        .await?
        .ok_or(AppError::Auth(AuthError::InvalidRefreshToken))?;

    if record.revoked_at.is_some() || record.expires_at < Utc::now() {
        tracing::warn!(user_id = %record.user_id, "Rejected revoked or expired refresh token");
        return Err(AppError::Auth(AuthError::InvalidRefreshToken));
    }

    generate_access_token(record.user_id, settings)
}

/// Revoke the refresh token presented in the Authorization header.
///
/// Fails with `InvalidRefreshToken` when no matching unrevoked record exists,
/// including when the token was already revoked.
pub async fn revoke<S>(storage: &S, headers: &HeaderMap) -> Result<(), AppError>
where
    S: RefreshTokenStore + ?Sized,
{
    let token = bearer_token(headers)?;

    let revoked = storage.revoke_refresh_token(&token, Utc::now()).await?;
    if !revoked {
        return Err(AppError::Auth(AuthError::InvalidRefreshToken));
    }

    Ok(())
}
