/// Session Routes
///
/// Login, access token refresh, and refresh token revocation. The handlers
/// stay thin; all decisions live in the auth service.

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth;
use crate::configuration::AuthSettings;
use crate::error::AppError;
use crate::storage::Storage;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// POST /api/login
///
/// Authenticate with email and password; returns the user plus a fresh
/// access/refresh token pair. Unknown email and wrong password are
/// indistinguishable (401).
pub async fn login(
    form: web::Json<LoginRequest>,
    store: web::Data<dyn Storage>,
    auth_settings: web::Data<AuthSettings>,
) -> Result<HttpResponse, AppError> {
    let outcome = auth::login(
        store.get_ref(),
        auth_settings.get_ref(),
        &form.email,
        &form.password,
    )
    .await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        id: outcome.user.id,
        created_at: outcome.user.created_at,
        updated_at: outcome.user.updated_at,
        email: outcome.user.email,
        token: outcome.access_token,
        refresh_token: outcome.refresh_token,
    }))
}

/// POST /api/refresh
///
/// Exchange the refresh token in the Authorization header for a new access
/// token. The refresh token is not rotated.
pub async fn refresh(
    req: HttpRequest,
    store: web::Data<dyn Storage>,
    auth_settings: web::Data<AuthSettings>,
) -> Result<HttpResponse, AppError> {
    let token =
        auth::refresh_access_token(store.get_ref(), auth_settings.get_ref(), req.headers())
            .await?;

    Ok(HttpResponse::Ok().json(RefreshResponse { token }))
}

/// POST /api/revoke
///
/// Revoke the refresh token in the Authorization header.
pub async fn revoke(
    req: HttpRequest,
    store: web::Data<dyn Storage>,
) -> Result<HttpResponse, AppError> {
    auth::revoke(store.get_ref(), req.headers()).await?;

    Ok(HttpResponse::NoContent().finish())
}
