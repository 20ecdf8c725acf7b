/// User Routes
///
/// Handles user creation and authenticated profile updates. Passwords are
/// hashed on the blocking pool and never leave this layer in plaintext; the
/// stored hash is never serialized into a response.

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{authenticate_request, hash_password};
use crate::configuration::AuthSettings;
use crate::error::AppError;
use crate::storage::{Storage, User};

#[derive(Deserialize)]
pub struct UserCredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user; excludes the password hash.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            email: user.email,
        }
    }
}

async fn hash_on_blocking_pool(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
}

/// POST /api/users
///
/// Create a user from email and password. A duplicate email surfaces the
/// store's unique-constraint error as 409.
pub async fn create_user(
    form: web::Json<UserCredentialsRequest>,
    store: web::Data<dyn Storage>,
) -> Result<HttpResponse, AppError> {
    let hashed_password = hash_on_blocking_pool(form.password.clone()).await?;

    let user = store.create_user(&form.email, &hashed_password).await?;

    tracing::info!(user_id = %user.id, "User created");

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// PUT /api/users
///
/// Update the authenticated user's email and password.
pub async fn update_user(
    req: HttpRequest,
    form: web::Json<UserCredentialsRequest>,
    store: web::Data<dyn Storage>,
    auth_settings: web::Data<AuthSettings>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticate_request(req.headers(), auth_settings.get_ref())?;

    let hashed_password = hash_on_blocking_pool(form.password.clone()).await?;

    let user = store
        .update_user(user_id, &form.email, &hashed_password)
        .await?;

    tracing::info!(user_id = %user.id, "User updated");

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
