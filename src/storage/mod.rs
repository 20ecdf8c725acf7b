/// Persistence layer
///
/// Models and store traits for users, chirps, and refresh tokens. The auth
/// subsystem only consumes these traits; the Postgres implementation lives
/// in `postgres.rs` and the integration tests substitute an in-memory one.

mod postgres;

pub use postgres::PgStorage;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub hashed_password: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Chirp {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

/// A stored refresh token. `token` is the primary key; the record is never
/// deleted by this subsystem, only marked revoked.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, AppError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn update_user(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, AppError>;
}

#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord, AppError>;

    async fn get_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, AppError>;

    /// Marks the matching unrevoked record as revoked. Returns false when no
    /// such record exists, including when it was already revoked.
    async fn revoke_refresh_token(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ChirpStore: Send + Sync {
    async fn create_chirp(&self, body: &str, user_id: Uuid) -> Result<Chirp, AppError>;

    /// All chirps, oldest first.
    async fn get_chirps(&self) -> Result<Vec<Chirp>, AppError>;

    async fn get_chirp(&self, id: Uuid) -> Result<Option<Chirp>, AppError>;

    async fn delete_chirp(&self, id: Uuid) -> Result<(), AppError>;
}

/// The full storage surface held by the application as `Arc<dyn Storage>`.
pub trait Storage: UserStore + RefreshTokenStore + ChirpStore {}

impl<T: UserStore + RefreshTokenStore + ChirpStore> Storage for T {}
