/// Shared test harness: an in-memory Storage implementation and a spawn_app
/// helper that runs the full HTTP stack on a random port, so the suite
/// exercises real requests without a Postgres instance.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use chirpy::configuration::{ApplicationSettings, AuthSettings, DatabaseSettings, Settings};
use chirpy::error::{AppError, DatabaseError};
use chirpy::startup::run;
use chirpy::storage::{
    Chirp, ChirpStore, RefreshTokenRecord, RefreshTokenStore, Storage, User, UserStore,
};

#[derive(Default)]
pub struct MemStorage {
    users: Mutex<Vec<User>>,
    chirps: Mutex<Vec<Chirp>>,
    refresh_tokens: Mutex<HashMap<String, RefreshTokenRecord>>,
}

impl MemStorage {
    /// Direct read of a stored refresh token record, for asserting on
    /// persisted state.
    pub fn refresh_record(&self, token: &str) -> Option<RefreshTokenRecord> {
        self.refresh_tokens.lock().unwrap().get(token).cloned()
    }
}

#[async_trait]
impl UserStore for MemStorage {
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email == email) {
            return Err(DatabaseError::UniqueConstraintViolation(
                "record already exists".to_string(),
            )
            .into());
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_user(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();

        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DatabaseError::NotFound("record not found".to_string()))?;

        user.email = email.to_string();
        user.hashed_password = hashed_password.to_string();
        user.updated_at = Utc::now();

        Ok(user.clone())
    }
}

#[async_trait]
impl RefreshTokenStore for MemStorage {
    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord, AppError> {
        let mut tokens = self.refresh_tokens.lock().unwrap();

        if tokens.contains_key(token) {
            return Err(DatabaseError::UniqueConstraintViolation(
                "record already exists".to_string(),
            )
            .into());
        }

        let now = Utc::now();
        let record = RefreshTokenRecord {
            token: token.to_string(),
            created_at: now,
            updated_at: now,
            user_id,
            expires_at,
            revoked_at: None,
        };
        tokens.insert(token.to_string(), record.clone());

        Ok(record)
    }

    async fn get_refresh_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, AppError> {
        let tokens = self.refresh_tokens.lock().unwrap();
        Ok(tokens.get(token).cloned())
    }

    async fn revoke_refresh_token(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let mut tokens = self.refresh_tokens.lock().unwrap();

        match tokens.get_mut(token) {
            Some(record) if record.revoked_at.is_none() => {
                record.revoked_at = Some(revoked_at);
                record.updated_at = revoked_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl ChirpStore for MemStorage {
    async fn create_chirp(&self, body: &str, user_id: Uuid) -> Result<Chirp, AppError> {
        let now = Utc::now();
        let chirp = Chirp {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            body: body.to_string(),
            user_id,
        };
        self.chirps.lock().unwrap().push(chirp.clone());

        Ok(chirp)
    }

    async fn get_chirps(&self) -> Result<Vec<Chirp>, AppError> {
        let mut chirps = self.chirps.lock().unwrap().clone();
        chirps.sort_by_key(|c| c.created_at);
        Ok(chirps)
    }

    async fn get_chirp(&self, id: Uuid) -> Result<Option<Chirp>, AppError> {
        let chirps = self.chirps.lock().unwrap();
        Ok(chirps.iter().find(|c| c.id == id).cloned())
    }

    async fn delete_chirp(&self, id: Uuid) -> Result<(), AppError> {
        self.chirps.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

pub struct TestApp {
    pub address: String,
    pub storage: Arc<MemStorage>,
}

pub fn test_settings() -> Settings {
    Settings {
        database: DatabaseSettings {
            username: "postgres".to_string(),
            password: "password".to_string(),
            port: 5432,
            host: "127.0.0.1".to_string(),
            database_name: "chirpy_test".to_string(),
        },
        application: ApplicationSettings {
            port: 0,
            platform: "dev".to_string(),
        },
        auth: AuthSettings {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            issuer: "chirpy".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 5_184_000,
        },
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_settings(test_settings()).await
}

pub async fn spawn_app_with_settings(settings: Settings) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let storage = Arc::new(MemStorage::default());
    let server_storage: Arc<dyn Storage> = storage.clone();
    let server = run(listener, server_storage, settings).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp { address, storage }
}
