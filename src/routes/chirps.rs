/// Chirp Routes
///
/// Creation (authenticated, length-limited, profanity-censored), listing,
/// lookup, and owner-only deletion.

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::authenticate_request;
use crate::configuration::AuthSettings;
use crate::error::{AppError, AuthError, DatabaseError, ValidationError};
use crate::storage::{Chirp, Storage};

const MAX_CHIRP_LENGTH: usize = 140;
const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

#[derive(Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

#[derive(Serialize)]
pub struct ChirpResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

impl From<Chirp> for ChirpResponse {
    fn from(chirp: Chirp) -> Self {
        Self {
            id: chirp.id,
            created_at: chirp.created_at,
            updated_at: chirp.updated_at,
            body: chirp.body,
            user_id: chirp.user_id,
        }
    }
}

/// Replace profane words (whole, space-separated, case-insensitive) with ****.
fn censor(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if PROFANE_WORDS.iter().any(|p| word.eq_ignore_ascii_case(p)) {
                "****"
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// POST /api/chirps
pub async fn create_chirp(
    req: HttpRequest,
    form: web::Json<CreateChirpRequest>,
    store: web::Data<dyn Storage>,
    auth_settings: web::Data<AuthSettings>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticate_request(req.headers(), auth_settings.get_ref())?;

    if form.body.len() > MAX_CHIRP_LENGTH {
        return Err(ValidationError::TooLong("chirp".to_string(), MAX_CHIRP_LENGTH).into());
    }

    let cleaned_body = censor(&form.body);

    let chirp = store.create_chirp(&cleaned_body, user_id).await?;

    tracing::info!(chirp_id = %chirp.id, user_id = %user_id, "Chirp created");

    Ok(HttpResponse::Created().json(ChirpResponse::from(chirp)))
}

/// GET /api/chirps
pub async fn get_chirps(store: web::Data<dyn Storage>) -> Result<HttpResponse, AppError> {
    let chirps = store.get_chirps().await?;

    let body: Vec<ChirpResponse> = chirps.into_iter().map(ChirpResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/chirps/{chirp_id}
pub async fn get_chirp(
    path: web::Path<Uuid>,
    store: web::Data<dyn Storage>,
) -> Result<HttpResponse, AppError> {
    let chirp = store
        .get_chirp(path.into_inner())
        .await?
        .ok_or(DatabaseError::NotFound("chirp not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ChirpResponse::from(chirp)))
}

/// DELETE /api/chirps/{chirp_id}
///
/// Only the chirp's owner may delete it: a valid token for another user is
/// 403, not 401.
pub async fn delete_chirp(
    req: HttpRequest,
    path: web::Path<Uuid>,
    store: web::Data<dyn Storage>,
    auth_settings: web::Data<AuthSettings>,
) -> Result<HttpResponse, AppError> {
    let chirp = store
        .get_chirp(path.into_inner())
        .await?
        .ok_or(DatabaseError::NotFound("chirp not found".to_string()))?;

    let user_id = authenticate_request(req.headers(), auth_settings.get_ref())?;

    if user_id != chirp.user_id {
        return Err(AuthError::Forbidden.into());
    }

    store.delete_chirp(chirp.id).await?;

    tracing::info!(chirp_id = %chirp.id, user_id = %user_id, "Chirp deleted");

    Ok(HttpResponse::NoContent().finish())
}
