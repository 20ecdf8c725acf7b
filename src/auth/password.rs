/// Password Hashing and Verification
///
/// Argon2id with the library's default cost parameters (19 MiB memory,
/// 2 iterations). Each hash carries its own algorithm tag, parameters, and
/// salt in PHC string format, so verification needs nothing besides the
/// stored hash itself.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

use crate::error::{AppError, AuthError};

/// Hash a password with Argon2id and a fresh random salt.
///
/// # Errors
/// Fails only on internal hashing failure, never because of the password's
/// content.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Auth(AuthError::Hashing(e.to_string())))
}

/// Verify a password against a stored PHC hash string.
///
/// A wrong password is `Ok(false)`, not an error; an error means the stored
/// hash is malformed or verification itself failed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Auth(AuthError::Hashing(e.to_string())))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Auth(AuthError::Hashing(e.to_string()))),
    }
}
