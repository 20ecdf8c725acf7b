/// Refresh token generation
///
/// Opaque bearer tokens: 32 bytes from the OS CSPRNG, hex-encoded. Uniqueness
/// rests on the randomness source; the store's primary-key constraint is the
/// backstop for the negligible collision case.

use rand::rngs::OsRng;
use rand::RngCore;

/// Generate a new refresh token: 64 lowercase hex characters.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_refresh_token() {
        let token = generate_refresh_token();

        assert_eq!(token.len(), 64);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_consecutive_tokens_differ() {
        assert_ne!(generate_refresh_token(), generate_refresh_token());
    }
}
