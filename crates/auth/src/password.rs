use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

use crate::error::{AuthError, Result};

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::HashingError(e.to_string()))
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_e| AuthError::VerificationError)?;

    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// [`hash_password`] on the blocking pool, keeping Argon2 off the async workers
#[tracing::instrument(name = "Computing password hash", skip_all)]
pub async fn compute_password_hash(password: String) -> Result<String> {
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || span.in_scope(|| hash_password(&password)))
        .await
        .map_err(|e| AuthError::HashingError(e.to_string()))?
}

/// [`verify_password`] on the blocking pool
#[tracing::instrument(name = "Verifying password hash", skip_all)]
pub async fn verify_password_hash(password: String, hash: String) -> Result<bool> {
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || span.in_scope(|| verify_password(&password, &hash)))
        .await
        .map_err(|e| AuthError::HashingError(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "my_secure_password";
        let hash = hash_password(password).unwrap();

        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_different_hashes() {
        let password = "same_password";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();

        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);

        assert!(verify_password(password, &hash1).unwrap());
        assert!(verify_password(password, &hash2).unwrap());
    }

    #[test]
    fn test_garbage_digest_is_an_error() {
        let result = verify_password("1111", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::VerificationError)));
    }

    #[tokio::test]
    async fn test_blocking_pool_variants() {
        let hash = compute_password_hash("1111".to_string()).await.unwrap();

        assert!(verify_password_hash("1111".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password_hash("2222".to_string(), hash).await.unwrap());
    }
}
