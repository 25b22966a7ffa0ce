// Password hashing and verification service

use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::auth::error::AuthError;

/// One-way salted password hashing
pub trait PasswordService: Send + Sync {
    /// Hash a password into a self-describing PHC string
    fn hash_password(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash in constant time
    ///
    /// `Ok(false)` means the password does not match; `Err` means the stored
    /// hash itself is unusable.
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Argon2id with a fresh random salt per hash
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordService;

impl PasswordService for Argon2PasswordService {
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                AuthError::HashingFailed
            })
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            error!(error = %e, "argon2 parse hash error");
            AuthError::HashingFailed
        })?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => {
                error!(error = %e, "argon2 verify_password error");
                Err(AuthError::HashingFailed)
            }
        }
    }
}
