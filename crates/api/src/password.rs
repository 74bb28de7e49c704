//! Password hashing for stored users.
//!
//! Plain passwords only exist in request bodies. What reaches the entity
//! store is an Argon2id PHC string, which embeds its own salt and parameters.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash `plain` with a fresh random salt.
pub fn hash_password(plain: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// Check `plain` against a stored PHC string.
///
/// A mismatch is `Ok(false)`; a malformed stored hash is an error.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, password_hash::Error> {
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}
