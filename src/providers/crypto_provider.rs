use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

use crate::errors::InternalError;

/// Password hashing keyed with the server-side pepper
pub struct CryptoProvider {
    password_pepper: String,
}

impl CryptoProvider {
    pub fn new(password_pepper: String) -> Self {
        Self { password_pepper }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash a password with a fresh random salt
    pub fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);

        self.argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| InternalError::crypto("hash_password", e.to_string()))
    }

    pub fn verify_password(&self, password_hash: &str, password: &str) -> Result<bool, InternalError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| InternalError::crypto("parse_password_hash", e.to_string()))?;

        Ok(self.argon2()?.verify_password(password.as_bytes(), &parsed).is_ok())
    }
}

impl std::fmt::Debug for CryptoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoProvider")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_argon2id_and_verifies() {
        let crypto = CryptoProvider::new("test-pepper-for-unit-tests".to_string());

        let hash = crypto.hash_password("secret").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(crypto.verify_password(&hash, "secret").unwrap());
        assert!(!crypto.verify_password(&hash, "other").unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let crypto = CryptoProvider::new("test-pepper-for-unit-tests".to_string());

        let first = crypto.hash_password("secret").unwrap();
        let second = crypto.hash_password("secret").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_pepper_is_part_of_the_hash() {
        let crypto = CryptoProvider::new("test-pepper-for-unit-tests".to_string());
        let other = CryptoProvider::new("another-pepper-value-1234".to_string());

        let hash = crypto.hash_password("secret").unwrap();

        assert!(!other.verify_password(&hash, "secret").unwrap());
    }

    #[test]
    fn test_debug_redacts_pepper() {
        let crypto = CryptoProvider::new("test-pepper-for-unit-tests".to_string());

        assert!(!format!("{:?}", crypto).contains("test-pepper"));
    }
}
