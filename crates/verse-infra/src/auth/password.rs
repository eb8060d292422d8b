//! Argon2 password hashing and the sign-in credential table.

use std::collections::HashMap;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use verse_core::ports::{AuthError, PasswordService};

/// Argon2-based password service.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Password hashes keyed by lowercase email.
///
/// Built at startup from configured plaintext passwords, which are hashed
/// immediately and never kept.
pub struct CredentialStore<P: PasswordService> {
    hasher: P,
    hashes: HashMap<String, String>,
}

impl<P: PasswordService> CredentialStore<P> {
    pub fn new(hasher: P) -> Self {
        Self {
            hasher,
            hashes: HashMap::new(),
        }
    }

    pub fn register(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        let hash = self.hasher.hash(password)?;
        self.hashes.insert(email.trim().to_lowercase(), hash);
        Ok(())
    }

    /// Check a sign-in attempt. Unknown emails fail the same way as wrong
    /// passwords.
    pub fn verify(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let Some(hash) = self.hashes.get(&email.trim().to_lowercase()) else {
            return Err(AuthError::InvalidCredentials);
        };

        if self.hasher.verify(password, hash)? {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}
