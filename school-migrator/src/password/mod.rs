//! Password hash detection and generation.
//!
//! Legacy passwords are copied only when they already look like a one-way
//! hash. Anything else (absent, plain text, unknown digest) is replaced with
//! a fresh hash of the configured default password, and operators are
//! expected to force a reset after the migration.
use argon2::password_hash::{PasswordHash, SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher as _};

use crate::errors::PasswordHashError;

const BCRYPT_PREFIXES: &[&str] = &["$2a$", "$2b$", "$2y$"];
const BCRYPT_HASH_LEN: usize = 60;

/// One-way password hashing capability.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plain password into a storable string.
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError>;

    /// Whether a stored value is already a hash that can be copied as-is.
    fn is_hashed(&self, value: &str) -> bool {
        is_password_hash(value)
    }
}

/// Recognizes bcrypt hashes and Argon2 PHC strings.
pub fn is_password_hash(value: &str) -> bool {
    let value = value.trim();
    let bcrypt = value.len() == BCRYPT_HASH_LEN
        && BCRYPT_PREFIXES.iter().any(|prefix| value.starts_with(prefix));
    let argon2 = value.starts_with("$argon2") && PasswordHash::new(value).is_ok();
    bcrypt || argon2
}

/// Argon2id hasher with the crate's default parameters.
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordHashError(e.to_string()))
    }
}
