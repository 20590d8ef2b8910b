//! Password hashing built around Argon2id.
//!
//! Every digest uses the same parameters so stored PHC strings stay
//! verifiable across restarts and adapters.

use std::fmt;

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;

const MEMORY_COST_KIB: u32 = 19 * 1024;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

/// Errors raised while producing or parsing a digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    /// Hashing failed inside the Argon2 implementation.
    #[error("password hashing failed: {message}")]
    Hashing { message: String },
    /// A stored digest was not a valid PHC string.
    #[error("stored password digest is malformed: {message}")]
    Malformed { message: String },
}

fn hasher() -> Result<Argon2<'static>, password_hash::Error> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Argon2id PHC string for a user's password.
///
/// The debug representation never prints the digest.
///
/// # Examples
/// ```
/// use credentials_backend::domain::PasswordDigest;
///
/// let digest = PasswordDigest::hash("password").expect("hashing succeeds");
/// assert!(digest.verify("password"));
/// assert!(!digest.verify("wrong"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash `plaintext` with a fresh random salt.
    pub fn hash(plaintext: &str) -> Result<Self, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = hasher()
            .and_then(|argon2| argon2.hash_password(plaintext.as_bytes(), &salt).map(|hash| hash.to_string()))
            .map_err(|err| PasswordError::Hashing {
                message: err.to_string(),
            })?;
        Ok(Self(digest))
    }

    /// Wrap a digest loaded from storage after checking it parses.
    pub fn from_phc(phc: impl Into<String>) -> Result<Self, PasswordError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|err| PasswordError::Malformed {
            message: err.to_string(),
        })?;
        Ok(Self(phc))
    }

    /// Check `plaintext` against the digest.
    pub fn verify(&self, plaintext: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };
        hasher()
            .map(|argon2| argon2.verify_password(plaintext.as_bytes(), &parsed).is_ok())
            .unwrap_or(false)
    }

    /// PHC string for persistence.
    pub fn as_phc(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}
