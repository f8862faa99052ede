use std::fmt;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{error, warn};

/// Salted Argon2 digest of a user's password.
///
/// The digest is only readable from the users storage code; everyone else
/// can set it from a plaintext and verify a candidate against it.
#[derive(Clone)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn set(plain: &str) -> anyhow::Result<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                anyhow::anyhow!(e.to_string())
            })?
            .to_string();
        Ok(Self(hash))
    }

    /// A digest that fails to parse never matches.
    pub fn verify(&self, plain: &str) -> bool {
        let parsed = match PasswordHash::new(&self.0) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "stored password digest is malformed");
                return false;
            }
        };
        Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }

    pub(super) fn from_stored(phc: String) -> Self {
        Self(phc)
    }

    pub(super) fn as_stored(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}
