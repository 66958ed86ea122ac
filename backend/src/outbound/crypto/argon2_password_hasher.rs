//! Argon2id-backed `PasswordHasher` adapter.
//!
//! Digests are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`) so the
//! parameters travel with each stored value and verification keeps working
//! after the defaults change.

use std::fmt;

use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Salt, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::debug;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordDigest};

/// Invalid Argon2 cost parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid Argon2 parameters: {message}")]
pub struct Argon2SettingsError {
    message: String,
}

/// Argon2id password hasher with a random per-password salt.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
    decoy: PasswordDigest,
}

impl fmt::Debug for Argon2PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2PasswordHasher")
            .field("params", self.argon2.params())
            .finish()
    }
}

impl Argon2PasswordHasher {
    /// ~19 MiB and 2 passes, the OWASP baseline for Argon2id.
    const DEFAULT_MEMORY_KIB: u32 = 19 * 1024;
    const DEFAULT_ITERATIONS: u32 = 2;
    const DEFAULT_PARALLELISM: u32 = 1;
    const SALT_LENGTH: usize = Salt::RECOMMENDED_LENGTH;
    const DECOY_PASSWORD: &'static [u8] = b"tenant-access decoy password";

    /// Build a hasher with the default cost parameters.
    pub fn new() -> Result<Self, Argon2SettingsError> {
        Self::with_costs(
            Self::DEFAULT_MEMORY_KIB,
            Self::DEFAULT_ITERATIONS,
            Self::DEFAULT_PARALLELISM,
        )
    }

    /// Build a hasher with caller-specified costs (useful for tests or
    /// constrained environments).
    pub fn with_costs(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, Argon2SettingsError> {
        let settings_error = |message: String| Argon2SettingsError { message };
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| settings_error(err.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        // Decoy shares the live parameters so verifying it costs the same.
        let salt = Self::fresh_salt().map_err(|err| settings_error(err.to_string()))?;
        let decoy = argon2
            .hash_password(Self::DECOY_PASSWORD, &salt)
            .map_err(|err| settings_error(err.to_string()))?
            .to_string();

        Ok(Self {
            argon2,
            decoy: PasswordDigest::new(decoy),
        })
    }

    fn fresh_salt() -> Result<SaltString, PasswordHashError> {
        let mut salt_bytes = [0u8; Self::SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        SaltString::encode_b64(&salt_bytes).map_err(|err| PasswordHashError::hash(err.to_string()))
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHashError> {
        let salt = Self::fresh_salt()?;
        let hash = self
            .argon2
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(PasswordDigest::new(hash.to_string()))
    }

    fn verify(
        &self,
        password: &Password,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(digest.as_str())
            .map_err(|err| PasswordHashError::verify(err.to_string()))?;
        match self
            .argon2
            .verify_password(password.expose().as_bytes(), &parsed)
        {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::verify(err.to_string())),
        }
    }

    fn verify_decoy(&self, password: &Password) {
        if let Err(err) = self.verify(password, &self.decoy) {
            debug!(error = %err, "decoy verification failed");
        }
    }
}
