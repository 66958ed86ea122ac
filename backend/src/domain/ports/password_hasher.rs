//! Port for one-way password hashing.

use crate::domain::{Password, PasswordDigest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Producing a digest failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored digest could not be parsed or checked.
        Verify { message: String } => "password verification failed: {message}",
    }
}

/// Salted one-way hashing of user passwords.
///
/// Implementations run synchronously; they are CPU-bound and hold no I/O.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a password with a fresh salt.
    fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHashError>;

    /// Check a password against a stored digest.
    ///
    /// A mismatch is `Ok(false)`; `Err` is reserved for digests that cannot
    /// be interpreted.
    fn verify(
        &self,
        password: &Password,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError>;

    /// Spend the work of one `verify` against a digest no password matches.
    ///
    /// Called when no user exists so unknown usernames take as long to reject
    /// as wrong passwords.
    fn verify_decoy(&self, password: &Password);
}
