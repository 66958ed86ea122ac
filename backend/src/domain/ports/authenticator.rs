//! Driving port for credential verification.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! check credentials without knowing (or importing) the backing
//! infrastructure, so adapter tests can substitute a test double instead of
//! wiring persistence.

use async_trait::async_trait;

use crate::domain::{AccessError, AuthenticationOutcome, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Check credentials and report the matched user's tag.
    ///
    /// A credential mismatch is `Ok(AuthenticationOutcome::Rejected)`; `Err`
    /// is reserved for store failures.
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticationOutcome, AccessError>;
}
