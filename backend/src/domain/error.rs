//! Domain-level error types for the access use-cases.
//!
//! These errors are transport agnostic. The `Display` strings of
//! [`ProvisioningError`] are part of the contract: callers surface them
//! verbatim, and the partial-failure message must stay distinguishable from
//! every total failure.

use super::manager::ManagerValidationError;
use super::user::Username;

/// Message reported when a manager is provisioned.
pub const MANAGER_CREATED_MESSAGE: &str = "manager created successfully";

/// Failure raised while checking credentials.
///
/// A credential mismatch is not an error; see
/// [`AuthenticationOutcome::Rejected`](super::AuthenticationOutcome::Rejected).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The credential store could not be reached.
    #[error("credential store unavailable: {message}")]
    Unavailable {
        /// Underlying failure detail.
        message: String,
    },
    /// The store answered but the lookup or verification failed.
    #[error("credential check failed: {message}")]
    Internal {
        /// Underlying failure detail.
        message: String,
    },
}

impl AccessError {
    /// Convenience constructor for [`AccessError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`AccessError::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Terminal failure states of manager provisioning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProvisioningError {
    /// Request inputs failed validation; nothing was written.
    #[error("invalid manager request: {0}")]
    InvalidRequest(#[from] ManagerValidationError),
    /// A manager with this username already exists; nothing was written.
    #[error("manager with username '{username}' already exists")]
    AlreadyExists {
        /// Conflicting username.
        username: Username,
    },
    /// The duplicate check itself failed; nothing was written.
    #[error("error checking for existing manager: {message}")]
    Lookup {
        /// Underlying failure detail.
        message: String,
    },
    /// The password could not be hashed; nothing was written.
    #[error("could not hash manager password: {message}")]
    PasswordHashing {
        /// Underlying failure detail.
        message: String,
    },
    /// Inserting the manager record failed; nothing was written.
    #[error("could not insert manager: {message}")]
    InsertManager {
        /// Underlying failure detail.
        message: String,
    },
    /// Inserting the user record failed and the manager record was removed.
    #[error("could not add user, manager creation rolled back: {message}")]
    InsertUser {
        /// Underlying failure detail.
        message: String,
    },
    /// Inserting the user record failed and removing the manager record
    /// failed too, leaving a manager without a user. Needs manual cleanup.
    #[error("manager created, but could not add user: {message}")]
    PartiallyProvisioned {
        /// Underlying user insert failure.
        message: String,
    },
}

impl ProvisioningError {
    /// True when the store was left with a manager record that has no user.
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::PartiallyProvisioned { .. })
    }
}

/// `(success, message)` view of a provisioning result for callers that
/// report outcomes as text.
///
/// # Examples
/// ```
/// use tenant_access::domain::{ProvisioningError, ProvisioningReport, Username};
///
/// let ok = ProvisioningReport::from(Ok(()));
/// assert!(ok.success());
/// assert_eq!(ok.message(), "manager created successfully");
///
/// let dup = ProvisioningReport::from(Err(ProvisioningError::AlreadyExists {
///     username: Username::new("alice"),
/// }));
/// assert!(!dup.success());
/// assert_eq!(dup.message(), "manager with username 'alice' already exists");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningReport {
    success: bool,
    message: String,
}

impl ProvisioningReport {
    /// Whether the manager was created.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Human-readable outcome.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl From<Result<(), ProvisioningError>> for ProvisioningReport {
    fn from(result: Result<(), ProvisioningError>) -> Self {
        match result {
            Ok(()) => Self {
                success: true,
                message: MANAGER_CREATED_MESSAGE.to_owned(),
            },
            Err(err) => Self {
                success: false,
                message: err.to_string(),
            },
        }
    }
}
