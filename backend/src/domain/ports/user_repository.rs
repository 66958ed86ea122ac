//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A user with this username is already stored.
        Duplicate { username: String } => "user repository already holds username '{username}'",
    }
}

/// Storage for credential-bearing user records.
///
/// Adapters must treat `username` as a unique key: a second insert for the
/// same username fails with [`UserRepositoryError::Duplicate`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the user with exactly this username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Insert a new user record.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;
}
