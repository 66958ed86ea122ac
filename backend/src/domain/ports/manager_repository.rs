//! Port abstraction for manager persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Manager, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by manager repository adapters.
    pub enum ManagerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "manager repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "manager repository query failed: {message}",
        /// A manager with this username is already stored.
        Duplicate { username: String } => "manager repository already holds username '{username}'",
    }
}

/// Storage for manager quota records.
///
/// Adapters must treat `username` as a unique key so concurrent provisioning
/// of the same username cannot produce two records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManagerRepository: Send + Sync {
    /// Fetch the manager with exactly this username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Manager>, ManagerRepositoryError>;

    /// Insert a new manager record.
    async fn insert(&self, manager: &Manager) -> Result<(), ManagerRepositoryError>;

    /// Remove the manager with this username.
    ///
    /// Returns whether a record was removed. Used to compensate a
    /// provisioning attempt whose user insert failed.
    async fn delete_by_username(&self, username: &Username)
    -> Result<bool, ManagerRepositoryError>;
}
