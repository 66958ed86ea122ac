//! In-memory `UserRepository` adapter.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{User, Username};

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<Username, User>,
    insert_failure: Option<UserRepositoryError>,
}

/// `UserRepository` backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<State>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>, UserRepositoryError> {
        self.state
            .lock()
            .map_err(|_| UserRepositoryError::query("in-memory user store lock poisoned"))
    }

    /// Snapshot of every stored user, ordered by username.
    pub fn users(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    /// Make the next `insert` fail with `error`.
    #[cfg(any(test, feature = "test-support"))]
    pub fn fail_next_insert(&self, error: UserRepositoryError) -> Result<(), UserRepositoryError> {
        self.lock()?.insert_failure = Some(error);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.lock()?.users.get(username).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut state = self.lock()?;
        if let Some(failure) = state.insert_failure.take() {
            return Err(failure);
        }
        if state.users.contains_key(user.username()) {
            return Err(UserRepositoryError::duplicate(user.username().as_str()));
        }
        state.users.insert(user.username().clone(), user.clone());
        Ok(())
    }
}
