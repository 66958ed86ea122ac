//! In-memory `ManagerRepository` adapter.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{ManagerRepository, ManagerRepositoryError};
use crate::domain::{Manager, Username};

#[derive(Debug, Default)]
struct State {
    managers: BTreeMap<Username, Manager>,
    insert_failure: Option<ManagerRepositoryError>,
    delete_failure: Option<ManagerRepositoryError>,
}

/// `ManagerRepository` backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryManagerRepository {
    state: Mutex<State>,
}

impl InMemoryManagerRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>, ManagerRepositoryError> {
        self.state
            .lock()
            .map_err(|_| ManagerRepositoryError::query("in-memory manager store lock poisoned"))
    }

    /// Snapshot of every stored manager, ordered by username.
    pub fn managers(&self) -> Result<Vec<Manager>, ManagerRepositoryError> {
        Ok(self.lock()?.managers.values().cloned().collect())
    }

    /// Make the next `insert` fail with `error`.
    #[cfg(any(test, feature = "test-support"))]
    pub fn fail_next_insert(
        &self,
        error: ManagerRepositoryError,
    ) -> Result<(), ManagerRepositoryError> {
        self.lock()?.insert_failure = Some(error);
        Ok(())
    }

    /// Make the next `delete_by_username` fail with `error`.
    #[cfg(any(test, feature = "test-support"))]
    pub fn fail_next_delete(
        &self,
        error: ManagerRepositoryError,
    ) -> Result<(), ManagerRepositoryError> {
        self.lock()?.delete_failure = Some(error);
        Ok(())
    }
}

#[async_trait]
impl ManagerRepository for InMemoryManagerRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Manager>, ManagerRepositoryError> {
        Ok(self.lock()?.managers.get(username).cloned())
    }

    async fn insert(&self, manager: &Manager) -> Result<(), ManagerRepositoryError> {
        let mut state = self.lock()?;
        if let Some(failure) = state.insert_failure.take() {
            return Err(failure);
        }
        if state.managers.contains_key(manager.username()) {
            return Err(ManagerRepositoryError::duplicate(
                manager.username().as_str(),
            ));
        }
        state
            .managers
            .insert(manager.username().clone(), manager.clone());
        Ok(())
    }

    async fn delete_by_username(
        &self,
        username: &Username,
    ) -> Result<bool, ManagerRepositoryError> {
        let mut state = self.lock()?;
        if let Some(failure) = state.delete_failure.take() {
            return Err(failure);
        }
        Ok(state.managers.remove(username).is_some())
    }
}
