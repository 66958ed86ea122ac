//! MongoDB-backed `ManagerRepository` adapter.

use async_trait::async_trait;
use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::error::Error as MongoError;

use crate::domain::ports::{ManagerRepository, ManagerRepositoryError};
use crate::domain::{Manager, Username};

use super::connection::MongoConnection;
use super::documents::{MANAGERS_COLLECTION, ManagerDocument};
use super::mongo_error_mapping::map_mongo_error;

/// `ManagerRepository` over the `managers` collection.
#[derive(Clone)]
pub struct MongoManagerRepository {
    collection: Collection<ManagerDocument>,
}

impl MongoManagerRepository {
    /// Create a repository sharing the given connection.
    pub fn new(connection: &MongoConnection) -> Self {
        Self {
            collection: connection.collection(MANAGERS_COLLECTION),
        }
    }
}

fn map_error(error: MongoError, username: &Username) -> ManagerRepositoryError {
    map_mongo_error(
        error,
        || ManagerRepositoryError::duplicate(username.as_str()),
        ManagerRepositoryError::connection,
        ManagerRepositoryError::query,
    )
}

#[async_trait]
impl ManagerRepository for MongoManagerRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Manager>, ManagerRepositoryError> {
        let found = self
            .collection
            .find_one(doc! { "username": username.as_str() })
            .await
            .map_err(|err| map_error(err, username))?;

        found
            .map(Manager::try_from)
            .transpose()
            .map_err(|err| {
                ManagerRepositoryError::query(format!(
                    "stored manager '{username}' is invalid: {err}"
                ))
            })
    }

    async fn insert(&self, manager: &Manager) -> Result<(), ManagerRepositoryError> {
        self.collection
            .insert_one(ManagerDocument::from(manager))
            .await
            .map(|_| ())
            .map_err(|err| map_error(err, manager.username()))
    }

    async fn delete_by_username(
        &self,
        username: &Username,
    ) -> Result<bool, ManagerRepositoryError> {
        let result = self
            .collection
            .delete_one(doc! { "username": username.as_str() })
            .await
            .map_err(|err| map_error(err, username))?;
        Ok(result.deleted_count > 0)
    }
}
