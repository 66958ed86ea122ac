//! MongoDB-backed `UserRepository` adapter.

use async_trait::async_trait;
use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::error::Error as MongoError;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{User, Username};

use super::connection::MongoConnection;
use super::documents::{USERS_COLLECTION, UserDocument};
use super::mongo_error_mapping::map_mongo_error;

/// `UserRepository` over the `users` collection.
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Create a repository sharing the given connection.
    pub fn new(connection: &MongoConnection) -> Self {
        Self {
            collection: connection.collection(USERS_COLLECTION),
        }
    }
}

fn map_error(error: MongoError, username: &Username) -> UserRepositoryError {
    map_mongo_error(
        error,
        || UserRepositoryError::duplicate(username.as_str()),
        UserRepositoryError::connection,
        UserRepositoryError::query,
    )
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let found = self
            .collection
            .find_one(doc! { "username": username.as_str() })
            .await
            .map_err(|err| map_error(err, username))?;
        Ok(found.map(User::from))
    }

    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        self.collection
            .insert_one(UserDocument::from(user))
            .await
            .map(|_| ())
            .map_err(|err| map_error(err, user.username()))
    }
}
