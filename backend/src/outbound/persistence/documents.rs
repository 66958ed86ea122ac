//! BSON document shapes for the account collections.
//!
//! Field names are the stored contract: `users` documents carry `username`,
//! `password`, `tag`; `managers` documents carry `username`, `groupLimit`.
//! The `_id` field is left to the server and ignored on read.

use serde::{Deserialize, Serialize};

use crate::domain::{
    GroupLimit, Manager, ManagerValidationError, PasswordDigest, User, UserTag, Username,
};

/// Collection holding credential-bearing user documents.
pub const USERS_COLLECTION: &str = "users";
/// Collection holding manager quota documents.
pub const MANAGERS_COLLECTION: &str = "managers";

/// Stored form of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct UserDocument {
    pub(super) username: String,
    pub(super) password: String,
    pub(super) tag: String,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            username: user.username().as_str().to_owned(),
            password: user.password().as_str().to_owned(),
            tag: user.tag().as_str().to_owned(),
        }
    }
}

impl From<UserDocument> for User {
    fn from(document: UserDocument) -> Self {
        User::new(
            Username::new(document.username),
            PasswordDigest::new(document.password),
            UserTag::new(document.tag),
        )
    }
}

/// Stored form of a manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ManagerDocument {
    pub(super) username: String,
    pub(super) group_limit: i64,
}

impl From<&Manager> for ManagerDocument {
    fn from(manager: &Manager) -> Self {
        Self {
            username: manager.username().as_str().to_owned(),
            group_limit: i64::from(manager.group_limit()),
        }
    }
}

impl TryFrom<ManagerDocument> for Manager {
    type Error = ManagerValidationError;

    fn try_from(document: ManagerDocument) -> Result<Self, Self::Error> {
        let group_limit = GroupLimit::try_from(document.group_limit)?;
        Ok(Manager::new(Username::new(document.username), group_limit))
    }
}
