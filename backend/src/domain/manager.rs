//! Manager account model and provisioning input.

use std::fmt;

use super::auth::Password;
use super::user::Username;

/// Validation errors returned by [`NewManager::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerValidationError {
    /// Username was empty.
    EmptyUsername,
    /// Password was empty.
    EmptyPassword,
    /// Group limit was negative or did not fit in a `u32`.
    GroupLimitOutOfRange {
        /// Rejected value.
        value: i64,
    },
}

impl fmt::Display for ManagerValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::GroupLimitOutOfRange { value } => write!(
                f,
                "group limit must be between 0 and {} (got {value})",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for ManagerValidationError {}

/// Maximum number of groups a manager may own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupLimit(u32);

impl GroupLimit {
    /// Wrap a non-negative limit.
    pub const fn new(limit: u32) -> Self {
        Self(limit)
    }

    /// The limit as an unsigned count.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for GroupLimit {
    type Error = ManagerValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| ManagerValidationError::GroupLimitOutOfRange { value })
    }
}

impl From<GroupLimit> for i64 {
    fn from(value: GroupLimit) -> Self {
        Self::from(value.0)
    }
}

impl fmt::Display for GroupLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted manager record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manager {
    username: Username,
    group_limit: GroupLimit,
}

impl Manager {
    /// Build a manager record.
    pub fn new(username: Username, group_limit: GroupLimit) -> Self {
        Self {
            username,
            group_limit,
        }
    }

    /// Username shared with the matching user record.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Group quota.
    pub fn group_limit(&self) -> GroupLimit {
        self.group_limit
    }
}

/// Validated request to provision a manager account.
///
/// ## Invariants
/// - `username` and `password` are non-empty. Neither is trimmed.
/// - `group_limit` fits in a `u32`.
///
/// # Examples
/// ```
/// use tenant_access::domain::NewManager;
///
/// let request = NewManager::try_from_parts("alice", "hunter2", 5).unwrap();
/// assert_eq!(request.username().as_str(), "alice");
/// assert_eq!(request.group_limit().get(), 5);
/// assert!(NewManager::try_from_parts("alice", "hunter2", -1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewManager {
    username: Username,
    password: Password,
    group_limit: GroupLimit,
}

impl NewManager {
    /// Validate raw provisioning inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        group_limit: i64,
    ) -> Result<Self, ManagerValidationError> {
        if username.is_empty() {
            return Err(ManagerValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(ManagerValidationError::EmptyPassword);
        }
        let group_limit = GroupLimit::try_from(group_limit)?;

        Ok(Self {
            username: Username::new(username),
            password: Password::new(password),
            group_limit,
        })
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plaintext password to be hashed before storage.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Requested group quota.
    pub fn group_limit(&self) -> GroupLimit {
        self.group_limit
    }

    /// Manager record described by this request.
    pub fn to_manager(&self) -> Manager {
        Manager::new(self.username.clone(), self.group_limit)
    }
}
