//! User account model.
//!
//! A user is the credential-bearing record consulted by authentication. The
//! `tag` is the role discriminator (for example `manager`) that callers use to
//! decide authorisation level.

use std::fmt;

/// Account username.
///
/// ## Invariants
/// - Stored verbatim. Lookups are exact, so no trimming or case folding is
///   applied here; provisioning rejects empty names before they reach a
///   repository.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Username(String);

impl Username {
    /// Wrap a username exactly as supplied.
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    /// Borrow the username for queries.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role discriminator attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserTag(String);

impl UserTag {
    /// Tag assigned to users created through manager provisioning.
    pub const MANAGER: &'static str = "manager";

    /// Wrap an arbitrary stored tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The `manager` tag.
    pub fn manager() -> Self {
        Self::new(Self::MANAGER)
    }

    /// Borrow the tag.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserTag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoded one-way password hash as produced by a `PasswordHasher` adapter.
///
/// The encoding is opaque to the domain; adapters store and compare it.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap an encoded digest.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded digest.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Persisted user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: Username,
    password: PasswordDigest,
    tag: UserTag,
}

impl User {
    /// Build a user from its stored parts.
    pub fn new(username: Username, password: PasswordDigest, tag: UserTag) -> Self {
        Self {
            username,
            password,
            tag,
        }
    }

    /// Build the user record that accompanies a provisioned manager.
    pub fn manager(username: Username, password: PasswordDigest) -> Self {
        Self::new(username, password, UserTag::manager())
    }

    /// Account username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password digest.
    pub fn password(&self) -> &PasswordDigest {
        &self.password
    }

    /// Role discriminator.
    pub fn tag(&self) -> &UserTag {
        &self.tag
    }
}
