//! Authentication primitives such as login credentials.
//!
//! Credentials are compared exactly as supplied: no trimming, no case folding.
//! An empty username or password is a valid (if hopeless) lookup and simply
//! fails to authenticate.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{UserTag, Username};

/// Plaintext password supplied by a caller.
///
/// The buffer is zeroed on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a caller-supplied password.
    pub fn new(password: impl Into<String>) -> Self {
        Self(Zeroizing::new(password.into()))
    }

    /// Borrow the plaintext for hashing or verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// True when the password has no characters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Credentials used by authentication services.
///
/// # Examples
/// ```
/// use tenant_access::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("alice", "hunter2");
/// assert_eq!(creds.username().as_str(), "alice");
/// assert_eq!(creds.password().expose(), "hunter2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: Username::new(username),
            password: Password::new(password),
        }
    }

    /// Username suitable for user lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Result of a credential check that reached the store.
///
/// Unknown usernames and wrong passwords both produce
/// [`AuthenticationOutcome::Rejected`], so callers cannot tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationOutcome {
    /// Credentials matched a stored user.
    Authenticated {
        /// Role discriminator of the matched user.
        tag: UserTag,
    },
    /// No user matched the credentials.
    Rejected,
}

impl AuthenticationOutcome {
    /// Whether the credentials matched.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Tag of the matched user, or an empty string when rejected.
    pub fn tag(&self) -> &str {
        match self {
            Self::Authenticated { tag } => tag.as_str(),
            Self::Rejected => "",
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("  admin  ", "secret")]
    #[case("alice", "correct horse battery staple")]
    fn credentials_keep_inputs_verbatim(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::new(username, password);
        assert_eq!(creds.username().as_str(), username);
        assert_eq!(creds.password().expose(), password);
    }

    #[rstest]
    fn password_debug_is_redacted() {
        let creds = LoginCredentials::new("alice", "hunter2");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2"), "rendered: {rendered}");
    }

    #[rstest]
    #[case(AuthenticationOutcome::Rejected, false, "")]
    #[case(AuthenticationOutcome::Authenticated { tag: UserTag::manager() }, true, "manager")]
    #[case(AuthenticationOutcome::Authenticated { tag: UserTag::new("member") }, true, "member")]
    fn outcome_exposes_flag_and_tag(
        #[case] outcome: AuthenticationOutcome,
        #[case] authenticated: bool,
        #[case] tag: &str,
    ) {
        assert_eq!(outcome.is_authenticated(), authenticated);
        assert_eq!(outcome.tag(), tag);
    }
}
