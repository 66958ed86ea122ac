//! Command-line adapter for the access use-cases.
//!
//! ```text
//! tenant-access check
//! tenant-access add-manager --username alice --password hunter2 --group-limit 5
//! tenant-access authenticate --username alice --password hunter2
//! ```
//!
//! Parsing and dispatch live here; wiring the adapters to a real store is
//! left to the binary so this module only sees the driving ports.

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::domain::ports::{Authenticator, ManagerProvisioning};
use crate::domain::{LoginCredentials, NewManager, ProvisioningError, ProvisioningReport};

/// `tenant-access` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tenant-access",
    about = "Authenticate users and provision manager accounts",
    version
)]
pub struct Cli {
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported operations.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Confirm the credential store is reachable.
    Check,
    /// Create a manager and its login.
    AddManager {
        /// Username shared by the manager and user records.
        #[arg(long, value_name = "name")]
        username: String,
        /// Password for the new login.
        #[arg(long, value_name = "password")]
        password: String,
        /// Maximum number of groups the manager may own.
        #[arg(long = "group-limit", value_name = "count", allow_negative_numbers = true)]
        group_limit: i64,
    },
    /// Check a username and password.
    Authenticate {
        /// Username to look up.
        #[arg(long, value_name = "name")]
        username: String,
        /// Password to verify.
        #[arg(long, value_name = "password")]
        password: String,
    },
}

/// Printable result of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    success: bool,
    message: String,
}

impl CommandOutcome {
    fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Whether the command achieved its goal.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Line to show the operator.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl From<ProvisioningReport> for CommandOutcome {
    fn from(report: ProvisioningReport) -> Self {
        Self {
            success: report.success(),
            message: report.message().to_owned(),
        }
    }
}

/// Run `command` against the driving ports.
///
/// Services are only built once the store answered a ping, so `check`
/// succeeds unconditionally here. Rejected credentials and refused
/// provisioning are reported as unsuccessful outcomes, not errors.
pub async fn execute(
    command: &Command,
    authenticator: &dyn Authenticator,
    provisioning: &dyn ManagerProvisioning,
) -> CommandOutcome {
    match command {
        Command::Check => CommandOutcome::succeeded("credential store reachable"),
        Command::AddManager {
            username,
            password,
            group_limit,
        } => {
            debug!(username = %username, "add-manager requested");
            let result = match NewManager::try_from_parts(username, password, *group_limit) {
                Ok(request) => provisioning.add_manager(&request).await,
                Err(err) => Err(ProvisioningError::from(err)),
            };
            ProvisioningReport::from(result).into()
        }
        Command::Authenticate { username, password } => {
            debug!(username = %username, "authenticate requested");
            let credentials = LoginCredentials::new(username, password);
            match authenticator.authenticate(&credentials).await {
                Ok(outcome) if outcome.is_authenticated() => {
                    CommandOutcome::succeeded(format!("authenticated (tag: {})", outcome.tag()))
                }
                Ok(_) => CommandOutcome::failed("rejected"),
                Err(err) => CommandOutcome::failed(err.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockAuthenticator, MockManagerProvisioning};
    use crate::domain::{AccessError, AuthenticationOutcome, UserTag, Username};
    use rstest::rstest;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("tenant-access").chain(args.iter().copied()))
            .expect("arguments should parse")
            .command
    }

    #[rstest]
    fn add_manager_accepts_negative_limits_for_domain_validation() {
        let command = parse(&[
            "add-manager",
            "--username",
            "alice",
            "--password",
            "pw",
            "--group-limit",
            "-1",
        ]);
        assert_eq!(
            command,
            Command::AddManager {
                username: "alice".to_owned(),
                password: "pw".to_owned(),
                group_limit: -1,
            }
        );
    }

    #[rstest]
    fn add_manager_requires_group_limit() {
        let result = Cli::try_parse_from([
            "tenant-access",
            "add-manager",
            "--username",
            "alice",
            "--password",
            "pw",
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn check_reports_reachable_without_touching_ports() {
        let authenticator = MockAuthenticator::new();
        let provisioning = MockManagerProvisioning::new();

        let outcome = execute(&Command::Check, &authenticator, &provisioning).await;

        assert!(outcome.success());
        assert_eq!(outcome.message(), "credential store reachable");
    }

    #[rstest]
    #[case(AuthenticationOutcome::Authenticated { tag: UserTag::manager() }, true, "authenticated (tag: manager)")]
    #[case(AuthenticationOutcome::Rejected, false, "rejected")]
    #[tokio::test]
    async fn authenticate_renders_outcome(
        #[case] result: AuthenticationOutcome,
        #[case] success: bool,
        #[case] message: &str,
    ) {
        let mut authenticator = MockAuthenticator::new();
        authenticator
            .expect_authenticate()
            .withf(|creds| creds.username().as_str() == "alice" && creds.password().expose() == "pw")
            .times(1)
            .return_once(move |_| Ok(result));
        let provisioning = MockManagerProvisioning::new();

        let command = parse(&["authenticate", "--username", "alice", "--password", "pw"]);
        let outcome = execute(&command, &authenticator, &provisioning).await;

        assert_eq!(outcome.success(), success);
        assert_eq!(outcome.message(), message);
    }

    #[tokio::test]
    async fn authenticate_surfaces_store_failures() {
        let mut authenticator = MockAuthenticator::new();
        authenticator
            .expect_authenticate()
            .return_once(|_| Err(AccessError::unavailable("no server")));
        let provisioning = MockManagerProvisioning::new();

        let command = parse(&["authenticate", "--username", "alice", "--password", "pw"]);
        let outcome = execute(&command, &authenticator, &provisioning).await;

        assert!(!outcome.success());
        assert_eq!(outcome.message(), "credential store unavailable: no server");
    }

    #[tokio::test]
    async fn add_manager_reports_success_message() {
        let authenticator = MockAuthenticator::new();
        let mut provisioning = MockManagerProvisioning::new();
        provisioning
            .expect_add_manager()
            .withf(|request| {
                request.username().as_str() == "alice" && request.group_limit().get() == 5
            })
            .times(1)
            .return_once(|_| Ok(()));

        let command = parse(&[
            "add-manager",
            "--username",
            "alice",
            "--password",
            "pw",
            "--group-limit",
            "5",
        ]);
        let outcome = execute(&command, &authenticator, &provisioning).await;

        assert!(outcome.success());
        assert_eq!(outcome.message(), "manager created successfully");
    }

    #[tokio::test]
    async fn add_manager_reports_conflicts() {
        let authenticator = MockAuthenticator::new();
        let mut provisioning = MockManagerProvisioning::new();
        provisioning.expect_add_manager().return_once(|_| {
            Err(ProvisioningError::AlreadyExists {
                username: Username::new("alice"),
            })
        });

        let command = parse(&[
            "add-manager",
            "--username",
            "alice",
            "--password",
            "pw",
            "--group-limit",
            "5",
        ]);
        let outcome = execute(&command, &authenticator, &provisioning).await;

        assert!(!outcome.success());
        assert_eq!(
            outcome.message(),
            "manager with username 'alice' already exists"
        );
    }

    #[tokio::test]
    async fn invalid_requests_never_reach_the_port() {
        let authenticator = MockAuthenticator::new();
        let mut provisioning = MockManagerProvisioning::new();
        provisioning.expect_add_manager().never();

        let command = Command::AddManager {
            username: "alice".to_owned(),
            password: String::new(),
            group_limit: 5,
        };
        let outcome = execute(&command, &authenticator, &provisioning).await;

        assert!(!outcome.success());
        assert_eq!(
            outcome.message(),
            "invalid manager request: password must not be empty"
        );
    }
}
