//! Access domain service.
//!
//! This module implements the driving ports for credential verification and
//! manager provisioning on top of the user, manager, and hashing ports.
//! Provisioning writes two records without a multi-document transaction, so a
//! failed user insert is compensated by deleting the manager record that was
//! just written.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    Authenticator, ManagerProvisioning, ManagerRepository, ManagerRepositoryError,
    PasswordHashError, PasswordHasher, UserRepository, UserRepositoryError,
};
use crate::domain::{
    AccessError, AuthenticationOutcome, LoginCredentials, NewManager, ProvisioningError, User,
};

/// Access service implementing the driving ports.
#[derive(Clone)]
pub struct AccessService<U, M, H> {
    users: Arc<U>,
    managers: Arc<M>,
    hasher: Arc<H>,
}

impl<U, M, H> AccessService<U, M, H> {
    /// Create a new service over the given adapters.
    pub fn new(users: Arc<U>, managers: Arc<M>, hasher: Arc<H>) -> Self {
        Self {
            users,
            managers,
            hasher,
        }
    }
}

fn map_user_error(error: UserRepositoryError) -> AccessError {
    match error {
        UserRepositoryError::Connection { message } => AccessError::unavailable(message),
        UserRepositoryError::Query { message } => AccessError::internal(message),
        // Lookups never report duplicates; keep the detail if an adapter does.
        err @ UserRepositoryError::Duplicate { .. } => AccessError::internal(err.to_string()),
    }
}

fn map_verify_error(error: PasswordHashError) -> AccessError {
    AccessError::internal(error.to_string())
}

impl<U, M, H> AccessService<U, M, H>
where
    U: UserRepository,
    M: ManagerRepository,
    H: PasswordHasher,
{
    async fn ensure_manager_absent(&self, request: &NewManager) -> Result<(), ProvisioningError> {
        match self.managers.find_by_username(request.username()).await {
            Ok(None) => Ok(()),
            Ok(Some(_)) => Err(ProvisioningError::AlreadyExists {
                username: request.username().clone(),
            }),
            Err(err) => Err(ProvisioningError::Lookup {
                message: err.to_string(),
            }),
        }
    }

    async fn insert_manager(&self, request: &NewManager) -> Result<(), ProvisioningError> {
        match self.managers.insert(&request.to_manager()).await {
            Ok(()) => Ok(()),
            Err(ManagerRepositoryError::Duplicate { .. }) => {
                // Lost a race with a concurrent provisioning of the same name.
                Err(ProvisioningError::AlreadyExists {
                    username: request.username().clone(),
                })
            }
            Err(err) => Err(ProvisioningError::InsertManager {
                message: err.to_string(),
            }),
        }
    }

    async fn roll_back_manager(
        &self,
        request: &NewManager,
        user_error: UserRepositoryError,
    ) -> ProvisioningError {
        let message = user_error.to_string();
        match self.managers.delete_by_username(request.username()).await {
            Ok(removed) => {
                if !removed {
                    warn!(
                        username = %request.username(),
                        "manager record vanished before rollback"
                    );
                }
                warn!(
                    username = %request.username(),
                    error = %message,
                    "user insert failed; manager creation rolled back"
                );
                ProvisioningError::InsertUser { message }
            }
            Err(rollback_err) => {
                error!(
                    username = %request.username(),
                    error = %message,
                    rollback_error = %rollback_err,
                    "user insert failed and manager rollback failed; orphaned manager record"
                );
                ProvisioningError::PartiallyProvisioned { message }
            }
        }
    }
}

#[async_trait]
impl<U, M, H> Authenticator for AccessService<U, M, H>
where
    U: UserRepository,
    M: ManagerRepository,
    H: PasswordHasher,
{
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticationOutcome, AccessError> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            self.hasher.verify_decoy(credentials.password());
            debug!(username = %credentials.username(), "authentication rejected");
            return Ok(AuthenticationOutcome::Rejected);
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password())
            .map_err(map_verify_error)?;
        if !matches {
            debug!(username = %credentials.username(), "authentication rejected");
            return Ok(AuthenticationOutcome::Rejected);
        }

        debug!(username = %credentials.username(), tag = %user.tag(), "authenticated");
        Ok(AuthenticationOutcome::Authenticated {
            tag: user.tag().clone(),
        })
    }
}

#[async_trait]
impl<U, M, H> ManagerProvisioning for AccessService<U, M, H>
where
    U: UserRepository,
    M: ManagerRepository,
    H: PasswordHasher,
{
    async fn add_manager(&self, request: &NewManager) -> Result<(), ProvisioningError> {
        self.ensure_manager_absent(request).await?;

        let digest =
            self.hasher
                .hash(request.password())
                .map_err(|err| ProvisioningError::PasswordHashing {
                    message: err.to_string(),
                })?;

        self.insert_manager(request).await?;

        let user = User::manager(request.username().clone(), digest);
        if let Err(err) = self.users.insert(&user).await {
            return Err(self.roll_back_manager(request, err).await);
        }

        info!(
            username = %request.username(),
            group_limit = %request.group_limit(),
            "manager provisioned"
        );
        Ok(())
    }
}
