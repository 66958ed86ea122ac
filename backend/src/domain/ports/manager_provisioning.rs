//! Driving port for manager account provisioning.

use async_trait::async_trait;

use crate::domain::{NewManager, ProvisioningError};

/// Domain use-case port for creating manager accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManagerProvisioning: Send + Sync {
    /// Create the manager record and its `manager`-tagged user.
    ///
    /// Either both records exist afterwards or neither does, except when
    /// [`ProvisioningError::PartiallyProvisioned`] is returned.
    async fn add_manager(&self, request: &NewManager) -> Result<(), ProvisioningError>;
}
