//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `ManagerRepository`, `PasswordHasher`) are
//! implemented by outbound adapters. Driving ports (`Authenticator`,
//! `ManagerProvisioning`) are implemented by the domain and called by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod authenticator;
mod manager_provisioning;
mod manager_repository;
mod password_hasher;
mod user_repository;

#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::Authenticator;
#[cfg(test)]
pub use manager_provisioning::MockManagerProvisioning;
pub use manager_provisioning::ManagerProvisioning;
#[cfg(test)]
pub use manager_repository::MockManagerRepository;
pub use manager_repository::{ManagerRepository, ManagerRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
