//! Domain primitives, ports, and the access service.
//!
//! Purpose: define the strongly typed account model (users and managers),
//! the ports the service drives, and the use-cases exposed to inbound
//! adapters. Nothing in here knows which document store sits behind the
//! repositories.
//!
//! Public surface:
//! - `AccessService`: implements `Authenticator` and `ManagerProvisioning`.
//! - `LoginCredentials`, `Password`: caller-supplied credentials.
//! - `User`, `Manager`, `NewManager`: persisted account shapes.
//! - `AccessError`, `ProvisioningError`: operation failures.

pub mod access_service;
pub mod auth;
pub mod error;
pub mod manager;
pub mod ports;
pub mod user;

pub use self::access_service::AccessService;
pub use self::auth::{AuthenticationOutcome, LoginCredentials, Password};
pub use self::error::{
    AccessError, MANAGER_CREATED_MESSAGE, ProvisioningError, ProvisioningReport,
};
pub use self::manager::{GroupLimit, Manager, ManagerValidationError, NewManager};
pub use self::user::{PasswordDigest, User, UserTag, Username};
