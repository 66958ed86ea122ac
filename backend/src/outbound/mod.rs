//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits:
//!
//! - **persistence**: MongoDB-backed user and manager repositories plus the
//!   connection handle they share
//! - **memory**: in-process repositories with the same uniqueness rules, for
//!   tests and dry runs
//! - **crypto**: Argon2id password hashing
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod crypto;
pub mod memory;
pub mod persistence;
