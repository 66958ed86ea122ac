//! MongoDB persistence adapters.
//!
//! This module provides concrete implementations of the user and manager
//! repository ports backed by MongoDB through the official async driver.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   BSON documents and domain types. No business logic resides here.
//! - **Internal documents**: serde document structs (`documents.rs`) are
//!   implementation details, never exposed to the domain layer.
//! - **One injected handle**: every repository is built from the same
//!   [`MongoConnection`]; there is no global client.
//! - **Strongly typed errors**: driver errors are mapped to the port error
//!   enums, with duplicate-key failures kept distinct.
//!
//! # Example
//!
//! ```ignore
//! use tenant_access::outbound::persistence::{MongoConfig, MongoConnection, MongoUserRepository};
//!
//! let connection = MongoConnection::connect(MongoConfig::new("mongodb://localhost:27017")).await?;
//! connection.ensure_indexes().await?;
//! let users = MongoUserRepository::new(&connection);
//! ```

mod connection;
mod documents;
mod mongo_error_mapping;
mod mongo_manager_repository;
mod mongo_user_repository;

pub use connection::{ConnectionError, DEFAULT_DATABASE, MongoConfig, MongoConnection};
pub use documents::{MANAGERS_COLLECTION, USERS_COLLECTION};
pub use mongo_manager_repository::MongoManagerRepository;
pub use mongo_user_repository::MongoUserRepository;
