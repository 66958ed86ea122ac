//! In-process repositories.
//!
//! Both repositories key records by username and reject duplicate inserts,
//! mirroring the unique indexes the MongoDB adapter creates. With the
//! `test-support` feature they can be told to fail the next write, which is
//! how integration tests reach the rollback paths.

mod manager_repository;
mod user_repository;

pub use manager_repository::InMemoryManagerRepository;
pub use user_repository::InMemoryUserRepository;
