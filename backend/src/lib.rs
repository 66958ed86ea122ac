//! Credential checks and manager provisioning over a MongoDB account store.
//!
//! The crate follows a hexagonal layout: [`domain`] holds the account model,
//! the ports, and the access service; [`outbound`] holds the MongoDB,
//! in-memory, and Argon2 adapters; [`inbound`] holds the command-line
//! adapter; [`settings`] loads runtime configuration.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
