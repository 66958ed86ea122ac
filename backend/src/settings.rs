//! Runtime configuration loaded via OrthoConfig.
//!
//! Values come from `TENANT_ACCESS_*` environment variables or a
//! configuration file; anything unset falls back to the defaults below.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{DEFAULT_DATABASE, MongoConfig};

const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_SERVER_SELECTION_TIMEOUT_SECS: u64 = 30;

/// Settings controlling how the access layer reaches its store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TENANT_ACCESS")]
pub struct AccessSettings {
    /// MongoDB connection string.
    pub mongodb_uri: Option<String>,
    /// Database holding the `users` and `managers` collections.
    pub database: Option<String>,
    /// Seconds to wait for a reachable server before giving up.
    pub server_selection_timeout_secs: Option<u64>,
    /// Application name reported to the server.
    pub app_name: Option<String>,
}

impl AccessSettings {
    /// Return the configured connection string, falling back to localhost.
    pub fn mongodb_uri(&self) -> &str {
        self.mongodb_uri.as_deref().unwrap_or(DEFAULT_MONGODB_URI)
    }

    /// Return the configured database name, falling back to the default.
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }

    /// Return the server selection timeout.
    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_secs(
            self.server_selection_timeout_secs
                .unwrap_or(DEFAULT_SERVER_SELECTION_TIMEOUT_SECS),
        )
    }

    /// Build the persistence configuration described by these settings.
    pub fn mongo_config(&self) -> MongoConfig {
        let config = MongoConfig::new(self.mongodb_uri())
            .with_database(self.database())
            .with_server_selection_timeout(self.server_selection_timeout());
        match self.app_name.as_deref() {
            Some(app_name) => config.with_app_name(app_name),
            None => config,
        }
    }
}
