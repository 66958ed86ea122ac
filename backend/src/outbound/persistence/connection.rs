//! Shared MongoDB connection handle.
//!
//! [`MongoConnection`] owns a driver `Client` (itself an internally pooled,
//! cheaply clonable handle) plus the database all collections live in. It is
//! created once at startup, handed to every repository, and closed once at
//! shutdown.
//!
//! # Design
//!
//! - `connect` does not return until a `ping` round trip succeeds
//! - `disconnect` is idempotent across all clones of the handle
//! - Uniqueness of usernames is enforced by indexes created through
//!   [`MongoConnection::ensure_indexes`]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use mongodb::bson::{Document, doc};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::{debug, info};

use super::documents::{MANAGERS_COLLECTION, USERS_COLLECTION};

/// Database used when none is configured.
pub const DEFAULT_DATABASE: &str = "mydatabase";

/// Errors that can occur while opening or preparing the connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The connection string could not be parsed into client options.
    #[error("invalid MongoDB connection string: {message}")]
    InvalidUri {
        /// Driver parse failure detail.
        message: String,
    },

    /// The deployment did not answer the health check.
    #[error("MongoDB is unreachable: {message}")]
    Unreachable {
        /// Underlying failure detail.
        message: String,
    },

    /// A unique index could not be created.
    #[error("failed to create unique username index on '{collection}': {message}")]
    Index {
        /// Collection the index was meant for.
        collection: String,
        /// Underlying failure detail.
        message: String,
    },
}

impl ConnectionError {
    /// Create an invalid URI error with the given message.
    pub fn invalid_uri(message: impl Into<String>) -> Self {
        Self::InvalidUri {
            message: message.into(),
        }
    }

    /// Create an unreachable error with the given message.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// Create an index error for a collection.
    pub fn index(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Index {
            collection: collection.into(),
            message: message.into(),
        }
    }
}

/// Configuration for the MongoDB connection.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tenant_access::outbound::persistence::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://localhost:27017")
///     .with_database("tenants")
///     .with_server_selection_timeout(Duration::from_secs(5));
/// assert_eq!(config.database(), "tenants");
/// ```
#[derive(Debug, Clone)]
pub struct MongoConfig {
    uri: String,
    database: String,
    server_selection_timeout: Duration,
    connect_timeout: Duration,
    app_name: Option<String>,
}

impl MongoConfig {
    /// Create a new configuration with the given connection string.
    ///
    /// Uses sensible defaults:
    /// - `database`: `mydatabase`
    /// - `server_selection_timeout`: 30 seconds
    /// - `connect_timeout`: 10 seconds
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: DEFAULT_DATABASE.to_owned(),
            server_selection_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            app_name: None,
        }
    }

    /// Set the database holding the `users` and `managers` collections.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set how long an operation waits for a suitable server.
    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }

    /// Set the TCP connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the application name reported to the server.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Get the connection string.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Get the database name.
    pub fn database(&self) -> &str {
        &self.database
    }
}

/// Live handle to the document store.
#[derive(Clone)]
pub struct MongoConnection {
    client: Client,
    database: Database,
    closed: Arc<AtomicBool>,
}

impl MongoConnection {
    /// Open a client and verify the deployment answers a `ping`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::InvalidUri`] when the connection string is
    /// rejected and [`ConnectionError::Unreachable`] when the health check
    /// fails.
    pub async fn connect(config: MongoConfig) -> Result<Self, ConnectionError> {
        let connection = Self::open(&config).await?;

        if let Err(err) = connection.ping().await {
            connection.disconnect().await;
            return Err(err);
        }

        info!(database = config.database(), "connected to MongoDB");
        Ok(connection)
    }

    /// Build the client without contacting the deployment.
    async fn open(config: &MongoConfig) -> Result<Self, ConnectionError> {
        let mut options = ClientOptions::parse(config.uri())
            .await
            .map_err(|err| ConnectionError::invalid_uri(err.to_string()))?;
        options.server_selection_timeout = Some(config.server_selection_timeout);
        options.connect_timeout = Some(config.connect_timeout);
        if let Some(app_name) = config.app_name.clone() {
            options.app_name = Some(app_name);
        }

        let client = Client::with_options(options)
            .map_err(|err| ConnectionError::invalid_uri(err.to_string()))?;
        Ok(Self {
            database: client.database(config.database()),
            client,
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Round-trip health check.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Unreachable`] if the server does not answer.
    pub async fn ping(&self) -> Result<(), ConnectionError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|err| ConnectionError::unreachable(err.to_string()))
    }

    /// Create the unique `username` indexes on both collections.
    ///
    /// Safe to call repeatedly; MongoDB treats identical index definitions
    /// as a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Index`] if an index cannot be built, for
    /// example because duplicate usernames are already stored.
    pub async fn ensure_indexes(&self) -> Result<(), ConnectionError> {
        for collection in [USERS_COLLECTION, MANAGERS_COLLECTION] {
            let index = IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build();
            self.database
                .collection::<Document>(collection)
                .create_index(index)
                .await
                .map_err(|err| ConnectionError::index(collection, err.to_string()))?;
            debug!(collection, "unique username index ensured");
        }
        Ok(())
    }

    /// Close the client. Later calls, from any clone, do nothing.
    pub async fn disconnect(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            debug!("MongoDB connection already closed");
            return;
        }
        self.client.clone().shutdown().await;
        info!("disconnected from MongoDB");
    }

    /// Whether [`MongoConnection::disconnect`] has run.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Database holding the account collections.
    pub fn database(&self) -> &Database {
        &self.database
    }

    pub(super) fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_default_values() {
        let config = MongoConfig::new("mongodb://localhost:27017");

        assert_eq!(config.uri(), "mongodb://localhost:27017");
        assert_eq!(config.database(), DEFAULT_DATABASE);
        assert_eq!(config.server_selection_timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.app_name.is_none());
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = MongoConfig::new("mongodb://db.internal:27017")
            .with_database("tenants")
            .with_server_selection_timeout(Duration::from_secs(2))
            .with_connect_timeout(Duration::from_secs(1))
            .with_app_name("tenant-access");

        assert_eq!(config.database(), "tenants");
        assert_eq!(config.server_selection_timeout, Duration::from_secs(2));
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert_eq!(config.app_name.as_deref(), Some("tenant-access"));
    }

    #[rstest]
    #[case("not a uri")]
    #[case("postgres://localhost/db")]
    #[tokio::test]
    async fn malformed_uris_fail_before_any_network_io(#[case] uri: &str) {
        let err = MongoConnection::connect(MongoConfig::new(uri))
            .await
            .err()
            .expect("malformed URIs must be rejected");

        assert!(
            matches!(err, ConnectionError::InvalidUri { .. }),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn unreachable_servers_fail_the_health_check() {
        let config = MongoConfig::new("mongodb://127.0.0.1:1/")
            .with_server_selection_timeout(Duration::from_millis(200))
            .with_connect_timeout(Duration::from_millis(200));

        let err = MongoConnection::connect(config)
            .await
            .err()
            .expect("nothing listens on port 1");

        assert!(
            matches!(err, ConnectionError::Unreachable { .. }),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn disconnect_is_idempotent_across_clones() {
        let connection = MongoConnection::open(&MongoConfig::new("mongodb://127.0.0.1:1/"))
            .await
            .expect("client options are valid");
        let clone = connection.clone();
        assert!(!connection.is_closed());

        connection.disconnect().await;
        connection.disconnect().await;
        clone.disconnect().await;

        assert!(connection.is_closed());
        assert!(clone.is_closed());
    }

    #[rstest]
    fn connection_error_display() {
        let uri = ConnectionError::invalid_uri("missing scheme");
        let ping = ConnectionError::unreachable("server selection timeout");
        let index = ConnectionError::index("users", "E11000 duplicate key");

        assert!(uri.to_string().contains("missing scheme"));
        assert!(ping.to_string().contains("server selection timeout"));
        assert_eq!(
            index.to_string(),
            "failed to create unique username index on 'users': E11000 duplicate key"
        );
    }
}
