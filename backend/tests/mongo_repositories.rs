//! Behavioural tests for the MongoDB adapters against a live server.
//!
//! Set `TENANT_ACCESS_TEST_MONGODB_URI` (for example
//! `mongodb://localhost:27017`) to run them. Each test works in its own
//! throwaway database, dropped on completion.

use std::sync::Arc;
use std::time::Duration;

use tenant_access::domain::ports::{
    Authenticator, ManagerProvisioning, ManagerRepository, ManagerRepositoryError,
    UserRepository, UserRepositoryError,
};
use tenant_access::domain::{
    AccessService, AuthenticationOutcome, GroupLimit, LoginCredentials, Manager, NewManager,
    PasswordDigest, ProvisioningReport, User, UserTag, Username,
};
use tenant_access::outbound::crypto::Argon2PasswordHasher;
use tenant_access::outbound::persistence::{
    MongoConfig, MongoConnection, MongoManagerRepository, MongoUserRepository,
};
use uuid::Uuid;

const URI_VAR: &str = "TENANT_ACCESS_TEST_MONGODB_URI";

async fn connect() -> Option<MongoConnection> {
    let Ok(uri) = std::env::var(URI_VAR) else {
        eprintln!("SKIP-TEST-MONGODB: set {URI_VAR} to run");
        return None;
    };
    let database = format!("tenant_access_test_{}", Uuid::new_v4().simple());
    let config = MongoConfig::new(uri)
        .with_database(database)
        .with_server_selection_timeout(Duration::from_secs(5));
    let connection = MongoConnection::connect(config)
        .await
        .expect("test server should be reachable");
    connection
        .ensure_indexes()
        .await
        .expect("indexes should build");
    Some(connection)
}

async fn tear_down(connection: MongoConnection) {
    connection
        .database()
        .drop()
        .await
        .expect("drop test database");
    connection.disconnect().await;
}

#[tokio::test]
async fn user_round_trips_by_exact_username() {
    let Some(connection) = connect().await else {
        return;
    };
    let users = MongoUserRepository::new(&connection);
    let user = User::new(
        Username::new("alice"),
        PasswordDigest::new("$argon2id$stub"),
        UserTag::manager(),
    );

    users.insert(&user).await.expect("insert user");

    let found = users
        .find_by_username(&Username::new("alice"))
        .await
        .expect("lookup");
    assert_eq!(found, Some(user));
    let missing = users
        .find_by_username(&Username::new("ALICE"))
        .await
        .expect("lookup");
    assert!(missing.is_none());

    tear_down(connection).await;
}

#[tokio::test]
async fn unique_indexes_reject_duplicate_usernames() {
    let Some(connection) = connect().await else {
        return;
    };
    let users = MongoUserRepository::new(&connection);
    let managers = MongoManagerRepository::new(&connection);
    let user = User::manager(Username::new("alice"), PasswordDigest::new("x"));
    let manager = Manager::new(Username::new("alice"), GroupLimit::new(3));

    users.insert(&user).await.expect("first user insert");
    managers.insert(&manager).await.expect("first manager insert");

    assert_eq!(
        users.insert(&user).await,
        Err(UserRepositoryError::duplicate("alice"))
    );
    assert_eq!(
        managers.insert(&manager).await,
        Err(ManagerRepositoryError::duplicate("alice"))
    );

    tear_down(connection).await;
}

#[tokio::test]
async fn manager_delete_reports_whether_a_record_was_removed() {
    let Some(connection) = connect().await else {
        return;
    };
    let managers = MongoManagerRepository::new(&connection);
    let username = Username::new("alice");
    managers
        .insert(&Manager::new(username.clone(), GroupLimit::new(1)))
        .await
        .expect("insert manager");

    assert!(managers.delete_by_username(&username).await.expect("delete"));
    assert!(!managers.delete_by_username(&username).await.expect("delete"));
    assert!(
        managers
            .find_by_username(&username)
            .await
            .expect("lookup")
            .is_none()
    );

    tear_down(connection).await;
}

#[tokio::test]
async fn provisioning_and_authentication_end_to_end() {
    let Some(connection) = connect().await else {
        return;
    };
    let hasher = Argon2PasswordHasher::with_costs(8, 1, 1).expect("cheap argon2 params");
    let service = AccessService::new(
        Arc::new(MongoUserRepository::new(&connection)),
        Arc::new(MongoManagerRepository::new(&connection)),
        Arc::new(hasher),
    );
    let request = NewManager::try_from_parts("alice", "s3cret", 5).expect("valid request");

    let created = ProvisioningReport::from(service.add_manager(&request).await);
    assert!(created.success(), "{}", created.message());
    let again = ProvisioningReport::from(service.add_manager(&request).await);
    assert_eq!(again.message(), "manager with username 'alice' already exists");

    let accepted = service
        .authenticate(&LoginCredentials::new("alice", "s3cret"))
        .await
        .expect("store reachable");
    assert_eq!(
        accepted,
        AuthenticationOutcome::Authenticated {
            tag: UserTag::manager()
        }
    );
    let rejected = service
        .authenticate(&LoginCredentials::new("alice", "wrong"))
        .await
        .expect("store reachable");
    assert_eq!(rejected, AuthenticationOutcome::Rejected);

    tear_down(connection).await;
}

#[tokio::test]
async fn disconnect_is_idempotent() {
    let Some(connection) = connect().await else {
        return;
    };
    connection
        .database()
        .drop()
        .await
        .expect("drop test database");

    assert!(!connection.is_closed());
    connection.disconnect().await;
    connection.disconnect().await;
    assert!(connection.is_closed());
}
