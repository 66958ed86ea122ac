//! `tenant-access` entry-point: wires the MongoDB adapters into the access
//! service and runs one command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use tenant_access::domain::AccessService;
use tenant_access::inbound::cli::{Cli, CommandOutcome, execute};
use tenant_access::outbound::crypto::Argon2PasswordHasher;
use tenant_access::outbound::persistence::{
    MongoConnection, MongoManagerRepository, MongoUserRepository,
};
use tenant_access::settings::AccessSettings;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = AccessSettings::load_from_iter([OsString::from("tenant-access")])
        .map_err(|err| eyre!("load settings: {err}"))?;

    let connection = MongoConnection::connect(settings.mongo_config())
        .await
        .wrap_err("connect to credential store")?;
    let outcome = run(&cli, &connection).await;
    connection.disconnect().await;
    let outcome = outcome?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", outcome.message()).wrap_err("write command output")?;

    Ok(if outcome.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run(cli: &Cli, connection: &MongoConnection) -> Result<CommandOutcome> {
    connection
        .ensure_indexes()
        .await
        .wrap_err("ensure unique username indexes")?;

    let hasher = Argon2PasswordHasher::new().wrap_err("configure password hasher")?;
    let service = AccessService::new(
        Arc::new(MongoUserRepository::new(connection)),
        Arc::new(MongoManagerRepository::new(connection)),
        Arc::new(hasher),
    );

    Ok(execute(&cli.command, &service, &service).await)
}
