//! Shared MongoDB driver error mapping for the repositories.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use tracing::debug;

/// Server error code for unique index violations.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Map a driver error into a repository-specific error.
///
/// Unique index violations map to `duplicate`; failures to reach or
/// authenticate against the deployment map to `connection`; everything else
/// (command failures, undecodable documents) maps to `query`.
pub(super) fn map_mongo_error<E, D, C, Q>(
    error: MongoError,
    duplicate: D,
    connection: C,
    query: Q,
) -> E
where
    D: FnOnce() -> E,
    C: FnOnce(String) -> E,
    Q: FnOnce(String) -> E,
{
    debug!(error = %error, "mongodb operation failed");

    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            duplicate()
        }
        ErrorKind::Command(command_error) if command_error.code == DUPLICATE_KEY_CODE => {
            duplicate()
        }
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::Authentication { .. }
        | ErrorKind::DnsResolve { .. } => connection(error.to_string()),
        _ => query(error.to_string()),
    }
}
