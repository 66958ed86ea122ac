//! Command-line entry point for the boundary lint.
//!
//! `architecture-lint [CRATE_DIR]` lints `CRATE_DIR/src`; without an
//! argument it lints the workspace's `backend/` package.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

fn default_crate_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("backend")
}

fn main() -> ExitCode {
    let crate_dir = env::args_os()
        .nth(1)
        .map_or_else(default_crate_dir, PathBuf::from);
    match architecture_lint::lint_crate_sources(&crate_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Nothing useful to do if stderr is gone.
            let _ = writeln!(io::stderr().lock(), "{err}");
            ExitCode::FAILURE
        }
    }
}
