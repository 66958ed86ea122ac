//! Boundary lint for the `tenant-access` crate.
//!
//! Every `.rs` file under `src/` is parsed with `syn`, mapped to its module
//! path, and checked against two rule sets:
//!
//! - layer rules: `domain` reaches no adapter, `inbound` and `outbound` do
//!   not reach each other, the three outbound adapters stay independent, and
//!   only `settings` (and the binary) may reach into `outbound`
//! - crate rules: `mongodb` lives in `outbound::persistence`, `argon2` and
//!   `rand` in `outbound::crypto`, `clap` in `inbound::cli`, `ortho_config`
//!   in `settings`, and the report/subscriber crates in `main.rs` only
//!
//! Run it with `cargo run -p architecture-lint`.

mod resolve;
mod rules;

use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A rule broken by one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `src/`.
    pub file: PathBuf,
    /// Which rule was broken and how.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes of the lint.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// A directory or file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A file path does not correspond to a module.
    #[error("cannot map {} to a module path", .file.display())]
    Unmapped {
        /// Offending path.
        file: PathBuf,
    },
    /// A file is not valid Rust.
    #[error("failed to parse {}: {message}", .file.display())]
    Parse {
        /// Offending path.
        file: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
    /// At least one rule was broken.
    #[error("{} boundary violation(s):{}", .0.len(), render(.0))]
    Violations(Vec<Violation>),
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("\n- {violation}"))
        .collect()
}

/// A Rust source file to lint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `src/`.
    pub file: PathBuf,
    /// File contents.
    pub contents: String,
}

/// Lint every source file of the package rooted at `crate_dir`.
pub fn lint_crate_sources(crate_dir: &Path) -> Result<(), LintError> {
    lint_sources(&read_sources(&crate_dir.join("src"))?)
}

/// Lint in-memory sources.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), LintError> {
    let mut violations = Vec::new();
    for source in sources {
        let module = resolve::module_path(&source.file).ok_or_else(|| LintError::Unmapped {
            file: source.file.clone(),
        })?;
        let parsed = syn::parse_file(&source.contents).map_err(|err| LintError::Parse {
            file: source.file.clone(),
            message: err.to_string(),
        })?;
        let references = resolve::references(&module, &parsed);
        violations.extend(
            rules::check(&module, &references)
                .into_iter()
                .map(|message| Violation {
                    file: source.file.clone(),
                    message,
                }),
        );
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(LintError::Violations(violations))
    }
}

fn read_sources(src_dir: &Path) -> Result<Vec<LintSource>, LintError> {
    let read_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| LintError::Read { path, source }
    };

    let mut pending = vec![src_dir.to_path_buf()];
    let mut sources = Vec::new();
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).map_err(read_error(&dir))? {
            let path = entry.map_err(read_error(&dir))?.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            if path.extension() != Some(OsStr::new("rs")) {
                continue;
            }
            let contents = fs::read_to_string(&path).map_err(read_error(&path))?;
            let file = path
                .strip_prefix(src_dir)
                .map_err(|_| LintError::Unmapped { file: path.clone() })?
                .to_path_buf();
            sources.push(LintSource { file, contents });
        }
    }
    sources.sort_by(|left, right| left.file.cmp(&right.file));
    Ok(sources)
}

#[cfg(test)]
mod tests;
