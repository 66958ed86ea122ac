//! Unit tests for module mapping, path resolution, and the boundary rules.

use std::collections::BTreeSet;
use std::path::Path;

use rstest::rstest;

use crate::resolve::{Reference, module_path, references};
use crate::rules::check;

fn segments(path: &str) -> Vec<String> {
    path.split("::")
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}

fn references_of(module: &str, contents: &str) -> BTreeSet<Reference> {
    let parsed = syn::parse_file(contents).expect("fixture parses");
    references(&segments(module), &parsed)
}

#[rstest]
#[case("lib.rs", "")]
#[case("main.rs", "main")]
#[case("settings.rs", "settings")]
#[case("domain/mod.rs", "domain")]
#[case("outbound/persistence/connection.rs", "outbound::persistence::connection")]
#[case("domain/access_service/tests.rs", "domain::access_service::tests")]
fn files_map_to_module_paths(#[case] file: &str, #[case] expected: &str) {
    assert_eq!(module_path(Path::new(file)), Some(segments(expected)));
}

#[rstest]
#[case("README.md")]
#[case("../lib.rs")]
fn non_module_files_are_unmapped(#[case] file: &str) {
    assert_eq!(module_path(Path::new(file)), None);
}

#[rstest]
fn crate_and_library_name_resolve_to_the_root() {
    let found = references_of(
        "inbound::cli",
        "use crate::domain::user::Username; fn f() { tenant_access::outbound::memory::x(); }",
    );
    assert!(found.contains(&Reference::Internal(segments("domain::user::Username"))));
    assert!(found.contains(&Reference::Internal(segments("outbound::memory::x"))));
}

#[rstest]
fn super_inside_an_inline_module_resolves_against_that_module() {
    let found = references_of(
        "outbound::crypto::argon2_password_hasher",
        "mod tests { use super::*; use super::super::super::settings::Value; }",
    );
    assert!(found.contains(&Reference::Internal(segments(
        "outbound::crypto::argon2_password_hasher"
    ))));
    assert!(found.contains(&Reference::Internal(segments("outbound::settings::Value"))));
}

#[rstest]
fn grouped_imports_record_each_leaf() {
    let found = references_of(
        "domain::access_service",
        "use self::helpers::{self, Helper}; use mongodb::{Client, bson::doc};",
    );
    assert!(found.contains(&Reference::Internal(segments(
        "domain::access_service::helpers"
    ))));
    assert!(found.contains(&Reference::Internal(segments(
        "domain::access_service::helpers::Helper"
    ))));
    assert!(found.contains(&Reference::External("mongodb".to_owned())));
}

#[rstest]
fn single_identifiers_are_not_crate_references() {
    let found = references_of("domain::user", "fn f(value: String) -> Option<String> { Some(value) }");
    assert!(found.is_empty(), "unexpected references: {found:?}");
}

#[rstest]
#[case("settings", "crate::outbound::persistence::MongoConfig")]
#[case("outbound::persistence::connection", "crate::domain::user::User")]
#[case("inbound::cli", "crate::domain::ports::Authenticator")]
#[case("main", "crate::outbound::persistence::MongoConnection")]
fn permitted_module_edges(#[case] module: &str, #[case] target: &str) {
    let found = BTreeSet::from([Reference::Internal(segments(target))]);
    assert!(check(&segments(module), &found).is_empty());
}

#[rstest]
#[case("domain::access_service", "outbound::memory::InMemoryUserRepository", "outbound")]
#[case("domain::ports", "settings::AccessSettings", "settings")]
#[case("inbound::cli", "outbound::persistence::MongoConnection", "outbound")]
#[case("inbound::cli", "settings::AccessSettings", "settings")]
#[case("outbound::persistence::connection", "settings::AccessSettings", "settings")]
#[case("outbound::memory", "outbound::persistence::documents", "outbound::persistence")]
#[case("outbound::crypto", "outbound::memory::InMemoryUserRepository", "outbound::memory")]
#[case("settings", "inbound::cli::Cli", "inbound")]
fn forbidden_module_edges(#[case] module: &str, #[case] target: &str, #[case] forbidden: &str) {
    let found = BTreeSet::from([Reference::Internal(segments(target))]);
    let messages = check(&segments(module), &found);
    assert_eq!(
        messages,
        BTreeSet::from([format!("`{module}` must not depend on `crate::{forbidden}`")]),
    );
}

#[rstest]
#[case("outbound::persistence::connection", "mongodb")]
#[case("outbound::persistence::documents", "bson")]
#[case("outbound::crypto::argon2_password_hasher", "argon2")]
#[case("outbound::crypto::argon2_password_hasher", "rand")]
#[case("inbound::cli", "clap")]
#[case("settings", "ortho_config")]
#[case("main", "color_eyre")]
#[case("domain::access_service", "tracing")]
fn crates_used_at_home(#[case] module: &str, #[case] krate: &str) {
    let found = BTreeSet::from([Reference::External(krate.to_owned())]);
    assert!(check(&segments(module), &found).is_empty());
}

#[rstest]
#[case("domain::user", "mongodb", "`outbound::persistence`")]
#[case("outbound::memory::user_repository", "bson", "`outbound::persistence`")]
#[case("outbound::persistence::connection", "argon2", "`outbound::crypto`")]
#[case("domain::auth", "rand", "`outbound::crypto`")]
#[case("domain::access_service", "clap", "`inbound::cli`")]
#[case("outbound::persistence::connection", "ortho_config", "`settings`")]
#[case("settings", "tracing_subscriber", "the binary entry point")]
fn crates_used_away_from_home(#[case] module: &str, #[case] krate: &str, #[case] home: &str) {
    let found = BTreeSet::from([Reference::External(krate.to_owned())]);
    assert_eq!(
        check(&segments(module), &found),
        BTreeSet::from([format!("`{module}` uses `{krate}`, which is confined to {home}")]),
    );
}
