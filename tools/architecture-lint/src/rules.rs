//! Boundary rules for `tenant-access`.
//!
//! Module prefixes are written as `a::b` and match that module and
//! everything nested in it.

use std::collections::BTreeSet;

use crate::resolve::Reference;

/// Binary entry point; it wires every layer together and is exempt.
const COMPOSITION_ROOT: &str = "main";

/// Modules `from` must not reach.
struct ModuleRule {
    from: &'static str,
    forbidden: &'static [&'static str],
}

/// External crates that only `homes` may name.
struct CrateRule {
    crates: &'static [&'static str],
    homes: &'static [&'static str],
}

const MODULE_RULES: &[ModuleRule] = &[
    ModuleRule {
        from: "domain",
        forbidden: &["inbound", "outbound", "settings"],
    },
    ModuleRule {
        from: "inbound",
        forbidden: &["outbound", "settings"],
    },
    ModuleRule {
        from: "outbound",
        forbidden: &["inbound", "settings"],
    },
    ModuleRule {
        from: "outbound::persistence",
        forbidden: &["outbound::memory", "outbound::crypto"],
    },
    ModuleRule {
        from: "outbound::memory",
        forbidden: &["outbound::persistence", "outbound::crypto"],
    },
    ModuleRule {
        from: "outbound::crypto",
        forbidden: &["outbound::persistence", "outbound::memory"],
    },
    ModuleRule {
        from: "settings",
        forbidden: &["inbound"],
    },
];

const CRATE_RULES: &[CrateRule] = &[
    CrateRule {
        crates: &["bson", "mongodb"],
        homes: &["outbound::persistence"],
    },
    CrateRule {
        crates: &["argon2", "password_hash", "rand"],
        homes: &["outbound::crypto"],
    },
    CrateRule {
        crates: &["clap"],
        homes: &["inbound::cli"],
    },
    CrateRule {
        crates: &["ortho_config"],
        homes: &["settings"],
    },
    CrateRule {
        crates: &["color_eyre", "tracing_subscriber"],
        homes: &[],
    },
];

fn within<S: AsRef<str>>(module: &[S], prefix: &str) -> bool {
    let parts: Vec<&str> = prefix.split("::").collect();
    module.len() >= parts.len()
        && module
            .iter()
            .zip(&parts)
            .all(|(segment, part)| segment.as_ref() == *part)
}

fn display_module(module: &[String]) -> String {
    if module.is_empty() {
        "crate root".to_owned()
    } else {
        module.join("::")
    }
}

/// Messages for every rule `module` breaks through `references`.
pub(crate) fn check(module: &[String], references: &BTreeSet<Reference>) -> BTreeSet<String> {
    let mut messages = BTreeSet::new();
    if within(module, COMPOSITION_ROOT) {
        return messages;
    }
    let name = display_module(module);

    for reference in references {
        match reference {
            Reference::Internal(target) => {
                for rule in MODULE_RULES.iter().filter(|rule| within(module, rule.from)) {
                    if let Some(forbidden) = rule
                        .forbidden
                        .iter()
                        .find(|forbidden| within(target, forbidden))
                    {
                        messages.insert(format!("`{name}` must not depend on `crate::{forbidden}`"));
                    }
                }
            }
            Reference::External(root) => {
                let Some(rule) = CRATE_RULES
                    .iter()
                    .find(|rule| rule.crates.contains(&root.as_str()))
                else {
                    continue;
                };
                if rule.homes.iter().any(|home| within(module, home)) {
                    continue;
                }
                let confined = if rule.homes.is_empty() {
                    "the binary entry point".to_owned()
                } else {
                    rule.homes
                        .iter()
                        .map(|home| format!("`{home}`"))
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                messages.insert(format!(
                    "`{name}` uses `{root}`, which is confined to {confined}"
                ));
            }
        }
    }
    messages
}
