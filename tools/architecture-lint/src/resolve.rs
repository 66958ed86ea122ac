//! Maps source files to module paths and collects the paths they reference.

use std::collections::BTreeSet;
use std::path::{Component, Path};

use syn::visit::{self, Visit};

/// Library name of the linted crate, as the binary target spells it.
pub(crate) const CRATE_NAME: &str = "tenant_access";

/// Something a source file names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Reference {
    /// Item inside the linted crate, as segments from the crate root.
    Internal(Vec<String>),
    /// Leading segment of a multi-segment path outside the crate.
    External(String),
}

/// Module path of a file under `src/`.
///
/// `outbound/persistence/mod.rs` and `outbound/persistence.rs` both map to
/// `outbound::persistence`; `lib.rs` maps to the crate root.
pub(crate) fn module_path(file: &Path) -> Option<Vec<String>> {
    let mut segments = file
        .components()
        .map(|component| match component {
            Component::Normal(part) => part.to_str().map(str::to_owned),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    let file_name = segments.pop()?;
    let stem = file_name.strip_suffix(".rs")?;
    match stem {
        "mod" => {}
        "lib" if segments.is_empty() => {}
        _ => segments.push(stem.to_owned()),
    }
    Some(segments)
}

/// Every reference made by `file`, resolved relative to `module`.
///
/// Inline `mod` blocks shift the scope that `self` and `super` resolve
/// against.
pub(crate) fn references(module: &[String], file: &syn::File) -> BTreeSet<Reference> {
    let mut collector = ReferenceCollector {
        scope: module.to_vec(),
        found: BTreeSet::new(),
    };
    collector.visit_file(file);
    collector.found
}

fn resolve(scope: &[String], segments: Vec<String>) -> Option<Reference> {
    let mut rest = segments.into_iter().peekable();
    let first = rest.next()?;
    let mut base = match first.as_str() {
        "crate" | CRATE_NAME => Vec::new(),
        "self" => scope.to_vec(),
        "super" => scope.split_last().map(|(_, parent)| parent.to_vec())?,
        // Single identifiers are locals, prelude items, or macros.
        _ => return rest.peek().is_some().then(|| Reference::External(first.clone())),
    };
    while rest.next_if(|segment| segment == "super").is_some() {
        base.pop()?;
    }
    base.extend(rest);
    Some(Reference::Internal(base))
}

struct ReferenceCollector {
    scope: Vec<String>,
    found: BTreeSet<Reference>,
}

impl ReferenceCollector {
    fn record(&mut self, segments: Vec<String>) {
        if let Some(reference) = resolve(&self.scope, segments) {
            self.found.insert(reference);
        }
    }

    fn record_use(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use(&path.tree, prefix);
                prefix.pop();
            }
            syn::UseTree::Name(syn::UseName { ident })
            | syn::UseTree::Rename(syn::UseRename { ident, .. }) => {
                let mut segments = prefix.clone();
                if ident != "self" {
                    segments.push(ident.to_string());
                }
                self.record(segments);
            }
            syn::UseTree::Glob(_) => self.record(prefix.clone()),
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use(item, prefix);
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for ReferenceCollector {
    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use(&node.tree, &mut Vec::new());
    }

    fn visit_path(&mut self, node: &'ast syn::Path) {
        self.record(
            node.segments
                .iter()
                .map(|segment| segment.ident.to_string())
                .collect(),
        );
        visit::visit_path(self, node);
    }

    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        self.scope.push(node.ident.to_string());
        visit::visit_item_mod(self, node);
        self.scope.pop();
    }
}
