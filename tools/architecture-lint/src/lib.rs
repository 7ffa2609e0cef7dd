//! Repo-local architectural lint for the TaskFlow backend crate.
//!
//! The crate is laid out as a hexagon: `domain` holds entities, ports and
//! services; `inbound` drives the domain over HTTP; `outbound` implements
//! ports over PostgreSQL, memory and crypto libraries; `client` talks to the
//! HTTP API from the other side of the wire. Each layer may only reach the
//! modules and third-party crates its role needs. This lint parses every
//! source file under those directories and reports imports that cross a
//! forbidden boundary.
//!
//! Run it with `cargo run -p architecture-lint`.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Library crate name as seen from binaries, tests and doctests.
pub const CRATE_NAME: &str = "taskflow";

const WEB_CRATES: &[&str] = &["actix", "actix_http", "actix_service", "actix_web", "awc"];
const DATABASE_CRATES: &[&str] = &["bb8", "diesel", "diesel_async", "diesel_migrations"];
const CRYPTO_CRATES: &[&str] = &["argon2", "jsonwebtoken"];
const HTTP_CLIENT_CRATES: &[&str] = &["reqwest"];
const API_DOC_CRATES: &[&str] = &["utoipa", "utoipa_swagger_ui"];

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    /// Human-readable description of the violated rule.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Filesystem traversal or reading failed.
    Io(io::Error),
    /// Rust source parsing failed, or the file sits outside a known layer.
    Parse { file: PathBuf, message: String },
    /// One or more boundary violations were found.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error while linting architecture: {err}"),
            Self::Parse { file, message } => write!(
                f,
                "cannot lint {}: {message}",
                file.display()
            ),
            Self::Violations(violations) => {
                writeln!(f, "Architecture boundary violations:")?;
                for violation in violations {
                    writeln!(f, "- {violation}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Lint the backend crate sources on disk.
///
/// `backend_dir` must be the `backend/` directory at the repository root.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = backend_dir.join("src");
    let sources = collect_lint_sources(&src_dir)?;
    lint_sources(&sources)
}

/// Lint the provided Rust sources without touching the filesystem.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();

    for source in sources {
        let layer = Layer::infer_from_path(&source.file).ok_or_else(|| {
            ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: "file is not under domain/, inbound/, outbound/ or client/".to_owned(),
            }
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(layer.check(&source.file, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    pub contents: String,
}

/// Top-level module a source file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
    Client,
}

impl Layer {
    const ALL: [Self; 4] = [Self::Domain, Self::Inbound, Self::Outbound, Self::Client];

    const fn dir(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
            Self::Client => "client",
        }
    }

    fn infer_from_path(relative_path: &Path) -> Option<Self> {
        let first = relative_path.components().next()?.as_os_str().to_str()?;
        Self::ALL.into_iter().find(|layer| layer.dir() == first)
    }

    /// Sibling modules this layer must not import.
    fn forbidden_modules(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &["inbound", "outbound", "client", "server"],
            Self::Inbound => &["outbound", "client", "server"],
            Self::Outbound => &["inbound", "client", "server"],
            Self::Client => &["inbound", "outbound", "server"],
        }
    }

    /// Third-party crates this layer must not import.
    fn forbidden_crates(self) -> BTreeSet<&'static str> {
        let groups: &[&[&str]] = match self {
            Self::Domain => &[
                WEB_CRATES,
                DATABASE_CRATES,
                CRYPTO_CRATES,
                HTTP_CLIENT_CRATES,
                API_DOC_CRATES,
            ],
            Self::Inbound => &[DATABASE_CRATES, CRYPTO_CRATES, HTTP_CLIENT_CRATES],
            Self::Outbound => &[WEB_CRATES, HTTP_CLIENT_CRATES, API_DOC_CRATES],
            Self::Client => &[WEB_CRATES, DATABASE_CRATES, CRYPTO_CRATES, API_DOC_CRATES],
        };
        groups.iter().flat_map(|group| group.iter().copied()).collect()
    }

    fn check(self, file: &Path, parsed: &syn::File) -> Vec<Violation> {
        let forbidden_crates = self.forbidden_crates();
        let mut collector = PathCollector::default();
        collector.visit_file(parsed);

        let mut messages = BTreeSet::new();
        for segments in &collector.paths {
            if let Some(module) = internal_module_root(segments)
                .filter(|root| self.forbidden_modules().contains(root))
            {
                messages.insert(format!(
                    "{} module must not depend on crate::{module}",
                    self.dir()
                ));
            }
            if let Some(krate) =
                external_crate_root(segments).filter(|root| forbidden_crates.contains(root))
            {
                messages.insert(format!(
                    "{} module must not depend on external crate `{krate}`",
                    self.dir()
                ));
            }
        }

        messages
            .into_iter()
            .map(|message| Violation {
                file: file.to_path_buf(),
                message,
            })
            .collect()
    }
}

fn is_relative_segment(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

/// First crate-internal module named by `segments`, if the path is internal.
fn internal_module_root(segments: &[String]) -> Option<&str> {
    let first = segments.first()?.as_str();
    let is_layer = |name: &str| {
        Layer::ALL.iter().any(|layer| layer.dir() == name) || name == "server"
    };
    if is_layer(first) {
        return Some(first);
    }
    let start = if is_relative_segment(first) {
        segments
            .iter()
            .position(|segment| !is_relative_segment(segment))?
    } else if first == CRATE_NAME {
        1
    } else {
        return None;
    };
    segments.get(start).map(String::as_str)
}

fn external_crate_root(segments: &[String]) -> Option<&str> {
    let root = segments.first()?.as_str();
    if is_relative_segment(root) || root == CRATE_NAME {
        return None;
    }
    Some(root)
}

/// Every path mentioned in `use` items and expressions.
#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix);
            }
            syn::UseTree::Name(name) => {
                prefix.push(name.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.paths.insert(prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, Vec::new());
    }
}

fn collect_lint_sources(src_dir: &Path) -> Result<Vec<LintSource>, ArchitectureLintError> {
    let mut sources = Vec::new();
    for layer in Layer::ALL {
        let dir = src_dir.join(layer.dir());
        if dir.is_dir() {
            collect_sources_under(src_dir, &dir, &mut sources)?;
        }
    }
    Ok(sources)
}

fn collect_sources_under(
    src_root: &Path,
    current: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in fs::read_dir(current)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_sources_under(src_root, &path, sources)?;
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }

        let relative = path
            .strip_prefix(src_root)
            .map_err(|err| ArchitectureLintError::Parse {
                file: path.clone(),
                message: err.to_string(),
            })?
            .to_path_buf();
        let contents = fs::read_to_string(&path)?;
        sources.push(LintSource {
            file: relative,
            contents,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests;
