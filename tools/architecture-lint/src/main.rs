//! `architecture-lint [BACKEND_DIR]`
//!
//! Lints `BACKEND_DIR/src`, defaulting to the `backend/` directory of the
//! enclosing Cargo workspace.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stderr = io::stderr().lock();
    let Some(backend_dir) = env::args_os().nth(1).map(PathBuf::from).or_else(default_backend_dir)
    else {
        let _ = writeln!(
            stderr,
            "no Cargo workspace found; pass the backend directory explicitly"
        );
        return ExitCode::FAILURE;
    };
    match architecture_lint::lint_backend_sources(&backend_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(stderr, "{err}");
            ExitCode::FAILURE
        }
    }
}

/// `backend/` under the nearest ancestor whose manifest declares a workspace,
/// searching from the current directory and then from this crate.
fn default_backend_dir() -> Option<PathBuf> {
    let starts = [
        env::current_dir().ok(),
        Some(PathBuf::from(env!("CARGO_MANIFEST_DIR"))),
    ];
    starts
        .iter()
        .flatten()
        .find_map(|start| workspace_root(start))
        .map(|root| root.join("backend"))
}

fn workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| {
            fs::read_to_string(dir.join("Cargo.toml"))
                .is_ok_and(|manifest| manifest.contains("[workspace]"))
        })
        .map(Path::to_path_buf)
}
