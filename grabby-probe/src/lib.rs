//! Toolchain readiness probe for `grabby-probe`.
//!
//! `probe_status(root)` inspects the `spz2ply` directory and reports which of
//! the required markers are present, plus how many files wait in `import/` and
//! how many results sit in `export/`. Nothing is created or modified.

use std::fs;
use std::path::{Path, PathBuf};

use grabby_core::paths::{
    self, auto_convert_path, export_dir, import_dir, node_modules_dir, package_json_path,
    run_script_path, PLY_EXTENSION, SPZ_EXTENSION,
};
use grabby_core::{StatusSnapshot, ToolchainChecks};
use thiserror::Error;
use tracing::debug;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Errors from probing. Absence is never an error; these are failures to look.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ProbeError {
    ProbeError::Io {
        path: path.into(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Probe the toolchain rooted at `root`.
///
/// A missing `root` yields an all-false snapshot. Any failure to inspect a path
/// aborts the whole probe; no partial snapshot is returned.
pub fn probe_status(root: &Path) -> Result<StatusSnapshot, ProbeError> {
    let checks = run_checks(root)?;
    debug!(
        root = %root.display(),
        import_files = checks.import_files_count,
        export_files = checks.export_files_count,
        "toolchain checks complete"
    );
    Ok(StatusSnapshot::from(checks))
}

/// Count entries in `dir` whose name matches `*.<extension>`.
///
/// A missing directory, or a path that is not a directory, counts as zero.
pub fn count_matching(dir: &Path, extension: &str) -> Result<usize, ProbeError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if paths::is_absent(&err) => return Ok(0),
        Err(err) => return Err(io_err(dir, err)),
    };

    let suffix = format!(".{extension}");
    let mut count = 0;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        if entry.file_name().to_string_lossy().ends_with(&suffix) {
            count += 1;
        }
    }
    Ok(count)
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

fn run_checks(root: &Path) -> Result<ToolchainChecks, ProbeError> {
    let mut checks = ToolchainChecks::default();
    if !exists(root)? {
        return Ok(checks);
    }
    checks.directory_exists = true;

    let import = import_dir(root);
    if exists(&import)? {
        checks.import_dir_exists = true;
        checks.import_files_count = count_matching(&import, SPZ_EXTENSION)?;
    }

    let export = export_dir(root);
    if exists(&export)? {
        checks.export_dir_exists = true;
        checks.export_files_count = count_matching(&export, PLY_EXTENSION)?;
    }

    checks.node_modules_exists = exists(&node_modules_dir(root))?;
    checks.package_json_exists = exists(&package_json_path(root))?;
    checks.auto_convert_exists = exists(&auto_convert_path(root))?;
    checks.run_bat_exists = exists(&run_script_path(root))?;

    Ok(checks)
}

fn exists(path: &Path) -> Result<bool, ProbeError> {
    paths::path_exists(path).map_err(|e| io_err(path, e))
}
