//! Layout of the `spz2ply` toolchain directory.
//!
//! The toolchain lives in a directory named [`SPZ2PLY_DIR`] next to the host's
//! own installation directory:
//!
//! ```text
//! <root>/
//!   native-host/grabby-native-host   (this executable)
//!   spz2ply/
//!     import/  export/  node_modules/
//!     package.json  auto-convert.js  run.bat
//! ```

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use crate::error::{io_err, CoreError};

pub const SPZ2PLY_DIR: &str = "spz2ply";
pub const IMPORT_DIR: &str = "import";
pub const EXPORT_DIR: &str = "export";
pub const NODE_MODULES_DIR: &str = "node_modules";
pub const PACKAGE_JSON: &str = "package.json";
pub const AUTO_CONVERT_SCRIPT: &str = "auto-convert.js";
pub const RUN_SCRIPT: &str = "run.bat";

/// Extension of the files waiting for conversion in [`IMPORT_DIR`].
pub const SPZ_EXTENSION: &str = "spz";
/// Extension of the converted files in [`EXPORT_DIR`].
pub const PLY_EXTENSION: &str = "ply";

/// Toolchain root for a host installed in `install_dir`.
///
/// A filesystem root has no parent; it then stands in for its own parent.
pub fn spz2ply_root(install_dir: &Path) -> PathBuf {
    install_dir
        .parent()
        .unwrap_or(install_dir)
        .join(SPZ2PLY_DIR)
}

/// Toolchain root derived from the location of the running executable.
pub fn default_spz2ply_root() -> Result<PathBuf, CoreError> {
    let exe = std::env::current_exe().map_err(|e| io_err("current executable", e))?;
    let install_dir = exe
        .parent()
        .ok_or_else(|| CoreError::InstallDirNotFound { exe: exe.clone() })?;
    Ok(spz2ply_root(install_dir))
}

pub fn import_dir(root: &Path) -> PathBuf {
    root.join(IMPORT_DIR)
}

pub fn export_dir(root: &Path) -> PathBuf {
    root.join(EXPORT_DIR)
}

pub fn node_modules_dir(root: &Path) -> PathBuf {
    root.join(NODE_MODULES_DIR)
}

pub fn package_json_path(root: &Path) -> PathBuf {
    root.join(PACKAGE_JSON)
}

pub fn auto_convert_path(root: &Path) -> PathBuf {
    root.join(AUTO_CONVERT_SCRIPT)
}

pub fn run_script_path(root: &Path) -> PathBuf {
    root.join(RUN_SCRIPT)
}

/// Whether `path` exists, following symlinks.
///
/// Absence (including a non-directory somewhere along the path) is `Ok(false)`;
/// any other failure, such as a permission error, is returned.
pub fn path_exists(path: &Path) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(err) if is_absent(&err) => Ok(false),
        Err(err) => Err(err),
    }
}

/// Errors that mean "nothing there" rather than "could not look".
pub fn is_absent(err: &io::Error) -> bool {
    matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}
