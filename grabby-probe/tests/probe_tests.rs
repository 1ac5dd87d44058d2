//! Status probe tests against throwaway toolchain trees.
//!
//! Each test builds its own `TempDir` — no shared state.

use std::fs;
use std::path::{Path, PathBuf};

use grabby_probe::{probe_status, ProbeError};
use rstest::rstest;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const MARKERS: [&str; 6] = [
    "import",
    "export",
    "node_modules",
    "package.json",
    "auto-convert.js",
    "run.bat",
];

/// Build a complete `spz2ply` tree inside a fresh tempdir and return its root.
fn full_toolchain(home: &TempDir) -> PathBuf {
    let root = home.path().join("spz2ply");
    for dir in ["import", "export", "node_modules"] {
        fs::create_dir_all(root.join(dir)).expect("create dir");
    }
    for file in ["package.json", "auto-convert.js", "run.bat"] {
        fs::write(root.join(file), b"").expect("write marker");
    }
    root
}

fn touch_many(dir: &Path, extension: &str, n: usize) {
    for i in 0..n {
        fs::write(dir.join(format!("scene{i}.{extension}")), b"").expect("write fixture");
    }
}

fn remove_marker(root: &Path, marker: &str) {
    let path = root.join(marker);
    if path.is_dir() {
        fs::remove_dir_all(&path).expect("remove dir");
    } else {
        fs::remove_file(&path).expect("remove file");
    }
}

// ---------------------------------------------------------------------------
// Complete and missing trees
// ---------------------------------------------------------------------------

#[test]
fn complete_toolchain_is_available_with_counts() {
    let home = TempDir::new().expect("home");
    let root = full_toolchain(&home);
    touch_many(&root.join("import"), "spz", 3);
    touch_many(&root.join("export"), "ply", 5);

    let s = probe_status(&root).expect("probe");
    assert!(s.available);
    assert!(s.directory_exists);
    assert!(s.import_dir_exists && s.export_dir_exists);
    assert!(s.node_modules_exists && s.package_json_exists);
    assert!(s.auto_convert_exists && s.run_bat_exists);
    assert_eq!(s.import_files_count, 3);
    assert_eq!(s.export_files_count, 5);
    assert!(s.error.is_none());
}

#[test]
fn missing_root_is_all_false_without_error() {
    let home = TempDir::new().expect("home");
    let s = probe_status(&home.path().join("spz2ply")).expect("probe");

    assert!(!s.available);
    assert!(!s.directory_exists);
    assert!(!s.import_dir_exists && !s.export_dir_exists);
    assert!(!s.node_modules_exists && !s.package_json_exists);
    assert!(!s.auto_convert_exists && !s.run_bat_exists);
    assert_eq!(s.import_files_count, 0);
    assert_eq!(s.export_files_count, 0);
    assert!(s.error.is_none());
}

#[test]
fn empty_root_has_only_directory_flag() {
    let home = TempDir::new().expect("home");
    let root = home.path().join("spz2ply");
    fs::create_dir(&root).expect("mkdir");

    let s = probe_status(&root).expect("probe");
    assert!(s.directory_exists);
    assert!(!s.available);
    assert!(!s.import_dir_exists);
    assert!(!s.run_bat_exists);
}

#[rstest]
#[case("import")]
#[case("export")]
#[case("node_modules")]
#[case("package.json")]
#[case("auto-convert.js")]
#[case("run.bat")]
fn removing_one_marker_makes_toolchain_unavailable(#[case] marker: &str) {
    let home = TempDir::new().expect("home");
    let root = full_toolchain(&home);
    remove_marker(&root, marker);

    let s = probe_status(&root).expect("probe");
    assert!(!s.available, "{marker} missing must flip availability");
    assert!(s.directory_exists);

    let present = [
        s.import_dir_exists,
        s.export_dir_exists,
        s.node_modules_exists,
        s.package_json_exists,
        s.auto_convert_exists,
        s.run_bat_exists,
    ];
    for (name, flag) in MARKERS.iter().zip(present) {
        assert_eq!(flag, *name != marker, "flag for {name}");
    }
}

#[test]
fn missing_import_dir_zeroes_its_count_only() {
    let home = TempDir::new().expect("home");
    let root = full_toolchain(&home);
    touch_many(&root.join("export"), "ply", 2);
    remove_marker(&root, "import");

    let s = probe_status(&root).expect("probe");
    assert_eq!(s.import_files_count, 0);
    assert_eq!(s.export_files_count, 2);
}

#[test]
fn markers_may_be_any_entry_kind() {
    let home = TempDir::new().expect("home");
    let root = full_toolchain(&home);
    // A directory named like the script still satisfies the existence check.
    remove_marker(&root, "run.bat");
    fs::create_dir(root.join("run.bat")).expect("mkdir");

    assert!(probe_status(&root).expect("probe").available);
}

#[test]
fn counts_never_unlock_availability() {
    let home = TempDir::new().expect("home");
    let root = full_toolchain(&home);
    touch_many(&root.join("import"), "spz", 4);
    remove_marker(&root, "node_modules");

    let s = probe_status(&root).expect("probe");
    assert_eq!(s.import_files_count, 4);
    assert!(!s.available);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn uninspectable_root_is_an_error() {
    let err = probe_status(Path::new("spz\0ply")).expect_err("nul byte in path");
    let ProbeError::Io { path, .. } = &err;
    assert_eq!(path, Path::new("spz\0ply"));
    assert!(err.to_string().starts_with("I/O error at"));
}

#[cfg(unix)]
#[test]
fn failure_after_root_check_discards_partial_results() {
    let home = TempDir::new().expect("home");
    let root = full_toolchain(&home);
    remove_marker(&root, "import");
    // A self-referencing link: inspecting it fails with ELOOP, which is not absence.
    std::os::unix::fs::symlink("import", root.join("import")).expect("symlink loop");

    let err = probe_status(&root).expect_err("symlink loop");
    let ProbeError::Io { path, .. } = &err;
    assert_eq!(path, &root.join("import"));
}
