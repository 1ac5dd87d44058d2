//! `available` is the conjunction of the seven marker checks and nothing else.

use grabby_core::{StatusSnapshot, ToolchainChecks};
use rstest::rstest;

fn all_present() -> ToolchainChecks {
    ToolchainChecks {
        directory_exists: true,
        import_dir_exists: true,
        export_dir_exists: true,
        node_modules_exists: true,
        package_json_exists: true,
        auto_convert_exists: true,
        run_bat_exists: true,
        import_files_count: 0,
        export_files_count: 0,
    }
}

#[test]
fn every_marker_present_is_available() {
    let snapshot = StatusSnapshot::from(all_present());
    assert!(snapshot.available);
    assert!(snapshot.error.is_none());
}

#[rstest]
#[case::directory(|c: &mut ToolchainChecks| c.directory_exists = false)]
#[case::import_dir(|c: &mut ToolchainChecks| c.import_dir_exists = false)]
#[case::export_dir(|c: &mut ToolchainChecks| c.export_dir_exists = false)]
#[case::node_modules(|c: &mut ToolchainChecks| c.node_modules_exists = false)]
#[case::package_json(|c: &mut ToolchainChecks| c.package_json_exists = false)]
#[case::auto_convert(|c: &mut ToolchainChecks| c.auto_convert_exists = false)]
#[case::run_bat(|c: &mut ToolchainChecks| c.run_bat_exists = false)]
fn any_missing_marker_is_unavailable(#[case] knock_out: fn(&mut ToolchainChecks)) {
    let mut checks = all_present();
    knock_out(&mut checks);
    let snapshot = StatusSnapshot::from(checks);
    assert!(!snapshot.available);
}

#[rstest]
#[case(0, 0)]
#[case(3, 5)]
#[case(100, 0)]
fn counts_do_not_affect_availability(#[case] spz: usize, #[case] ply: usize) {
    let mut checks = all_present();
    checks.import_files_count = spz;
    checks.export_files_count = ply;
    assert!(StatusSnapshot::from(checks).available);

    checks.run_bat_exists = false;
    assert!(!StatusSnapshot::from(checks).available);
}
