#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Report zone used by every CLI test, so results do not depend on the host.
pub const TZ: &str = "+02:00";
pub const TODAY: &str = "2026-10-19";

pub fn shop() -> Command {
    cargo_bin_cmd!("shopload")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shopload.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shopload_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run a command against `db_path` in the test zone and expect success.
pub fn ok(db_path: &str, args: &[&str]) {
    shop()
        .args(["--db", db_path, "--tz", TZ])
        .args(args)
        .assert()
        .success();
}

/// Initialize DB and add a small dataset useful for many tests:
///
/// - machine:1 "Laser", 08:00-16:00
/// - machine:2 "Press", no hours configured
/// - unit:1 "Paint booth"
/// - order #1 "Gate frame"
/// - slot #1: Laser, 2026-10-19 08:00-12:00
/// - slot #2: Paint booth, 2026-10-20 09:00-11:00
pub fn init_db_with_data(db_path: &str) {
    shop()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    ok(
        db_path,
        &["resource", "add", "machine", "Laser", "--category", "laser", "--start", "08:00", "--end", "16:00"],
    );
    ok(db_path, &["resource", "add", "machine", "Press", "--category", "bending"]);
    ok(db_path, &["resource", "add", "unit", "Paint booth"]);
    ok(db_path, &["order", "add", "Gate frame", "--deadline", "2026-11-01"]);
    ok(
        db_path,
        &["slot", "add", "--order", "1", "--machine", "1", "--start", "2026-10-19 08:00", "--end", "2026-10-19 12:00"],
    );
    ok(
        db_path,
        &["slot", "add", "--order", "1", "--unit", "1", "--start", "2026-10-20 09:00", "--end", "2026-10-20 11:00"],
    );
}
