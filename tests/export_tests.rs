use predicates::str::contains;
use std::fs;

mod common;
use common::{TODAY, TZ, init_db_with_data, setup_test_db, shop, temp_out};

#[test]
fn test_export_load_json() {
    let db_path = setup_test_db("export_load_json");
    let out = temp_out("export_load_json", "json");
    init_db_with_data(&db_path);

    shop()
        .args([
            "--db", &db_path, "--tz", TZ, "export", "--report", "load", "--format", "json", "--file", &out,
            "--today", TODAY,
        ])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let content = fs::read_to_string(&out).expect("read json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("parse json");
    let rows = rows.as_array().expect("array");

    // machines first (ordered by category then name), then the work unit
    assert_eq!(rows.len(), 3);
    let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().expect("name")).collect();
    assert_eq!(names, vec!["Press", "Laser", "Paint booth"]);

    let laser = &rows[1];
    assert_eq!(laser["kind"], "machine");
    assert_eq!(laser["resource_id"], 1);
    assert_eq!(laser["today_pct"], 50);
    assert_eq!(laser["three_day_pct"], 12);
    assert_eq!(laser["week_pct"], 6);
    assert_eq!(laser["status"], "green");

    assert_eq!(rows[2]["kind"], "unit");
    assert_eq!(rows[2]["today_pct"], 0);
    assert_eq!(rows[2]["three_day_pct"], 6);
}

#[test]
fn test_export_schedule_csv() {
    let db_path = setup_test_db("export_schedule_csv");
    let out = temp_out("export_schedule_csv", "csv");
    init_db_with_data(&db_path);

    shop()
        .args([
            "--db", &db_path, "--tz", TZ, "export", "--report", "schedule", "--resource", "machine:1", "--days",
            "1", "--format", "csv", "--file", &out, "--today", TODAY,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read csv");
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(
        lines[0],
        "resource,date,state,start,end,minutes,slot_id,order_id,order_title"
    );
    assert_eq!(
        lines[1],
        "machine:1,2026-10-19,busy,2026-10-19T08:00:00+02:00,2026-10-19T12:00:00+02:00,240,1,1,Gate frame"
    );
    assert_eq!(
        lines[2],
        "machine:1,2026-10-19,free,2026-10-19T12:00:00+02:00,2026-10-19T16:00:00+02:00,240,,,"
    );
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_export_schedule_requires_resource() {
    let db_path = setup_test_db("export_schedule_no_res");
    let out = temp_out("export_schedule_no_res", "csv");
    init_db_with_data(&db_path);

    shop()
        .args(["--db", &db_path, "export", "--report", "schedule", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("--resource"));

    shop()
        .args(["--db", &db_path, "export", "--report", "schedule", "--resource", "lathe:1", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("Invalid resource"));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_data(&db_path);

    shop()
        .args(["--db", &db_path, "export", "--file", "load.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_does_not_overwrite_without_consent() {
    let db_path = setup_test_db("export_overwrite");
    let out = temp_out("export_overwrite", "csv");
    init_db_with_data(&db_path);
    fs::write(&out, "keep me").expect("seed file");

    shop()
        .args(["--db", &db_path, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));
    assert_eq!(fs::read_to_string(&out).expect("read"), "keep me");

    shop()
        .args(["--db", &db_path, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).expect("read").starts_with("kind,resource_id"));
}
