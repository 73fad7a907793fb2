use predicates::str::contains;
use serde_json::Value;

mod common;
use common::{rti, setup_test_db};

fn json_out(db: &str, args: &[&str]) -> Value {
    let out = rti()
        .args(["--db", db])
        .args(args)
        .output()
        .expect("failed to run shiftlog");
    assert!(
        out.status.success(),
        "{:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).expect("stdout is JSON")
}

fn id_of(v: &Value) -> String {
    v["id"].as_str().expect("id").to_string()
}

/// Init a DB with a verified admin and a verified user assigned to project p1.
fn bootstrap(name: &str) -> (String, String, String) {
    let db = setup_test_db(name);

    rti().args(["--db", &db, "--test", "init"]).assert().success();

    let admin = json_out(
        &db,
        &["employee", "add", "--org", "acme", "--name", "Root", "--email", "root@acme.test", "--admin"],
    );
    let admin_id = id_of(&admin);
    json_out(&db, &["--as", &admin_id, "employee", "verify", &admin_id]);

    let user = json_out(
        &db,
        &["--as", &admin_id, "employee", "add", "--name", "Ada", "--email", "ada@acme.test", "--team", "t-red"],
    );
    let user_id = id_of(&user);

    (db, admin_id, user_id)
}

#[test]
fn test_unverified_user_cannot_track_time() {
    let (db, admin_id, user_id) = bootstrap("cli_unverified");

    rti()
        .args(["--db", &db, "--as", &user_id, "shift", "start"])
        .assert()
        .failure()
        .code(3)
        .stderr(contains("Email not verified"));

    json_out(&db, &["--as", &admin_id, "employee", "verify", &user_id]);
    json_out(&db, &["--as", &user_id, "shift", "start"]);
}

#[test]
fn test_shift_start_end_flow() {
    let (db, admin_id, user_id) = bootstrap("cli_shift_flow");
    json_out(&db, &["--as", &admin_id, "employee", "verify", &user_id]);
    json_out(&db, &["--as", &admin_id, "employee", "assign", &user_id, "--project", "p1"]);

    rti()
        .args(["--db", &db, "--as", &user_id, "shift", "start", "--project", "p2"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("not assigned to this project"));

    let started = json_out(
        &db,
        &["--as", &user_id, "shift", "start", "--project", "p1", "--tz-offset", "-3600000"],
    );
    let start = started["start"].as_i64().unwrap();
    assert_eq!(started["startTranslated"].as_i64(), Some(start - 3_600_000));
    assert_eq!(started["teamId"], "t-red");
    assert_eq!(started["type"], "manual");
    assert!(started["end"].is_null());

    rti()
        .args(["--db", &db, "--as", &user_id, "shift", "start"])
        .assert()
        .failure()
        .code(5)
        .stderr(contains("active shift exists"));

    let active = json_out(&db, &["--as", &user_id, "shift", "active"]);
    assert_eq!(active["id"], started["id"]);

    let ended = json_out(&db, &["--as", &user_id, "shift", "end"]);
    let end = ended["end"].as_i64().unwrap();
    assert_eq!(ended["endTranslated"].as_i64(), Some(end - 3_600_000));

    rti()
        .args(["--db", &db, "--as", &user_id, "shift", "end"])
        .assert()
        .failure()
        .code(4);

    rti()
        .args(["--db", &db, "--as", &user_id, "shift", "end", "--id", &id_of(&started)])
        .assert()
        .failure()
        .code(5)
        .stderr(contains("already ended"));

    let history = json_out(&db, &["--as", &user_id, "shift", "history"]);
    assert_eq!(history.as_array().map(Vec::len), Some(1));

    rti()
        .args(["--db", &db, "--as", &user_id, "shift", "history", "--employee", &admin_id])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_admin_analytics_and_screenshots() {
    let (db, admin_id, user_id) = bootstrap("cli_admin_views");
    json_out(&db, &["--as", &admin_id, "employee", "verify", &user_id]);

    json_out(&db, &["--as", &user_id, "shift", "start"]);
    json_out(&db, &["--as", &user_id, "shift", "end"]);

    rti()
        .args(["--db", &db, "--as", &user_id, "analytics", "project-time", "--from", "0", "--to", "9999999999999"])
        .assert()
        .failure()
        .code(3)
        .stderr(contains("Not enough permissions"));

    let analytics = json_out(
        &db,
        &["--as", &admin_id, "analytics", "project-time", "--from", "0", "--to", "9999999999999"],
    );
    assert_eq!(analytics["totalShifts"], 1);

    for ts in ["1000", "2000", "3000"] {
        json_out(&db, &["--as", &user_id, "screenshot", "add", "--timestamp", ts]);
    }

    let first = json_out(
        &db,
        &["--as", &admin_id, "screenshot", "page", "--from", "0", "--to", "5000", "--limit", "2"],
    );
    assert_eq!(first["total"], 3);
    assert_eq!(first["hasMore"], true);
    assert_eq!(first["data"][0]["timestamp"], 3000);
    let next = first["next"].as_str().unwrap().to_string();

    let second = json_out(
        &db,
        &["--as", &admin_id, "screenshot", "page", "--from", "0", "--to", "5000", "--limit", "2", "--next", &next],
    );
    assert_eq!(second["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(second["data"][0]["timestamp"], 1000);
    assert!(second["next"].is_null());

    let bogus = json_out(
        &db,
        &["--as", &admin_id, "screenshot", "page", "--from", "0", "--to", "5000", "--limit", "2", "--next", "bogus"],
    );
    assert_eq!(bogus["data"], first["data"]);

    let victim = first["data"][0]["id"].as_str().unwrap().to_string();
    rti()
        .args(["--db", &db, "--as", &user_id, "screenshot", "del", &victim])
        .assert()
        .failure()
        .code(3);
    rti()
        .args(["--db", &db, "--as", &admin_id, "screenshot", "del", &victim])
        .assert()
        .success()
        .stdout(contains("deleted successfully"));

    let mine = json_out(&db, &["--as", &user_id, "screenshot", "list", "--from", "0", "--to", "5000"]);
    assert_eq!(mine.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_missing_actor_and_second_bootstrap() {
    let (db, _admin_id, _user_id) = bootstrap("cli_actor");

    rti()
        .args(["--db", &db, "shift", "active"])
        .assert()
        .failure()
        .code(3)
        .stderr(contains("--as"));

    rti()
        .args(["--db", &db, "employee", "add", "--org", "acme", "--name", "Mallory", "--email", "m@acme.test"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_log_print_lists_operations() {
    let (db, admin_id, user_id) = bootstrap("cli_log");
    json_out(&db, &["--as", &admin_id, "employee", "verify", &user_id]);
    json_out(&db, &["--as", &user_id, "shift", "start"]);

    rti()
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("shift_start"))
        .stdout(contains("employee_add"))
        .stdout(contains("migration_applied"));
}

#[test]
fn test_config_print_shows_database_override() {
    let db = setup_test_db("cli_config");

    rti()
        .args(["--db", &db, "config", "--print"])
        .assert()
        .success()
        .stdout(contains("busy_timeout_ms"))
        .stdout(contains("cli_config"));
}

#[test]
fn test_screenshot_list_all_is_admin_only() {
    let (db, admin_id, user_id) = bootstrap("cli_list_all");
    json_out(&db, &["--as", &admin_id, "employee", "verify", &user_id]);

    json_out(&db, &["--as", &user_id, "screenshot", "add", "--timestamp", "1000"]);
    json_out(&db, &["--as", &admin_id, "screenshot", "add", "--timestamp", "2000"]);

    let all = json_out(
        &db,
        &["--as", &admin_id, "screenshot", "list", "--from", "0", "--to", "5000", "--all"],
    );
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    let by_team = json_out(
        &db,
        &["--as", &admin_id, "screenshot", "list", "--from", "0", "--to", "5000", "--all", "--team", "t-red"],
    );
    assert_eq!(by_team.as_array().map(Vec::len), Some(1));
    assert_eq!(by_team[0]["employeeId"], user_id.as_str());

    rti()
        .args(["--db", &db, "--as", &user_id, "screenshot", "list", "--from", "0", "--to", "5000", "--all"])
        .assert()
        .failure()
        .code(3);
    rti()
        .args(["--db", &db, "--as", &user_id, "screenshot", "list", "--from", "0", "--to", "5000", "--employee", &admin_id])
        .assert()
        .failure()
        .code(3);

    rti()
        .args(["--db", &db, "--as", &admin_id, "screenshot", "list", "--from", "0", "--to", "5000", "--all", "--limit", "101"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_employee_stats_activate_and_self_deactivation() {
    let (db, admin_id, user_id) = bootstrap("cli_employee_admin");
    json_out(&db, &["--as", &admin_id, "employee", "verify", &user_id]);
    json_out(&db, &["--as", &user_id, "shift", "start"]);

    let own = json_out(&db, &["--as", &user_id, "employee", "stats"]);
    assert_eq!(own["activeShifts"], 1);
    assert_eq!(own["totalTimeLogged"], 0);

    let seen_by_admin = json_out(&db, &["--as", &admin_id, "employee", "stats", &user_id]);
    assert_eq!(seen_by_admin, own);

    rti()
        .args(["--db", &db, "--as", &user_id, "employee", "stats", &admin_id])
        .assert()
        .failure()
        .code(3);

    rti()
        .args(["--db", &db, "--as", &admin_id, "employee", "deactivate", &admin_id])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Cannot deactivate yourself"));

    json_out(&db, &["--as", &admin_id, "employee", "deactivate", &user_id]);
    rti()
        .args(["--db", &db, "--as", &user_id, "shift", "active"])
        .assert()
        .failure()
        .code(3);

    let back = json_out(&db, &["--as", &admin_id, "employee", "activate", &user_id]);
    assert!(back["deactivated"].is_null());
    json_out(&db, &["--as", &user_id, "shift", "active"]);
}
