#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use shiftlog::db::employees::{assign_project, assign_task, insert_employee};
use shiftlog::db::initialize::init_db;
use shiftlog::db::pool::DbPool;
use shiftlog::db::screenshots::insert_screenshot;
use shiftlog::db::shifts::insert_shift;
use shiftlog::models::employee::Employee;
use shiftlog::models::screenshot::{Screenshot, default_system_permissions};
use shiftlog::models::shift::Shift;
use shiftlog::models::shift_type::ShiftType;
use shiftlog::utils::ids::new_id;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const ORG: &str = "org-acme";
pub const OTHER_ORG: &str = "org-globex";

pub fn rti() -> Command {
    let mut cmd = cargo_bin_cmd!("shiftlog");
    cmd.env("HOME", env::temp_dir());
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Migrated in-memory database.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

/// Insert a verified employee directly.
pub fn seed_employee(pool: &DbPool, org: &str, team: Option<&str>, is_admin: bool) -> Employee {
    let id = new_id();
    let emp = Employee {
        id: id.clone(),
        name: format!("Employee {}", &id[..6]),
        email: format!("{}@example.com", id),
        organization_id: org.to_string(),
        team_id: team.map(str::to_string),
        is_admin,
        email_verified: true,
        deactivated: None,
        created_at: 0,
    };
    insert_employee(&pool.conn, &emp).expect("insert employee");
    emp
}

pub fn assign(pool: &DbPool, employee_id: &str, project: &str, task: Option<&str>) {
    assign_project(&pool.conn, employee_id, project).expect("assign project");
    if let Some(task) = task {
        assign_task(&pool.conn, employee_id, task).expect("assign task");
    }
}

/// Insert a shift with fixed instants; `end = None` leaves it open.
pub fn seed_shift(
    pool: &DbPool,
    emp: &Employee,
    start: i64,
    end: Option<i64>,
    project: Option<&str>,
    task: Option<&str>,
) -> Shift {
    let shift = Shift {
        id: new_id(),
        shift_type: ShiftType::Manual,
        start,
        end,
        timezone_offset: 0,
        name: None,
        user_name: Some(emp.name.clone()),
        employee_id: emp.id.clone(),
        team_id: emp.team_id.clone(),
        organization_id: emp.organization_id.clone(),
        project_id: project.map(str::to_string),
        task_id: task.map(str::to_string),
        start_translated: Some(start),
        end_translated: end,
        last_activity_end: end,
        last_activity_end_translated: end,
    };
    insert_shift(&pool.conn, &shift).expect("insert shift");
    shift
}

pub fn seed_screenshot(pool: &DbPool, emp: &Employee, timestamp: i64) -> Screenshot {
    let shot = Screenshot {
        id: new_id(),
        site: None,
        productivity: 0.0,
        timestamp,
        employee_id: emp.id.clone(),
        team_id: emp.team_id.clone(),
        organization_id: emp.organization_id.clone(),
        project_id: None,
        task_id: None,
        shift_id: None,
        system_permissions: default_system_permissions(),
        next: None,
        image_url: None,
    };
    insert_screenshot(&pool.conn, &shot).expect("insert screenshot");
    shot
}
