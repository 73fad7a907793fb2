use crate::errors::AppResult;
use crate::models::employee::Employee;
use rusqlite::{Connection, OptionalExtension, Row, params};

const EMPLOYEE_COLUMNS: &str = "id, name, email, organization_id, team_id, is_admin,
     email_verified, deactivated, created_at";

pub fn map_row(row: &Row) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        organization_id: row.get("organization_id")?,
        team_id: row.get("team_id")?,
        is_admin: row.get::<_, i32>("is_admin")? == 1,
        email_verified: row.get::<_, i32>("email_verified")? == 1,
        deactivated: row.get("deactivated")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_employee(conn: &Connection, e: &Employee) -> AppResult<()> {
    conn.execute(
        "INSERT INTO employees (id, name, email, organization_id, team_id, is_admin,
                                email_verified, deactivated, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            e.id,
            e.name,
            e.email,
            e.organization_id,
            e.team_id,
            if e.is_admin { 1 } else { 0 },
            if e.email_verified { 1 } else { 0 },
            e.deactivated,
            e.created_at,
        ],
    )?;
    Ok(())
}

pub fn find_employee(conn: &Connection, employee_id: &str) -> AppResult<Option<Employee>> {
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1");
    let emp = conn.query_row(&sql, [employee_id], map_row).optional()?;
    Ok(emp)
}

pub fn email_taken(conn: &Connection, email: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM employees WHERE email = ?1 LIMIT 1")?;
    Ok(stmt.exists([email])?)
}

pub fn organization_has_employees(conn: &Connection, organization_id: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM employees WHERE organization_id = ?1 LIMIT 1")?;
    Ok(stmt.exists([organization_id])?)
}

pub fn set_email_verified(conn: &Connection, employee_id: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE employees SET email_verified = 1 WHERE id = ?1",
        [employee_id],
    )?)
}

/// Returns 0 when the employee is already deactivated.
pub fn set_deactivated(conn: &Connection, employee_id: &str, at: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE employees SET deactivated = ?1 WHERE id = ?2 AND deactivated IS NULL",
        params![at, employee_id],
    )?)
}

/// Returns 0 when the employee is not deactivated.
pub fn clear_deactivated(conn: &Connection, employee_id: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE employees SET deactivated = NULL WHERE id = ?1 AND deactivated IS NOT NULL",
        [employee_id],
    )?)
}

pub fn assign_project(conn: &Connection, employee_id: &str, project_id: &str) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO employee_projects (employee_id, project_id) VALUES (?1, ?2)",
        [employee_id, project_id],
    )?;
    Ok(())
}

pub fn assign_task(conn: &Connection, employee_id: &str, task_id: &str) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO task_employees (task_id, employee_id) VALUES (?1, ?2)",
        [task_id, employee_id],
    )?;
    Ok(())
}

pub fn is_assigned_to_project(conn: &Connection, employee_id: &str, project_id: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare(
        "SELECT 1 FROM employee_projects WHERE employee_id = ?1 AND project_id = ?2",
    )?;
    Ok(stmt.exists([employee_id, project_id])?)
}

pub fn is_assigned_to_task(conn: &Connection, employee_id: &str, task_id: &str) -> AppResult<bool> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM task_employees WHERE employee_id = ?1 AND task_id = ?2")?;
    Ok(stmt.exists([employee_id, task_id])?)
}

pub fn count_projects(conn: &Connection, employee_id: &str) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM employee_projects WHERE employee_id = ?1",
        [employee_id],
        |row| row.get(0),
    )?)
}

pub fn count_tasks(conn: &Connection, employee_id: &str) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM task_employees WHERE employee_id = ?1",
        [employee_id],
        |row| row.get(0),
    )?)
}
