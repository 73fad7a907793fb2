use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Employees and their project/task association records.
fn create_employee_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id               TEXT PRIMARY KEY,
            name             TEXT NOT NULL,
            email            TEXT NOT NULL UNIQUE,
            organization_id  TEXT NOT NULL,
            team_id          TEXT,
            is_admin         INTEGER NOT NULL DEFAULT 0,
            email_verified   INTEGER NOT NULL DEFAULT 0,
            deactivated      INTEGER,
            created_at       INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS employee_projects (
            employee_id  TEXT NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            project_id   TEXT NOT NULL,
            PRIMARY KEY (employee_id, project_id)
        );

        CREATE TABLE IF NOT EXISTS task_employees (
            task_id      TEXT NOT NULL,
            employee_id  TEXT NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            PRIMARY KEY (task_id, employee_id)
        );

        CREATE INDEX IF NOT EXISTS idx_employees_org ON employees(organization_id);
        "#,
    )?;
    Ok(())
}

fn create_shifts_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS shifts (
            id                            TEXT PRIMARY KEY,
            shift_type                    TEXT NOT NULL DEFAULT 'manual'
                                          CHECK(shift_type IN ('manual','automated','scheduled','leave')),
            start_ms                      INTEGER NOT NULL,
            end_ms                        INTEGER,
            timezone_offset               INTEGER NOT NULL DEFAULT 0,
            name                          TEXT,
            user_name                     TEXT,
            employee_id                   TEXT NOT NULL REFERENCES employees(id),
            team_id                       TEXT,
            organization_id               TEXT NOT NULL,
            project_id                    TEXT,
            task_id                       TEXT,
            start_translated              INTEGER,
            end_translated                INTEGER,
            last_activity_end             INTEGER,
            last_activity_end_translated  INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_shifts_org_start ON shifts(organization_id, start_ms);
        CREATE INDEX IF NOT EXISTS idx_shifts_employee ON shifts(employee_id);
        "#,
    )?;
    Ok(())
}

fn create_screenshots_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS screenshots (
            id                  TEXT PRIMARY KEY,
            site                TEXT,
            productivity        REAL NOT NULL DEFAULT 0.0,
            timestamp           INTEGER NOT NULL,
            employee_id         TEXT NOT NULL REFERENCES employees(id),
            team_id             TEXT,
            organization_id     TEXT NOT NULL,
            project_id          TEXT,
            task_id             TEXT,
            shift_id            TEXT REFERENCES shifts(id) ON DELETE SET NULL,
            system_permissions  TEXT NOT NULL DEFAULT '{}',
            next                TEXT,
            image_url           TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_screenshots_org_ts ON screenshots(organization_id, timestamp);
        "#,
    )?;
    Ok(())
}

/// At most one open shift per employee, enforced by the store as well as by
/// the lifecycle precondition.
fn migrate_one_active_shift_index(conn: &Connection) -> AppResult<()> {
    let version = "20251019_0002_one_active_shift_per_employee";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    let duplicates: i64 = conn.query_row(
        "SELECT COUNT(*) FROM (
             SELECT employee_id FROM shifts
             WHERE end_ms IS NULL
             GROUP BY employee_id
             HAVING COUNT(*) > 1
         )",
        [],
        |row| row.get(0),
    )?;

    if duplicates > 0 {
        return Err(AppError::Migration(format!(
            "{} employee(s) have more than one open shift; close them before migrating",
            duplicates
        )));
    }

    conn.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_shifts_one_active
         ON shifts(employee_id) WHERE end_ms IS NULL;",
    )?;

    mark_applied(conn, version, "Added partial unique index on open shifts")?;

    success(format!(
        "Migration applied: {} → one open shift per employee",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    let fresh = !table_exists(conn, "shifts")?;

    create_employee_tables(conn)?;
    create_shifts_table(conn)?;
    create_screenshots_table(conn)?;

    if fresh {
        log::info!("created shiftlog schema");
    }

    migrate_one_active_shift_index(conn)?;

    Ok(())
}
