use crate::db::filter::Conditions;
use crate::errors::{AppError, AppResult};
use crate::models::screenshot::Screenshot;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};
use std::collections::BTreeMap;

const SCREENSHOT_COLUMNS: &str = "id, site, productivity, timestamp, employee_id, team_id,
     organization_id, project_id, task_id, shift_id, system_permissions, next, image_url";

pub fn map_row(row: &Row) -> rusqlite::Result<Screenshot> {
    let perms_str: String = row.get("system_permissions")?;
    let system_permissions: BTreeMap<String, String> =
        serde_json::from_str(&perms_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::Json(e)),
            )
        })?;

    Ok(Screenshot {
        id: row.get("id")?,
        site: row.get("site")?,
        productivity: row.get("productivity")?,
        timestamp: row.get("timestamp")?,
        employee_id: row.get("employee_id")?,
        team_id: row.get("team_id")?,
        organization_id: row.get("organization_id")?,
        project_id: row.get("project_id")?,
        task_id: row.get("task_id")?,
        shift_id: row.get("shift_id")?,
        system_permissions,
        next: row.get("next")?,
        image_url: row.get("image_url")?,
    })
}

pub fn insert_screenshot(conn: &Connection, s: &Screenshot) -> AppResult<()> {
    let perms = serde_json::to_string(&s.system_permissions)?;
    conn.execute(
        "INSERT INTO screenshots (id, site, productivity, timestamp, employee_id, team_id,
                                  organization_id, project_id, task_id, shift_id,
                                  system_permissions, next, image_url)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            s.id,
            s.site,
            s.productivity,
            s.timestamp,
            s.employee_id,
            s.team_id,
            s.organization_id,
            s.project_id,
            s.task_id,
            s.shift_id,
            perms,
            s.next,
            s.image_url,
        ],
    )?;
    Ok(())
}

/// Screenshot by id, restricted to one organization.
pub fn find_screenshot(
    conn: &Connection,
    screenshot_id: &str,
    organization_id: &str,
) -> AppResult<Option<Screenshot>> {
    let sql = format!(
        "SELECT {SCREENSHOT_COLUMNS} FROM screenshots WHERE id = ?1 AND organization_id = ?2"
    );
    let shot = conn
        .query_row(&sql, [screenshot_id, organization_id], map_row)
        .optional()?;
    Ok(shot)
}

pub fn delete_screenshot(conn: &Connection, screenshot_id: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM screenshots WHERE id = ?1", [screenshot_id])?)
}

/// Screenshots matching `cond`, newest first; equal timestamps by id.
pub fn query_screenshots(conn: &Connection, cond: &Conditions, limit: i64) -> AppResult<Vec<Screenshot>> {
    let (where_sql, mut values) = cond.to_sql();
    values.push(limit.into());

    let sql = format!(
        "SELECT {SCREENSHOT_COLUMNS} FROM screenshots {where_sql}
         ORDER BY timestamp DESC, id ASC
         LIMIT ?"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_screenshots(conn: &Connection, cond: &Conditions) -> AppResult<i64> {
    let (where_sql, values) = cond.to_sql();
    let sql = format!("SELECT COUNT(*) FROM screenshots {where_sql}");
    let total = conn.query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;
    Ok(total)
}
