use crate::db::filter::Conditions;
use crate::errors::{AppError, AppResult};
use crate::models::shift::Shift;
use crate::models::shift_type::ShiftType;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

const SHIFT_COLUMNS: &str = "id, shift_type, start_ms, end_ms, timezone_offset, name, user_name,
     employee_id, team_id, organization_id, project_id, task_id,
     start_translated, end_translated, last_activity_end, last_activity_end_translated";

pub fn map_row(row: &Row) -> rusqlite::Result<Shift> {
    let kind_str: String = row.get("shift_type")?;
    let shift_type = ShiftType::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid shift type: {}", kind_str))),
        )
    })?;

    Ok(Shift {
        id: row.get("id")?,
        shift_type,
        start: row.get("start_ms")?,
        end: row.get("end_ms")?,
        timezone_offset: row.get("timezone_offset")?,
        name: row.get("name")?,
        user_name: row.get("user_name")?,
        employee_id: row.get("employee_id")?,
        team_id: row.get("team_id")?,
        organization_id: row.get("organization_id")?,
        project_id: row.get("project_id")?,
        task_id: row.get("task_id")?,
        start_translated: row.get("start_translated")?,
        end_translated: row.get("end_translated")?,
        last_activity_end: row.get("last_activity_end")?,
        last_activity_end_translated: row.get("last_activity_end_translated")?,
    })
}

pub fn insert_shift(conn: &Connection, s: &Shift) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO shifts (id, shift_type, start_ms, end_ms, timezone_offset, name, user_name,
                             employee_id, team_id, organization_id, project_id, task_id,
                             start_translated, end_translated, last_activity_end,
                             last_activity_end_translated)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            s.id,
            s.shift_type.to_db_str(),
            s.start,
            s.end,
            s.timezone_offset,
            s.name,
            s.user_name,
            s.employee_id,
            s.team_id,
            s.organization_id,
            s.project_id,
            s.task_id,
            s.start_translated,
            s.end_translated,
            s.last_activity_end,
            s.last_activity_end_translated,
        ],
    )?;
    Ok(())
}

/// The open shift of an employee. The partial unique index guarantees at most one.
pub fn find_active_shift(conn: &Connection, employee_id: &str) -> AppResult<Option<Shift>> {
    let sql = format!(
        "SELECT {SHIFT_COLUMNS} FROM shifts WHERE employee_id = ?1 AND end_ms IS NULL LIMIT 1"
    );
    let shift = conn
        .query_row(&sql, [employee_id], map_row)
        .optional()?;
    Ok(shift)
}

pub fn find_shift_for_employee(
    conn: &Connection,
    shift_id: &str,
    employee_id: &str,
) -> AppResult<Option<Shift>> {
    let sql = format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = ?1 AND employee_id = ?2");
    let shift = conn
        .query_row(&sql, [shift_id, employee_id], map_row)
        .optional()?;
    Ok(shift)
}

pub fn find_shift(conn: &Connection, shift_id: &str) -> AppResult<Option<Shift>> {
    let sql = format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = ?1");
    let shift = conn.query_row(&sql, [shift_id], map_row).optional()?;
    Ok(shift)
}

/// Close an open shift. Returns the number of rows changed: 0 when the
/// shift is already closed.
pub fn close_shift(conn: &Connection, shift_id: &str, end: i64, end_translated: i64) -> AppResult<usize> {
    let changed = conn.execute(
        "UPDATE shifts
         SET end_ms = ?1,
             end_translated = ?2,
             last_activity_end = ?1,
             last_activity_end_translated = ?2
         WHERE id = ?3 AND end_ms IS NULL",
        params![end, end_translated, shift_id],
    )?;
    Ok(changed)
}

/// Shifts matching `cond`, most recent start first.
pub fn query_shifts(
    conn: &Connection,
    cond: &Conditions,
    limit: Option<i64>,
    offset: i64,
) -> AppResult<Vec<Shift>> {
    let (where_sql, mut values) = cond.to_sql();

    // LIMIT -1 is "no limit" in SQLite
    values.push(limit.unwrap_or(-1).into());
    values.push(offset.into());

    let sql = format!(
        "SELECT {SHIFT_COLUMNS} FROM shifts {where_sql}
         ORDER BY start_ms DESC, id ASC
         LIMIT ? OFFSET ?"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Summed `end - start` of the shifts matching `cond`; open shifts add nothing.
pub fn sum_shift_time(conn: &Connection, cond: &Conditions) -> AppResult<i64> {
    let (where_sql, values) = cond.to_sql();
    let sql = format!("SELECT COALESCE(SUM(end_ms - start_ms), 0) FROM shifts {where_sql}");
    let total = conn.query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;
    Ok(total)
}

pub fn count_shifts(conn: &Connection, cond: &Conditions) -> AppResult<i64> {
    let (where_sql, values) = cond.to_sql();
    let sql = format!("SELECT COUNT(*) FROM shifts {where_sql}");
    let count = conn.query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;
    Ok(count)
}
