use crate::core::shift::ShiftLogic;
use crate::db::employees::find_employee;
use crate::db::filter::{Conditions, Predicate};
use crate::db::log::ttlog_quiet;
use crate::db::screenshots::{
    count_screenshots, delete_screenshot, find_screenshot, insert_screenshot, query_screenshots,
};
use crate::errors::{AppError, AppResult};
use crate::models::filter::ScreenshotFilter;
use crate::models::screenshot::{
    Screenshot, ScreenshotCreate, ScreenshotPage, default_system_permissions,
};
use crate::utils::ids::new_id;
use rusqlite::Connection;

pub const MAX_PAGE_LIMIT: i64 = 10_000;
pub const MAX_LIST_LIMIT: i64 = 100;

pub struct ScreenshotLogic;

fn check_limit(limit: i64, max: i64) -> AppResult<()> {
    if (1..=max).contains(&limit) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "limit must be between 1 and {} (got {})",
            max, limit
        )))
    }
}

/// Keyset position of the cursor row, or `None` when the cursor does not
/// name a screenshot of the organization. An unusable cursor means "first page".
fn resolve_cursor(
    conn: &Connection,
    organization_id: &str,
    cursor: Option<&str>,
) -> AppResult<Option<Predicate>> {
    let Some(cursor) = cursor.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };

    match find_screenshot(conn, cursor, organization_id)? {
        Some(last) => Ok(Some(Predicate::After {
            ts_col: "timestamp",
            id_col: "id",
            timestamp: last.timestamp,
            id: last.id,
        })),
        None => {
            log::debug!("ignoring unknown screenshot cursor '{}'", cursor);
            Ok(None)
        }
    }
}

impl ScreenshotLogic {
    /// One page of screenshots, newest first.
    ///
    /// The cursor is the id of the last screenshot of the previous page.
    /// `total` counts the whole filtered set, regardless of the cursor.
    pub fn page(
        conn: &Connection,
        filter: &ScreenshotFilter,
        limit: i64,
        cursor: Option<&str>,
    ) -> AppResult<ScreenshotPage> {
        check_limit(limit, MAX_PAGE_LIMIT)?;

        let base = Conditions::from(filter);
        let cond = match resolve_cursor(conn, &filter.organization_id, cursor)? {
            Some(after) => base.clone().and(after),
            None => base.clone(),
        };

        // one extra row tells whether another page exists
        let mut data = query_screenshots(conn, &cond, limit + 1)?;
        let has_more = data.len() as i64 > limit;
        if has_more {
            data.truncate(limit as usize);
        }

        let next = if has_more {
            data.last().map(|s| s.id.clone())
        } else {
            None
        };

        let total = count_screenshots(conn, &base)?;

        Ok(ScreenshotPage {
            data,
            next,
            total,
            has_more,
        })
    }

    /// Plain listing without a cursor.
    pub fn list(conn: &Connection, filter: &ScreenshotFilter, limit: i64) -> AppResult<Vec<Screenshot>> {
        check_limit(limit, MAX_LIST_LIMIT)?;
        query_screenshots(conn, &Conditions::from(filter), limit)
    }

    pub fn create(
        conn: &Connection,
        employee_id: &str,
        organization_id: &str,
        data: ScreenshotCreate,
    ) -> AppResult<Screenshot> {
        let employee = find_employee(conn, employee_id)?
            .filter(|e| e.organization_id == organization_id)
            .ok_or_else(|| AppError::NotFound(format!("employee {}", employee_id)))?;

        // a screenshot may only point at one of the employee's own shifts
        if let Some(shift_id) = &data.shift_id {
            let shift = ShiftLogic::get(conn, shift_id, organization_id)?;
            if shift.employee_id != employee.id {
                return Err(AppError::NotFound(format!("shift {}", shift_id)));
            }
        }

        let shot = Screenshot {
            id: new_id(),
            site: data.site,
            productivity: data.productivity,
            timestamp: data.timestamp,
            employee_id: employee.id,
            team_id: employee.team_id,
            organization_id: organization_id.to_string(),
            project_id: data.project_id,
            task_id: data.task_id,
            shift_id: data.shift_id,
            system_permissions: data
                .system_permissions
                .unwrap_or_else(default_system_permissions),
            next: None,
            image_url: data.image_url,
        };

        insert_screenshot(conn, &shot)?;
        ttlog_quiet(conn, "screenshot_add", &shot.id, "Screenshot recorded");

        Ok(shot)
    }

    /// Delete a screenshot of the caller's organization.
    pub fn delete(conn: &Connection, screenshot_id: &str, organization_id: &str) -> AppResult<Screenshot> {
        let shot = find_screenshot(conn, screenshot_id, organization_id)?
            .ok_or_else(|| AppError::NotFound(format!("screenshot {}", screenshot_id)))?;

        if delete_screenshot(conn, screenshot_id)? == 0 {
            return Err(AppError::NotFound(format!("screenshot {}", screenshot_id)));
        }

        ttlog_quiet(conn, "screenshot_del", screenshot_id, "Screenshot deleted");
        log::info!("screenshot {} deleted", screenshot_id);

        Ok(shot)
    }
}
