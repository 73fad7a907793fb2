use crate::db::employees::find_employee;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::shifts::{
    close_shift, find_active_shift, find_shift, find_shift_for_employee, insert_shift,
};
use crate::errors::{AppError, AppResult};
use crate::models::shift::{Shift, ShiftStart};
use crate::models::shift_type::ShiftType;
use crate::utils::ids::new_id;
use crate::utils::time::now_millis;
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Start/end transitions of time-tracking shifts.
///
/// An employee has at most one open shift. `start` checks and inserts inside
/// an IMMEDIATE transaction, and the partial unique index on open shifts
/// turns any racing insert into the same conflict.
pub struct ShiftLogic;

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn active_shift_exists() -> AppError {
    AppError::Conflict("active shift exists".into())
}

/// Largest accepted timezone offset, in either direction: 24h.
pub const MAX_TIMEZONE_OFFSET_MS: i64 = 86_400_000;

fn check_timezone_offset(offset: i64) -> AppResult<()> {
    if (-MAX_TIMEZONE_OFFSET_MS..=MAX_TIMEZONE_OFFSET_MS).contains(&offset) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "timezone offset must be within ±{} ms (got {})",
            MAX_TIMEZONE_OFFSET_MS, offset
        )))
    }
}

/// Wall-clock instant shifted into the employee's local time.
fn translate(instant: i64, offset: i64) -> AppResult<i64> {
    instant
        .checked_add(offset)
        .ok_or_else(|| AppError::Validation(format!("time {} + offset {} overflows", instant, offset)))
}

impl ShiftLogic {
    pub fn start(
        pool: &mut DbPool,
        employee_id: &str,
        organization_id: &str,
        data: ShiftStart,
    ) -> AppResult<Shift> {
        Self::start_at(pool, employee_id, organization_id, data, now_millis())
    }

    /// `start` with an explicit clock reading.
    pub fn start_at(
        pool: &mut DbPool,
        employee_id: &str,
        organization_id: &str,
        data: ShiftStart,
        now: i64,
    ) -> AppResult<Shift> {
        check_timezone_offset(data.timezone_offset)?;
        let start_translated = translate(now, data.timezone_offset)?;

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let employee = find_employee(&tx, employee_id)?
            .filter(|e| e.organization_id == organization_id)
            .ok_or_else(|| AppError::NotFound(format!("employee {}", employee_id)))?;

        if find_active_shift(&tx, employee_id)?.is_some() {
            return Err(active_shift_exists());
        }

        let shift = Shift {
            id: new_id(),
            shift_type: ShiftType::Manual,
            start: now,
            end: None,
            timezone_offset: data.timezone_offset,
            name: data.name,
            user_name: Some(employee.name.clone()),
            employee_id: employee.id.clone(),
            team_id: employee.team_id.clone(),
            organization_id: organization_id.to_string(),
            project_id: data.project_id,
            task_id: data.task_id,
            start_translated: Some(start_translated),
            end_translated: None,
            last_activity_end: None,
            last_activity_end_translated: None,
        };

        match insert_shift(&tx, &shift) {
            Ok(()) => {}
            Err(e) if is_unique_violation(&e) => return Err(active_shift_exists()),
            Err(e) => return Err(e.into()),
        }

        ttlog(
            &tx,
            "shift_start",
            &shift.id,
            &format!("Shift started for employee {}", employee_id),
        )?;

        tx.commit()?;

        log::info!(
            "shift {} started for employee {} (project={:?}, task={:?})",
            shift.id,
            employee_id,
            shift.project_id,
            shift.task_id
        );

        Ok(shift)
    }

    pub fn end(pool: &mut DbPool, shift_id: &str, employee_id: &str) -> AppResult<Shift> {
        Self::end_at(pool, shift_id, employee_id, now_millis())
    }

    /// `end` with an explicit clock reading.
    pub fn end_at(
        pool: &mut DbPool,
        shift_id: &str,
        employee_id: &str,
        now: i64,
    ) -> AppResult<Shift> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let shift = find_shift_for_employee(&tx, shift_id, employee_id)?
            .ok_or_else(|| AppError::NotFound(format!("shift {}", shift_id)))?;

        if shift.end.is_some() {
            return Err(AppError::Conflict("already ended".into()));
        }

        Self::close(tx, shift, now)
    }

    /// Ends whatever shift the employee currently has open.
    pub fn end_active(pool: &mut DbPool, employee_id: &str) -> AppResult<Shift> {
        Self::end_active_at(pool, employee_id, now_millis())
    }

    pub fn end_active_at(pool: &mut DbPool, employee_id: &str, now: i64) -> AppResult<Shift> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let shift = find_active_shift(&tx, employee_id)?
            .ok_or_else(|| AppError::NotFound("no active time tracking session".into()))?;

        Self::close(tx, shift, now)
    }

    /// Close an open shift inside the caller's transaction and commit.
    fn close(tx: Transaction<'_>, shift: Shift, now: i64) -> AppResult<Shift> {
        let end_translated = translate(now, shift.timezone_offset)?;

        // WHERE end_ms IS NULL: a concurrent end leaves nothing to update
        if close_shift(&tx, &shift.id, now, end_translated)? == 0 {
            return Err(AppError::Conflict("already ended".into()));
        }

        ttlog(
            &tx,
            "shift_end",
            &shift.id,
            &format!("Shift ended for employee {}", shift.employee_id),
        )?;

        tx.commit()?;

        log::info!(
            "shift {} ended for employee {} after {} ms",
            shift.id,
            shift.employee_id,
            now.saturating_sub(shift.start)
        );

        Ok(Shift {
            end: Some(now),
            end_translated: Some(end_translated),
            last_activity_end: Some(now),
            last_activity_end_translated: Some(end_translated),
            ..shift
        })
    }

    pub fn get_active(conn: &Connection, employee_id: &str) -> AppResult<Option<Shift>> {
        find_active_shift(conn, employee_id)
    }

    /// Shift by id; shifts of other organizations are reported as missing.
    pub fn get(conn: &Connection, shift_id: &str, organization_id: &str) -> AppResult<Shift> {
        find_shift(conn, shift_id)?
            .filter(|s| s.organization_id == organization_id)
            .ok_or_else(|| AppError::NotFound(format!("shift {}", shift_id)))
    }
}
