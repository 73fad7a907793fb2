//! Guards applied at the boundary before the core runs.

use crate::db::employees::{find_employee, is_assigned_to_project, is_assigned_to_task};
use crate::errors::{AppError, AppResult};
use crate::models::principal::Principal;
use rusqlite::Connection;

/// Resolve the acting employee into a principal.
pub fn resolve_principal(conn: &Connection, employee_id: &str) -> AppResult<Principal> {
    find_employee(conn, employee_id)?
        .map(|e| Principal::from(&e))
        .ok_or_else(|| AppError::Unauthorized("User not found".into()))
}

/// Authenticated, not deactivated and with a verified e-mail.
pub fn require_active(p: &Principal) -> AppResult<()> {
    if p.deactivated {
        return Err(AppError::Unauthorized("User account is deactivated".into()));
    }
    if !p.email_verified {
        return Err(AppError::Unauthorized("Email not verified".into()));
    }
    Ok(())
}

pub fn require_admin(p: &Principal) -> AppResult<()> {
    if p.deactivated {
        return Err(AppError::Unauthorized("User account is deactivated".into()));
    }
    if !p.is_admin {
        return Err(AppError::Forbidden("Not enough permissions".into()));
    }
    Ok(())
}

/// The employee must be assigned to the project and task they report on.
pub fn check_assignment(
    conn: &Connection,
    employee_id: &str,
    project_id: Option<&str>,
    task_id: Option<&str>,
) -> AppResult<()> {
    if let Some(project) = project_id
        && !is_assigned_to_project(conn, employee_id, project)?
    {
        return Err(AppError::Validation(
            "You are not assigned to this project".into(),
        ));
    }

    if let Some(task) = task_id
        && !is_assigned_to_task(conn, employee_id, task)?
    {
        return Err(AppError::Validation("You are not assigned to this task".into()));
    }

    Ok(())
}
