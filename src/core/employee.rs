use crate::db::employees::{
    assign_project, assign_task, clear_deactivated, count_projects, count_tasks, email_taken,
    find_employee, insert_employee, set_deactivated, set_email_verified,
};
use crate::db::filter::{Conditions, Predicate};
use crate::db::log::ttlog_quiet;
use crate::db::screenshots::count_screenshots;
use crate::db::shifts::{count_shifts, sum_shift_time};
use crate::errors::{AppError, AppResult};
use crate::models::analytics::EmployeeStats;
use crate::models::employee::{Employee, EmployeeCreate};
use crate::notify::Mailer;
use crate::utils::ids::new_id;
use crate::utils::time::now_millis;
use rusqlite::Connection;

const DAY_MS: i64 = 86_400_000;

/// Employee records touched by the shift and screenshot flows.
pub struct EmployeeLogic;

impl EmployeeLogic {
    pub fn create(
        conn: &Connection,
        mailer: &dyn Mailer,
        organization_id: &str,
        data: EmployeeCreate,
    ) -> AppResult<Employee> {
        let email = data.email.trim().to_lowercase();
        if data.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".into()));
        }
        if !email.contains('@') {
            return Err(AppError::Validation(format!("invalid e-mail '{}'", email)));
        }
        if email_taken(conn, &email)? {
            return Err(AppError::Conflict(format!("e-mail {} already registered", email)));
        }

        let employee = Employee {
            id: new_id(),
            name: data.name.trim().to_string(),
            email,
            organization_id: organization_id.to_string(),
            team_id: data.team_id,
            is_admin: data.is_admin,
            email_verified: false,
            deactivated: None,
            created_at: now_millis(),
        };

        insert_employee(conn, &employee)?;
        ttlog_quiet(conn, "employee_add", &employee.id, &format!("Employee {} created", employee.email));

        mailer.send_verification(&employee.email, &employee.name)?;

        Ok(employee)
    }

    /// Employee of `organization_id`; other organizations read as missing.
    pub fn get(conn: &Connection, employee_id: &str, organization_id: &str) -> AppResult<Employee> {
        find_employee(conn, employee_id)?
            .filter(|e| e.organization_id == organization_id)
            .ok_or_else(|| AppError::NotFound(format!("employee {}", employee_id)))
    }

    pub fn verify_email(conn: &Connection, employee_id: &str, organization_id: &str) -> AppResult<Employee> {
        let employee = Self::get(conn, employee_id, organization_id)?;
        set_email_verified(conn, employee_id)?;
        Ok(Employee {
            email_verified: true,
            ..employee
        })
    }

    /// `acting_id` is the admin performing the change; admins cannot lock themselves out.
    pub fn deactivate(
        conn: &Connection,
        employee_id: &str,
        organization_id: &str,
        acting_id: &str,
    ) -> AppResult<Employee> {
        let employee = Self::get(conn, employee_id, organization_id)?;
        if employee.id == acting_id {
            return Err(AppError::Validation("Cannot deactivate yourself".into()));
        }
        if employee.deactivated.is_some() {
            return Err(AppError::Conflict("already deactivated".into()));
        }

        let at = now_millis();
        if set_deactivated(conn, employee_id, at)? == 0 {
            return Err(AppError::Conflict("already deactivated".into()));
        }

        ttlog_quiet(conn, "employee_deactivate", employee_id, "Employee deactivated");

        Ok(Employee {
            deactivated: Some(at),
            ..employee
        })
    }

    /// Clear the deactivation mark. Activating an active employee is a no-op.
    pub fn activate(conn: &Connection, employee_id: &str, organization_id: &str) -> AppResult<Employee> {
        let employee = Self::get(conn, employee_id, organization_id)?;

        if clear_deactivated(conn, employee_id)? > 0 {
            ttlog_quiet(conn, "employee_activate", employee_id, "Employee activated");
            log::info!("employee {} reactivated", employee_id);
        }

        Ok(Employee {
            deactivated: None,
            ..employee
        })
    }

    pub fn stats(conn: &Connection, employee_id: &str, organization_id: &str) -> AppResult<EmployeeStats> {
        Self::stats_at(conn, employee_id, organization_id, now_millis())
    }

    /// Counters for one employee; the weekly and monthly windows are the
    /// 7 and 30 days before `now`, by shift start.
    pub fn stats_at(
        conn: &Connection,
        employee_id: &str,
        organization_id: &str,
        now: i64,
    ) -> AppResult<EmployeeStats> {
        Self::get(conn, employee_id, organization_id)?;

        let mine = Conditions::new().and(Predicate::eq_text("employee_id", employee_id));
        let completed = mine.clone().and(Predicate::NotNull("end_ms"));
        let since = |days: i64| {
            completed
                .clone()
                .and(Predicate::Gte("start_ms", now.saturating_sub(days * DAY_MS)))
        };

        Ok(EmployeeStats {
            total_time_logged: sum_shift_time(conn, &completed)?,
            total_projects: count_projects(conn, employee_id)?,
            total_tasks: count_tasks(conn, employee_id)?,
            total_screenshots: count_screenshots(conn, &mine)?,
            active_shifts: count_shifts(conn, &mine.clone().and(Predicate::IsNull("end_ms")))?,
            weekly_time_logged: sum_shift_time(conn, &since(7))?,
            monthly_time_logged: sum_shift_time(conn, &since(30))?,
        })
    }

    pub fn assign(
        conn: &Connection,
        employee_id: &str,
        organization_id: &str,
        project_id: Option<&str>,
        task_id: Option<&str>,
    ) -> AppResult<()> {
        Self::get(conn, employee_id, organization_id)?;

        if project_id.is_none() && task_id.is_none() {
            return Err(AppError::Validation(
                "Nothing to do: specify --project and/or --task.".into(),
            ));
        }
        if let Some(project) = project_id {
            assign_project(conn, employee_id, project)?;
        }
        if let Some(task) = task_id {
            assign_task(conn, employee_id, task)?;
        }
        Ok(())
    }

    pub fn request_password_reset(
        conn: &Connection,
        mailer: &dyn Mailer,
        employee_id: &str,
        organization_id: &str,
    ) -> AppResult<()> {
        let employee = Self::get(conn, employee_id, organization_id)?;
        mailer.send_password_reset(&employee.email, &employee.name)
    }
}
