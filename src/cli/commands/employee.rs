use crate::cli::commands::{acting_principal, open_db};
use crate::cli::parser::{Cli, Commands, EmployeeAction};
use crate::config::Config;
use crate::core::access::{require_active, require_admin};
use crate::core::employee::EmployeeLogic;
use crate::db::employees::organization_has_employees;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::employee::EmployeeCreate;
use crate::notify::Mailer;
use crate::ui::messages::success;
use crate::ui::output::print_json;

/// Organization the new employee joins: the acting admin's, or a brand-new
/// one named by `--org` when nobody acts.
fn target_organization(cli: &Cli, pool: &DbPool, org: Option<&String>) -> AppResult<String> {
    if cli.actor.is_some() {
        let admin = acting_principal(cli, pool)?;
        require_admin(&admin)?;
        if let Some(org) = org
            && *org != admin.organization_id
        {
            return Err(AppError::Forbidden("Not enough permissions".into()));
        }
        return Ok(admin.organization_id);
    }

    let org = org.ok_or_else(|| AppError::Unauthorized("missing --as <EMPLOYEE_ID>".into()))?;
    if organization_has_employees(&pool.conn, org)? {
        return Err(AppError::Unauthorized(format!(
            "organization {} already has employees; act as one of its admins",
            org
        )));
    }
    Ok(org.clone())
}

pub fn handle(cli: &Cli, cfg: &Config, mailer: &dyn Mailer) -> AppResult<()> {
    let Commands::Employee { action } = &cli.command else {
        return Ok(());
    };

    let pool = open_db(cfg)?;

    if let EmployeeAction::Add {
        name,
        email,
        team,
        admin,
        org,
    } = action
    {
        let organization_id = target_organization(cli, &pool, org.as_ref())?;
        let employee = EmployeeLogic::create(
            &pool.conn,
            mailer,
            &organization_id,
            EmployeeCreate {
                name: name.clone(),
                email: email.clone(),
                team_id: team.clone(),
                is_admin: *admin,
            },
        )?;
        success(format!("Employee {} created.", employee.id));
        return print_json(&employee);
    }

    let me = acting_principal(cli, &pool)?;

    // own stats only need an active account
    if let EmployeeAction::Stats { id } = action
        && id.as_ref().is_none_or(|id| *id == me.employee_id)
    {
        require_active(&me)?;
        return print_json(&EmployeeLogic::stats(&pool.conn, &me.employee_id, &me.organization_id)?);
    }

    require_admin(&me)?;
    let org = &me.organization_id;

    match action {
        EmployeeAction::Add { .. } => Ok(()),

        EmployeeAction::Stats { id } => {
            let id = id.as_deref().unwrap_or(&me.employee_id);
            print_json(&EmployeeLogic::stats(&pool.conn, id, org)?)
        }

        EmployeeAction::Verify { id } => {
            print_json(&EmployeeLogic::verify_email(&pool.conn, id, org)?)
        }

        EmployeeAction::Deactivate { id } => {
            print_json(&EmployeeLogic::deactivate(&pool.conn, id, org, &me.employee_id)?)
        }

        EmployeeAction::Activate { id } => {
            print_json(&EmployeeLogic::activate(&pool.conn, id, org)?)
        }

        EmployeeAction::Assign { id, project, task } => {
            EmployeeLogic::assign(&pool.conn, id, org, project.as_deref(), task.as_deref())?;
            success(format!("Assignments updated for {}.", id));
            print_json(&EmployeeLogic::get(&pool.conn, id, org)?)
        }

        EmployeeAction::ResetPassword { id } => {
            EmployeeLogic::request_password_reset(&pool.conn, mailer, id, org)?;
            print_json(&serde_json::json!({ "message": "Password reset email sent" }))
        }
    }
}
