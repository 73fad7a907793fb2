use crate::cli::commands::{acting_principal, open_db};
use crate::cli::parser::{Cli, Commands, ShiftAction};
use crate::config::Config;
use crate::core::access::{check_assignment, require_active};
use crate::core::history::HistoryLogic;
use crate::core::shift::ShiftLogic;
use crate::errors::{AppError, AppResult};
use crate::models::filter::ShiftFilter;
use crate::models::shift::ShiftStart;
use crate::ui::messages::success;
use crate::ui::output::print_json;
use crate::utils::time::{format_duration, parse_optional_millis};

/// Handle the `shift` subcommands (user-scoped time tracking).
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Shift { action } = &cli.command else {
        return Ok(());
    };

    let mut pool = open_db(cfg)?;
    let me = acting_principal(cli, &pool)?;
    require_active(&me)?;

    match action {
        ShiftAction::Start {
            project,
            task,
            name,
            tz_offset,
        } => {
            check_assignment(&pool.conn, &me.employee_id, project.as_deref(), task.as_deref())?;

            let shift = ShiftLogic::start(
                &mut pool,
                &me.employee_id,
                &me.organization_id,
                ShiftStart {
                    project_id: project.clone(),
                    task_id: task.clone(),
                    name: name.clone(),
                    timezone_offset: *tz_offset,
                },
            )?;

            success(format!("Shift {} started.", shift.id));
            print_json(&shift)
        }

        ShiftAction::End { id } => {
            let shift = match id {
                Some(id) => ShiftLogic::end(&mut pool, id, &me.employee_id)?,
                None => ShiftLogic::end_active(&mut pool, &me.employee_id)?,
            };

            success(format!(
                "Shift {} ended ({}).",
                shift.id,
                format_duration(shift.duration())
            ));
            print_json(&shift)
        }

        ShiftAction::Active => {
            let shift = ShiftLogic::get_active(&pool.conn, &me.employee_id)?
                .ok_or_else(|| AppError::NotFound("No active time tracking session".into()))?;
            print_json(&shift)
        }

        ShiftAction::History {
            employee,
            project,
            task,
            from,
            to,
            skip,
            limit,
        } => {
            // non-admins only ever see their own shifts
            let employee_id = match (employee, me.is_admin) {
                (Some(other), true) => Some(other.clone()),
                (None, true) => None,
                (Some(other), false) if *other != me.employee_id => {
                    return Err(AppError::Forbidden("Not enough permissions".into()));
                }
                _ => Some(me.employee_id.clone()),
            };

            let filter = ShiftFilter {
                employee_id,
                project_id: project.clone(),
                task_id: task.clone(),
                start_time: parse_optional_millis(from.as_ref())?,
                end_time: parse_optional_millis(to.as_ref())?,
                ..ShiftFilter::for_organization(me.organization_id.clone())
            };

            let shifts = HistoryLogic::list(
                &pool.conn,
                &filter,
                *skip,
                limit.unwrap_or(cfg.history_default_limit),
            )?;
            print_json(&shifts)
        }
    }
}
