use crate::cli::commands::{acting_principal, open_db};
use crate::cli::parser::{Cli, Commands, ScreenshotAction};
use crate::config::Config;
use crate::core::access::{check_assignment, require_active, require_admin};
use crate::core::screenshot::ScreenshotLogic;
use crate::errors::{AppError, AppResult};
use crate::models::filter::ScreenshotFilter;
use crate::models::screenshot::ScreenshotCreate;
use crate::ui::messages::success;
use crate::ui::output::print_json;
use crate::utils::time::parse_millis;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Screenshot { action } = &cli.command else {
        return Ok(());
    };

    let pool = open_db(cfg)?;
    let me = acting_principal(cli, &pool)?;

    match action {
        ScreenshotAction::Page {
            from,
            to,
            scope,
            limit,
            next,
        } => {
            require_admin(&me)?;

            let mut filter = ScreenshotFilter::new(
                me.organization_id.clone(),
                parse_millis(from)?,
                parse_millis(to)?,
            );
            scope.apply_to_screenshots(&mut filter);

            let page = ScreenshotLogic::page(
                &pool.conn,
                &filter,
                limit.unwrap_or(cfg.screenshot_page_default_limit),
                next.as_deref(),
            )?;
            print_json(&page)
        }

        ScreenshotAction::List {
            from,
            to,
            scope,
            all,
            limit,
        } => {
            let mut filter = ScreenshotFilter::new(
                me.organization_id.clone(),
                parse_millis(from)?,
                parse_millis(to)?,
            );
            scope.apply_to_screenshots(&mut filter);

            if *all {
                require_admin(&me)?;
            } else {
                require_active(&me)?;
                if scope.employee.as_ref().is_some_and(|e| *e != me.employee_id) {
                    return Err(AppError::Forbidden("Not enough permissions".into()));
                }
                filter.employee_id = Some(me.employee_id.clone());
            }

            let shots = ScreenshotLogic::list(
                &pool.conn,
                &filter,
                limit.unwrap_or(cfg.screenshot_list_default_limit),
            )?;
            print_json(&shots)
        }

        ScreenshotAction::Add {
            timestamp,
            site,
            productivity,
            project,
            task,
            shift,
            image_url,
        } => {
            require_active(&me)?;
            check_assignment(&pool.conn, &me.employee_id, project.as_deref(), task.as_deref())?;

            let shot = ScreenshotLogic::create(
                &pool.conn,
                &me.employee_id,
                &me.organization_id,
                ScreenshotCreate {
                    site: site.clone(),
                    productivity: *productivity,
                    timestamp: parse_millis(timestamp)?,
                    project_id: project.clone(),
                    task_id: task.clone(),
                    shift_id: shift.clone(),
                    system_permissions: None,
                    image_url: image_url.clone(),
                },
            )?;
            print_json(&shot)
        }

        ScreenshotAction::Del { id } => {
            require_admin(&me)?;
            ScreenshotLogic::delete(&pool.conn, id, &me.organization_id)?;
            success(format!("Screenshot {} deleted.", id));
            print_json(&serde_json::json!({ "message": "Screenshot deleted successfully" }))
        }
    }
}
