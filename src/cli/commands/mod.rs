pub mod analytics;
pub mod config;
pub mod employee;
pub mod init;
pub mod log;
pub mod screenshot;
pub mod shift;

use crate::cli::parser::{Cli, ScopeArgs};
use crate::config::Config;
use crate::core::access::resolve_principal;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::principal::Principal;

/// Open the configured database with pending migrations applied.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    pool.set_busy_timeout(cfg.busy_timeout_ms)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// The principal named by `--as`.
pub(crate) fn acting_principal(cli: &Cli, pool: &DbPool) -> AppResult<Principal> {
    let actor = cli
        .actor
        .as_deref()
        .ok_or_else(|| AppError::Unauthorized("missing --as <EMPLOYEE_ID>".into()))?;
    resolve_principal(&pool.conn, actor)
}

impl ScopeArgs {
    pub(crate) fn apply_to_shifts(&self, f: &mut crate::models::filter::ShiftFilter) {
        f.employee_id = self.employee.clone();
        f.team_id = self.team.clone();
        f.project_id = self.project.clone();
        f.task_id = self.task.clone();
        f.shift_id = self.shift.clone();
    }

    pub(crate) fn apply_to_screenshots(&self, f: &mut crate::models::filter::ScreenshotFilter) {
        f.employee_id = self.employee.clone();
        f.team_id = self.team.clone();
        f.project_id = self.project.clone();
        f.task_id = self.task.clone();
        f.shift_id = self.shift.clone();
    }
}
