use crate::cli::commands::{acting_principal, open_db};
use crate::cli::parser::{AnalyticsAction, Cli, Commands};
use crate::config::Config;
use crate::core::access::require_admin;
use crate::core::analytics::AnalyticsLogic;
use crate::errors::AppResult;
use crate::models::filter::ShiftFilter;
use crate::ui::output::print_json;
use crate::utils::time::parse_millis;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Analytics { action } = &cli.command else {
        return Ok(());
    };

    let pool = open_db(cfg)?;
    let admin = acting_principal(cli, &pool)?;
    require_admin(&admin)?;

    match action {
        AnalyticsAction::ProjectTime { from, to, scope } => {
            let mut filter = ShiftFilter::for_organization(admin.organization_id.clone());
            scope.apply_to_shifts(&mut filter);

            let result = AnalyticsLogic::compute_project_time_analytics(
                &pool.conn,
                parse_millis(from)?,
                parse_millis(to)?,
                &filter,
            )?;
            print_json(&result)
        }
    }
}
