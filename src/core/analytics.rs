use crate::db::filter::Conditions;
use crate::db::shifts::query_shifts;
use crate::errors::{AppError, AppResult};
use crate::models::analytics::{AnalyticsResult, ProjectTime};
use crate::models::filter::ShiftFilter;
use crate::models::shift::Shift;
use rusqlite::Connection;

pub struct AnalyticsLogic;

impl AnalyticsLogic {
    /// Project/task time breakdown over the completed shifts of `scope`
    /// that started at or after `start_time` and ended at or before `end_time`.
    ///
    /// `scope` carries the organization and the optional employee, team,
    /// project, task and shift filters; its own time fields are replaced.
    pub fn compute_project_time_analytics(
        conn: &Connection,
        start_time: i64,
        end_time: i64,
        scope: &ShiftFilter,
    ) -> AppResult<AnalyticsResult> {
        if start_time > end_time {
            return Err(AppError::Validation(format!(
                "start ({}) is after end ({})",
                start_time, end_time
            )));
        }

        let filter = ShiftFilter {
            start_time: Some(start_time),
            end_time: Some(end_time),
            completed_only: true,
            ..scope.clone()
        };

        let shifts = query_shifts(conn, &Conditions::from(&filter), None, 0)?;
        log::debug!(
            "project-time analytics over {} shift(s) for organization {}",
            shifts.len(),
            filter.organization_id
        );

        Ok(aggregate(&shifts))
    }
}

/// Fold shifts into totals and a project → task breakdown.
///
/// Open shifts contribute zero time. Shifts without a project count toward
/// the totals only; shifts without a task are left out of the task map.
pub fn aggregate(shifts: &[Shift]) -> AnalyticsResult {
    let mut result = AnalyticsResult::default();

    for shift in shifts {
        let time = shift.duration();
        result.total_time += time;
        result.total_shifts += 1;

        let Some(project_id) = &shift.project_id else {
            continue;
        };

        let project: &mut ProjectTime = result
            .project_breakdown
            .entry(project_id.clone())
            .or_default();
        project.total_time += time;
        project.shift_count += 1;

        if let Some(task_id) = &shift.task_id {
            let task = project.tasks.entry(task_id.clone()).or_default();
            task.total_time += time;
            task.shift_count += 1;
        }
    }

    result.average_shift_duration = if result.total_shifts > 0 {
        result.total_time as f64 / result.total_shifts as f64
    } else {
        0.0
    };

    result
}
