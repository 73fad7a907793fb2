use crate::db::filter::Conditions;
use crate::db::shifts::query_shifts;
use crate::errors::{AppError, AppResult};
use crate::models::filter::ShiftFilter;
use crate::models::shift::Shift;
use rusqlite::Connection;

pub const MAX_HISTORY_LIMIT: i64 = 1000;

/// Shift history: conjunctive filters, most recent start first, offset paging.
///
/// Open shifts always pass the `end_time` filter.
pub struct HistoryLogic;

impl HistoryLogic {
    pub fn list(
        conn: &Connection,
        filter: &ShiftFilter,
        skip: i64,
        limit: i64,
    ) -> AppResult<Vec<Shift>> {
        if skip < 0 {
            return Err(AppError::Validation(format!(
                "skip must be >= 0 (got {})",
                skip
            )));
        }
        if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {} (got {})",
                MAX_HISTORY_LIMIT, limit
            )));
        }

        let cond = Conditions::from(filter);
        log::debug!("shift history: {:?} skip={} limit={}", cond.predicates(), skip, limit);

        query_shifts(conn, &cond, Some(limit), skip)
    }
}
