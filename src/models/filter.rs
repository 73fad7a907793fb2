//! Filter criteria. Absent fields are no-ops; present fields are ANDed.

/// Criteria for shift history and analytics queries.
#[derive(Debug, Clone, Default)]
pub struct ShiftFilter {
    pub organization_id: String,
    pub employee_id: Option<String>,
    pub team_id: Option<String>,
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    pub shift_id: Option<String>,
    /// `start >= start_time`
    pub start_time: Option<i64>,
    /// `end <= end_time OR end IS NULL`
    pub end_time: Option<i64>,
    /// Only shifts with `end` set.
    pub completed_only: bool,
}

impl ShiftFilter {
    pub fn for_organization(organization_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            ..Self::default()
        }
    }
}

/// Criteria for screenshot listing. The time window is inclusive on both ends.
#[derive(Debug, Clone, Default)]
pub struct ScreenshotFilter {
    pub organization_id: String,
    pub start_time: i64,
    pub end_time: i64,
    pub employee_id: Option<String>,
    pub team_id: Option<String>,
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    pub shift_id: Option<String>,
}

impl ScreenshotFilter {
    pub fn new(organization_id: impl Into<String>, start_time: i64, end_time: i64) -> Self {
        Self {
            organization_id: organization_id.into(),
            start_time,
            end_time,
            ..Self::default()
        }
    }
}
