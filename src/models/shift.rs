use super::shift_type::ShiftType;
use serde::Serialize;

/// A time-tracking session. All instants are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: String,
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    pub start: i64,
    pub end: Option<i64>, // None ⇔ active
    pub timezone_offset: i64,
    pub name: Option<String>,
    #[serde(rename = "user")]
    pub user_name: Option<String>,
    pub employee_id: String,
    pub team_id: Option<String>,
    pub organization_id: String,
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    pub start_translated: Option<i64>,
    pub end_translated: Option<i64>,
    pub last_activity_end: Option<i64>,
    pub last_activity_end_translated: Option<i64>,
}

impl Shift {
    pub fn is_active(&self) -> bool {
        self.end.is_none()
    }

    /// Closed duration in ms; zero for an active shift.
    pub fn duration(&self) -> i64 {
        self.end.map(|end| end - self.start).unwrap_or(0)
    }
}

/// Caller-supplied fields for starting a shift.
#[derive(Debug, Clone, Default)]
pub struct ShiftStart {
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    pub name: Option<String>,
    pub timezone_offset: i64,
}
