use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTime {
    pub total_time: i64,
    pub shift_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTime {
    pub total_time: i64,
    pub shift_count: i64,
    pub tasks: BTreeMap<String, TaskTime>,
}

/// Aggregate over completed shifts; computed per request, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    pub total_time: i64,
    pub total_shifts: i64,
    pub project_breakdown: BTreeMap<String, ProjectTime>,
    pub average_shift_duration: f64,
}

/// Per-employee counters. Time values are summed completed-shift durations in ms.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStats {
    pub total_time_logged: i64,
    pub total_projects: i64,
    pub total_tasks: i64,
    pub total_screenshots: i64,
    pub active_shifts: i64,
    pub weekly_time_logged: i64,
    pub monthly_time_logged: i64,
}
