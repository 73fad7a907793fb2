use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenshot {
    pub id: String,
    pub site: Option<String>,
    pub productivity: f64,
    pub timestamp: i64,
    pub employee_id: String,
    pub team_id: Option<String>,
    pub organization_id: String,
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    pub shift_id: Option<String>,
    pub system_permissions: BTreeMap<String, String>,
    /// Legacy hint kept on the row; pagination never reads it.
    pub next: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ScreenshotCreate {
    pub site: Option<String>,
    pub productivity: f64,
    pub timestamp: i64,
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    pub shift_id: Option<String>,
    pub system_permissions: Option<BTreeMap<String, String>>,
    pub image_url: Option<String>,
}

pub fn default_system_permissions() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("accessibility".to_string(), "undetermined".to_string()),
        (
            "screenAndSystemAudioRecording".to_string(),
            "undetermined".to_string(),
        ),
    ])
}

/// One page of screenshots. `next` is the cursor for the following page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotPage {
    pub data: Vec<Screenshot>,
    pub next: Option<String>,
    pub total: i64,
    pub has_more: bool,
}
