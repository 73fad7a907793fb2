use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub organization_id: String,
    pub team_id: Option<String>,
    pub is_admin: bool,
    pub email_verified: bool,
    pub deactivated: Option<i64>, // epoch ms of deactivation
    pub created_at: i64,
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeCreate {
    pub name: String,
    pub email: String,
    pub team_id: Option<String>,
    pub is_admin: bool,
}
