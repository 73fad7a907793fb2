use super::employee::Employee;

/// The resolved caller of an operation. Trusted as-is by the core.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub employee_id: String,
    pub organization_id: String,
    pub team_id: Option<String>,
    pub is_admin: bool,
    pub email_verified: bool,
    pub deactivated: bool,
}

impl From<&Employee> for Principal {
    fn from(e: &Employee) -> Self {
        Self {
            employee_id: e.id.clone(),
            organization_id: e.organization_id.clone(),
            team_id: e.team_id.clone(),
            is_admin: e.is_admin,
            email_verified: e.email_verified,
            deactivated: e.deactivated.is_some(),
        }
    }
}
