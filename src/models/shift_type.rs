use serde::{Deserialize, Serialize};

/// Origin of a shift. Shifts started through the lifecycle are always `Manual`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    #[default]
    Manual,
    Automated,
    Scheduled,
    Leave,
}

impl ShiftType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ShiftType::Manual => "manual",
            ShiftType::Automated => "automated",
            ShiftType::Scheduled => "scheduled",
            ShiftType::Leave => "leave",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "manual" => Some(Self::Manual),
            "automated" => Some(Self::Automated),
            "scheduled" => Some(Self::Scheduled),
            "leave" => Some(Self::Leave),
            _ => None,
        }
    }
}
