use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle state of a complaint. New complaints start as `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "complaint_status", rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
    Rejected,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 5] = [
        ComplaintStatus::Open,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
        ComplaintStatus::Closed,
        ComplaintStatus::Rejected,
    ];

    /// Wire name, as stored in the database and written to exports
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Open => "open",
            ComplaintStatus::InProgress => "in_progress",
            ComplaintStatus::Resolved => "resolved",
            ComplaintStatus::Closed => "closed",
            ComplaintStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplaintStatus::Open => "Open",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Resolved => "Resolved",
            ComplaintStatus::Closed => "Closed",
            ComplaintStatus::Rejected => "Rejected",
        }
    }

    /// Badge colour classes used by the presentation layer
    pub fn color_class(&self) -> &'static str {
        match self {
            ComplaintStatus::Open => "bg-blue-100 text-blue-800",
            ComplaintStatus::InProgress => "bg-yellow-100 text-yellow-800",
            ComplaintStatus::Resolved => "bg-green-100 text-green-800",
            ComplaintStatus::Closed => "bg-gray-100 text-gray-800",
            ComplaintStatus::Rejected => "bg-red-100 text-red-800",
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(ComplaintStatus::Open),
            "in_progress" => Ok(ComplaintStatus::InProgress),
            "resolved" => Ok(ComplaintStatus::Resolved),
            "closed" => Ok(ComplaintStatus::Closed),
            "rejected" => Ok(ComplaintStatus::Rejected),
            _ => Err(format!("Invalid ComplaintStatus: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "complaint_priority", rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ComplaintPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl ComplaintPriority {
    pub const ALL: [ComplaintPriority; 3] = [
        ComplaintPriority::Low,
        ComplaintPriority::Medium,
        ComplaintPriority::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintPriority::Low => "low",
            ComplaintPriority::Medium => "medium",
            ComplaintPriority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplaintPriority::Low => "Low",
            ComplaintPriority::Medium => "Medium",
            ComplaintPriority::High => "High",
        }
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            ComplaintPriority::Low => "bg-slate-100 text-slate-700",
            ComplaintPriority::Medium => "bg-orange-100 text-orange-700",
            ComplaintPriority::High => "bg-red-100 text-red-700",
        }
    }
}

impl std::fmt::Display for ComplaintPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(ComplaintPriority::Low),
            "medium" => Ok(ComplaintPriority::Medium),
            "high" => Ok(ComplaintPriority::High),
            _ => Err(format!("Invalid ComplaintPriority: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "app_role", rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Citizen,
    Admin,
    Officer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Admin => "admin",
            Role::Officer => "officer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "citizen" => Ok(Role::Citizen),
            "admin" => Ok(Role::Admin),
            "officer" => Ok(Role::Officer),
            _ => Err(format!("Invalid Role: {s}")),
        }
    }
}
