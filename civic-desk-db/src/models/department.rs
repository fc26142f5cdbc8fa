use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// Municipal department. Complaints are assigned to departments and officers
/// belong to one through their role assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentModel {
    pub id: Uuid,
    pub name: HeaplessString<100>,
    pub created_at: DateTime<Utc>,
}

impl DepartmentModel {
    /// New department with a trimmed, non-empty name of at most 100 chars
    pub fn new(name: &str, created_at: DateTime<Utc>) -> Result<Self, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("department name is required".to_string());
        }
        let name = HeaplessString::from_str(name)
            .map_err(|_| "department name is too long (max 100 chars)".to_string())?;
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            created_at,
        })
    }
}

impl Identifiable for DepartmentModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
