use chrono::{DateTime, Utc};
use civic_desk_api::ComplaintStatus;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// Immutable record of one status transition on a complaint.
///
/// - Written exactly once per status-changing update, never when the status is unchanged.
/// - Append-only: no update or delete exists for this table.
/// - Entries of a complaint ordered by `created_at` form its audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StatusHistoryModel {
    pub id: Uuid,
    pub complaint_id: Uuid,
    /// None for a first entry
    pub old_status: Option<ComplaintStatus>,
    pub new_status: ComplaintStatus,
    pub notes: Option<String>,
    /// Actor who made the change
    pub changed_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl StatusHistoryModel {
    pub fn transition(
        complaint_id: Uuid,
        old_status: Option<ComplaintStatus>,
        new_status: ComplaintStatus,
        notes: Option<String>,
        changed_by: Uuid,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            complaint_id,
            old_status,
            new_status,
            notes,
            changed_by,
            created_at,
        }
    }
}

impl Identifiable for StatusHistoryModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
