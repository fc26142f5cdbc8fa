use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use sqlx::FromRow;
use crate::models::Identifiable;

/// # Documentation
/// - One audit log per database transaction; every entity written in that
///   transaction references the same audit log.
/// - `updated_by_person_id` is the actor of the session that opened the transaction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogModel {
    pub id: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by_person_id: Uuid,
}

impl AuditLogModel {
    pub fn new(updated_by_person_id: Uuid, updated_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            updated_at,
            updated_by_person_id,
        }
    }
}

impl Identifiable for AuditLogModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
