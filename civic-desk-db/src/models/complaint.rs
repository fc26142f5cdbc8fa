use chrono::{DateTime, Utc};
use civic_desk_api::{ComplaintPriority, ComplaintStatus, NewComplaintRequest};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::models::auditable::Auditable;
use crate::models::identifiable::Identifiable;

/// # Documentation
/// A citizen-submitted issue report.
///
/// Created by a citizen, afterwards changed only by admins and officers
/// through the lifecycle service. Complaints are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintModel {
    pub id: Uuid,

    /// Creator of the complaint
    pub user_id: Uuid,

    pub category: HeaplessString<50>,
    /// Drawn from the catalog entry of `category` at creation time
    pub sub_category: HeaplessString<100>,
    pub description: String,

    pub city: HeaplessString<50>,
    /// Drawn from the catalog entry of `city` at creation time
    pub area: HeaplessString<50>,

    pub priority: ComplaintPriority,
    pub status: ComplaintStatus,

    /// Public reference URL of an uploaded image
    pub image_url: Option<String>,
    pub assigned_department_id: Option<Uuid>,
    pub assigned_officer_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Hash from the previous audit record for chain verification (0 for initial create)
    pub antecedent_hash: i64,

    /// Reference to the previous audit log entry (Uuid::nil() for initial create)
    pub antecedent_audit_log_id: Uuid,

    /// Hash of the entity with hash field set to 0
    /// - 0: for new entities not yet created or not yet hashed
    /// - Non-zero: computed hash, also used as the optimistic-concurrency token on update
    pub hash: i64,

    /// Reference to the current audit log entry for this entity
    /// - None: for new entities not yet created
    /// - Some(uuid): updated on every create/update operation to reference the latest audit log
    ///
    /// This field, together with `id`, forms the composite primary key in the audit table
    pub audit_log_id: Option<Uuid>,
}

impl ComplaintModel {
    /// Builds a fresh, unsaved complaint from a validated intake request.
    ///
    /// Status starts as open and priority as medium; nothing is assigned.
    pub fn from_request(
        request: &NewComplaintRequest,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Self, String> {
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            category: bounded("category", &request.category)?,
            sub_category: bounded("sub_category", &request.sub_category)?,
            description: request.description.clone(),
            city: bounded("city", &request.city)?,
            area: bounded("area", &request.area)?,
            priority: ComplaintPriority::default(),
            status: ComplaintStatus::default(),
            image_url: request.image_url.clone(),
            assigned_department_id: None,
            assigned_officer_id: None,
            created_at: now,
            updated_at: now,
            antecedent_hash: 0,
            antecedent_audit_log_id: Uuid::nil(),
            hash: 0,
            audit_log_id: None,
        })
    }
}

fn bounded<const N: usize>(field: &str, value: &str) -> Result<HeaplessString<N>, String> {
    HeaplessString::from_str(value)
        .map_err(|_| format!("Value for '{field}' is too long (max {N} chars)"))
}

impl Identifiable for ComplaintModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Auditable for ComplaintModel {
    fn get_audit_log_id(&self) -> Option<Uuid> {
        self.audit_log_id
    }
}
