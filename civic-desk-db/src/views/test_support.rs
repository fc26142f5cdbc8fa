use chrono::{DateTime, TimeZone, Utc};
use civic_desk_api::{ComplaintPriority, ComplaintStatus};
use heapless::String as HeaplessString;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::ComplaintModel;

pub fn complaint(category: &str, city: &str, user_id: Uuid) -> ComplaintModel {
    complaint_at(category, city, user_id, Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap())
}

pub fn complaint_at(
    category: &str,
    city: &str,
    user_id: Uuid,
    created_at: DateTime<Utc>,
) -> ComplaintModel {
    ComplaintModel {
        id: Uuid::new_v4(),
        user_id,
        category: HeaplessString::from_str(category).unwrap(),
        sub_category: HeaplessString::from_str("General").unwrap(),
        description: "Reported by a resident".to_string(),
        city: HeaplessString::from_str(city).unwrap(),
        area: HeaplessString::from_str("Central").unwrap(),
        priority: ComplaintPriority::Medium,
        status: ComplaintStatus::Open,
        image_url: None,
        assigned_department_id: None,
        assigned_officer_id: None,
        created_at,
        updated_at: created_at,
        antecedent_hash: 0,
        antecedent_audit_log_id: Uuid::nil(),
        hash: 0,
        audit_log_id: None,
    }
}
