use chrono::{SubsecRound, Utc};
use civic_desk_api::{ComplaintPriority, ComplaintStatus};
use civic_desk_db::models::{AuditLogModel, ComplaintModel};
use heapless::String as HeaplessString;
use std::str::FromStr;
use uuid::Uuid;

pub fn create_test_audit_log() -> AuditLogModel {
    AuditLogModel::new(Uuid::new_v4(), Utc::now().trunc_subsecs(6))
}

pub fn create_test_complaint(user_id: Uuid) -> ComplaintModel {
    let now = Utc::now().trunc_subsecs(6);
    ComplaintModel {
        id: Uuid::new_v4(),
        user_id,
        category: HeaplessString::from_str("Water").unwrap(),
        sub_category: HeaplessString::from_str("Water leakage").unwrap(),
        description: "Water leaking from the main pipe".to_string(),
        city: HeaplessString::from_str("Mumbai").unwrap(),
        area: HeaplessString::from_str("Andheri").unwrap(),
        priority: ComplaintPriority::Medium,
        status: ComplaintStatus::Open,
        image_url: None,
        assigned_department_id: None,
        assigned_officer_id: None,
        created_at: now,
        updated_at: now,
        antecedent_hash: 0,
        antecedent_audit_log_id: Uuid::nil(),
        hash: 0,
        audit_log_id: None,
    }
}
