use chrono::{DateTime, Utc};
use civic_desk_api::{ApiError, ApiResult, ComplaintChanges};
use uuid::Uuid;

use super::transition_policy::TransitionPolicy;
use crate::models::{ComplaintModel, StatusHistoryModel};

/// Outcome of applying a change request to a loaded complaint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpdate {
    /// The complaint with the changes applied; untouched when nothing changed
    pub complaint: ComplaintModel,
    /// Present exactly when the status changed
    pub history_entry: Option<StatusHistoryModel>,
    /// False when the request leaves every field as it was
    pub changed: bool,
}

impl PlannedUpdate {
    pub fn status_changed(&self) -> bool {
        self.history_entry.is_some()
    }
}

/// Applies `changes` to `current` on behalf of `actor`.
///
/// The history entry records `current.status` as the old status, so callers
/// must pass the complaint as read inside the writing transaction.
pub fn plan_update(
    current: &ComplaintModel,
    changes: &ComplaintChanges,
    actor: Uuid,
    now: DateTime<Utc>,
    policy: &dyn TransitionPolicy,
) -> ApiResult<PlannedUpdate> {
    let mut updated = current.clone();

    if let Some(status) = changes.status {
        if status != current.status && !policy.is_allowed(current.status, status) {
            return Err(ApiError::ValidationError(format!(
                "status change {} -> {} is not allowed by the {} policy",
                current.status,
                status,
                policy.name()
            )));
        }
        updated.status = status;
    }
    if let Some(priority) = changes.priority {
        updated.priority = priority;
    }
    if let Some(department_id) = changes.assigned_department_id {
        updated.assigned_department_id = department_id;
    }
    if let Some(officer_id) = changes.assigned_officer_id {
        updated.assigned_officer_id = officer_id;
    }

    let changed = updated != *current;
    if !changed {
        return Ok(PlannedUpdate {
            complaint: updated,
            history_entry: None,
            changed: false,
        });
    }
    updated.updated_at = now;

    let history_entry = (updated.status != current.status).then(|| {
        StatusHistoryModel::transition(
            current.id,
            Some(current.status),
            updated.status,
            changes.normalized_note(),
            actor,
            now,
        )
    });

    Ok(PlannedUpdate {
        complaint: updated,
        history_entry,
        changed: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{PermissiveTransitions, WorkflowTransitions};
    use crate::views::test_support::complaint;
    use chrono::Duration;
    use civic_desk_api::{ComplaintPriority, ComplaintStatus};

    fn open_complaint() -> ComplaintModel {
        complaint("Water", "Mumbai", Uuid::new_v4())
    }

    #[test]
    fn test_status_change_produces_one_history_entry() {
        let current = open_complaint();
        let admin = Uuid::new_v4();
        let now = current.created_at + Duration::hours(2);
        let changes = ComplaintChanges::status(ComplaintStatus::InProgress).with_note("dispatched crew");

        let plan = plan_update(&current, &changes, admin, now, &PermissiveTransitions).unwrap();

        assert!(plan.changed);
        assert_eq!(plan.complaint.status, ComplaintStatus::InProgress);
        assert_eq!(plan.complaint.updated_at, now);
        let entry = plan.history_entry.expect("history entry");
        assert_eq!(entry.complaint_id, current.id);
        assert_eq!(entry.old_status, Some(ComplaintStatus::Open));
        assert_eq!(entry.new_status, ComplaintStatus::InProgress);
        assert_eq!(entry.notes.as_deref(), Some("dispatched crew"));
        assert_eq!(entry.changed_by, admin);
        assert_eq!(entry.created_at, now);
    }

    #[test]
    fn test_priority_only_change_writes_no_history() {
        let mut current = open_complaint();
        current.priority = ComplaintPriority::Low;
        let changes = ComplaintChanges::default().with_priority(ComplaintPriority::High);

        let plan = plan_update(&current, &changes, Uuid::new_v4(), Utc::now(), &PermissiveTransitions)
            .unwrap();

        assert!(plan.changed);
        assert_eq!(plan.complaint.priority, ComplaintPriority::High);
        assert!(plan.history_entry.is_none());
    }

    #[test]
    fn test_same_status_is_not_a_transition() {
        let current = open_complaint();
        let changes = ComplaintChanges::status(ComplaintStatus::Open).with_note("still open");

        let plan = plan_update(&current, &changes, Uuid::new_v4(), Utc::now(), &WorkflowTransitions)
            .unwrap();

        assert!(!plan.changed);
        assert!(!plan.status_changed());
        assert_eq!(plan.complaint, current);
    }

    #[test]
    fn test_every_status_pair_yields_history_iff_different() {
        for from in ComplaintStatus::ALL {
            for to in ComplaintStatus::ALL {
                let mut current = open_complaint();
                current.status = from;
                let plan = plan_update(
                    &current,
                    &ComplaintChanges::status(to),
                    Uuid::new_v4(),
                    Utc::now(),
                    &PermissiveTransitions,
                )
                .unwrap();
                assert_eq!(plan.history_entry.is_some(), from != to);
                if let Some(entry) = plan.history_entry {
                    assert_eq!(entry.old_status, Some(from));
                    assert_eq!(entry.new_status, to);
                }
            }
        }
    }

    #[test]
    fn test_closed_complaint_can_be_reopened_by_default() {
        let mut current = open_complaint();
        current.status = ComplaintStatus::Closed;
        let plan = plan_update(
            &current,
            &ComplaintChanges::status(ComplaintStatus::Open),
            Uuid::new_v4(),
            Utc::now(),
            &PermissiveTransitions,
        )
        .unwrap();
        assert!(plan.status_changed());
    }

    #[test]
    fn test_workflow_policy_rejects_disallowed_move() {
        let mut current = open_complaint();
        current.status = ComplaintStatus::Closed;
        let result = plan_update(
            &current,
            &ComplaintChanges::status(ComplaintStatus::Resolved),
            Uuid::new_v4(),
            Utc::now(),
            &WorkflowTransitions,
        );
        assert!(matches!(result, Err(ApiError::ValidationError(_))));
    }

    #[test]
    fn test_assignment_can_be_set_and_cleared() {
        let department = Uuid::new_v4();
        let officer = Uuid::new_v4();
        let current = open_complaint();

        let assign = ComplaintChanges::default()
            .with_department(Some(department))
            .with_officer(Some(officer));
        let plan = plan_update(&current, &assign, Uuid::new_v4(), Utc::now(), &PermissiveTransitions)
            .unwrap();
        assert_eq!(plan.complaint.assigned_department_id, Some(department));
        assert_eq!(plan.complaint.assigned_officer_id, Some(officer));
        assert!(plan.history_entry.is_none());

        let clear = ComplaintChanges::default().with_department(None);
        let plan = plan_update(&plan.complaint, &clear, Uuid::new_v4(), Utc::now(), &PermissiveTransitions)
            .unwrap();
        assert_eq!(plan.complaint.assigned_department_id, None);
        assert_eq!(plan.complaint.assigned_officer_id, Some(officer));
    }
}
