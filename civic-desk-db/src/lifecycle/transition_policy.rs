use civic_desk_api::ComplaintStatus;
use std::str::FromStr;
use std::sync::Arc;

/// Decides which status moves the lifecycle service accepts.
///
/// Moving to the current status is always allowed and never reaches the policy.
pub trait TransitionPolicy: Send + Sync {
    fn is_allowed(&self, from: ComplaintStatus, to: ComplaintStatus) -> bool;

    fn name(&self) -> &'static str;
}

/// Any status may move to any other, including reopening closed complaints.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveTransitions;

impl TransitionPolicy for PermissiveTransitions {
    fn is_allowed(&self, _from: ComplaintStatus, _to: ComplaintStatus) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "permissive"
    }
}

/// Explicit transition table.
///
/// | from        | to                                     |
/// |-------------|----------------------------------------|
/// | open        | in_progress, resolved, rejected, closed |
/// | in_progress | resolved, rejected, closed, open        |
/// | resolved    | closed, in_progress                     |
/// | closed      | open                                    |
/// | rejected    | open                                    |
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowTransitions;

impl TransitionPolicy for WorkflowTransitions {
    fn is_allowed(&self, from: ComplaintStatus, to: ComplaintStatus) -> bool {
        use ComplaintStatus::*;
        matches!(
            (from, to),
            (Open, InProgress | Resolved | Rejected | Closed)
                | (InProgress, Resolved | Rejected | Closed | Open)
                | (Resolved, Closed | InProgress)
                | (Closed, Open)
                | (Rejected, Open)
        )
    }

    fn name(&self) -> &'static str {
        "workflow"
    }
}

/// Configured choice of transition policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionMode {
    #[default]
    Permissive,
    Workflow,
}

impl TransitionMode {
    pub fn into_policy(self) -> Arc<dyn TransitionPolicy> {
        match self {
            TransitionMode::Permissive => Arc::new(PermissiveTransitions),
            TransitionMode::Workflow => Arc::new(WorkflowTransitions),
        }
    }
}

impl FromStr for TransitionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(TransitionMode::Permissive),
            "workflow" => Ok(TransitionMode::Workflow),
            other => Err(format!("Invalid transition mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComplaintStatus::*;

    #[test]
    fn test_permissive_allows_everything() {
        for from in ComplaintStatus::ALL {
            for to in ComplaintStatus::ALL {
                assert!(PermissiveTransitions.is_allowed(from, to));
            }
        }
    }

    #[test]
    fn test_workflow_table() {
        let policy = WorkflowTransitions;
        assert!(policy.is_allowed(Open, InProgress));
        assert!(policy.is_allowed(Closed, Open));
        assert!(policy.is_allowed(Resolved, Closed));
        assert!(!policy.is_allowed(Closed, Resolved));
        assert!(!policy.is_allowed(Rejected, InProgress));
        assert!(!policy.is_allowed(Resolved, Open));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Workflow".parse::<TransitionMode>(), Ok(TransitionMode::Workflow));
        assert_eq!(" permissive ".parse::<TransitionMode>(), Ok(TransitionMode::Permissive));
        assert!("strict".parse::<TransitionMode>().is_err());
        assert_eq!(TransitionMode::Workflow.into_policy().name(), "workflow");
    }
}
