use thiserror::Error;
use uuid::Uuid;

/// Failures the repositories report as typed values.
///
/// Repositories return `Box<dyn Error + Send + Sync>`; callers that need to
/// react to one of these cases downcast to this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{entity} {id} was modified by another transaction")]
    ConcurrentModification { entity: &'static str, id: Uuid },

    #[error("Transaction has been consumed")]
    TransactionConsumed,

    #[error("Entity {0} must have audit_log_id for update")]
    MissingAuditLog(Uuid),
}

impl RepositoryError {
    /// Finds a `RepositoryError` inside a boxed repository error
    pub fn find<'a>(
        err: &'a (dyn std::error::Error + Send + Sync + 'static),
    ) -> Option<&'a RepositoryError> {
        err.downcast_ref::<RepositoryError>()
    }
}
