use postgres_unit_of_work::Executor;

/// Append-only access to `complaint_status_history`: rows are created and
/// read, never changed.
pub struct StatusHistoryRepositoryImpl {
    pub executor: Executor,
}

impl StatusHistoryRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
