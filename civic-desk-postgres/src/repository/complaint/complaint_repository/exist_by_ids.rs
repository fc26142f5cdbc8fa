use async_trait::async_trait;
use civic_desk_db::repository::ExistByIds;
use civic_desk_db::RepositoryError;
use sqlx::Postgres;
use std::collections::HashSet;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ComplaintRepositoryImpl;

impl ComplaintRepositoryImpl {
    pub(super) async fn exist_by_ids_impl(
        repo: &ComplaintRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found: Vec<Uuid> = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;
            sqlx::query_scalar(r#"SELECT id FROM complaints WHERE id = ANY($1)"#)
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let found: HashSet<Uuid> = found.into_iter().collect();
        Ok(ids.iter().map(|id| (*id, found.contains(id))).collect())
    }
}

#[async_trait]
impl ExistByIds<Postgres> for ComplaintRepositoryImpl {
    async fn exist_by_ids(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        Self::exist_by_ids_impl(self, ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{create_test_audit_log, create_test_complaint};
    use crate::test_helper::setup_test_context;
    use civic_desk_db::repository::{CreateBatch, ExistByIds};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_exist_by_ids() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let audit_log = create_test_audit_log();
        ctx.audit_repos().audit_log_repository.create(&audit_log).await?;
        let complaint_repo = &ctx.complaint_repos().complaint_repository;

        let complaint = create_test_complaint(Uuid::new_v4());
        complaint_repo
            .create_batch(vec![complaint.clone()], Some(audit_log.id))
            .await?;

        let missing = Uuid::new_v4();
        let result = complaint_repo.exist_by_ids(&[complaint.id, missing]).await?;
        assert_eq!(result, vec![(complaint.id, true), (missing, false)]);
        Ok(())
    }
}
