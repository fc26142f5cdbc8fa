use async_trait::async_trait;
use civic_desk_db::models::ComplaintModel;
use civic_desk_db::repository::{Load, LoadBatch};
use civic_desk_db::RepositoryError;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ComplaintRepositoryImpl;
use crate::utils::TryFromRow;

impl ComplaintRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &ComplaintRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ComplaintModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;
            sqlx::query(r#"SELECT * FROM complaints WHERE id = ANY($1)"#)
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut item_map = HashMap::with_capacity(rows.len());
        for row in rows {
            let item = ComplaintModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }
        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}

#[async_trait]
impl LoadBatch<Postgres, ComplaintModel> for ComplaintRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<ComplaintModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

#[async_trait]
impl Load<Postgres, ComplaintModel> for ComplaintRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<ComplaintModel, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, &[id])
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| RepositoryError::NotFound { entity: "complaint", id }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{create_test_audit_log, create_test_complaint};
    use crate::test_helper::setup_test_context;
    use civic_desk_db::repository::{CreateBatch, Load, LoadBatch};
    use civic_desk_db::RepositoryError;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_load_batch_keeps_request_order() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let audit_log = create_test_audit_log();
        ctx.audit_repos().audit_log_repository.create(&audit_log).await?;
        let complaint_repo = &ctx.complaint_repos().complaint_repository;

        let first = create_test_complaint(Uuid::new_v4());
        let second = create_test_complaint(Uuid::new_v4());
        complaint_repo
            .create_batch(vec![first.clone(), second.clone()], Some(audit_log.id))
            .await?;

        let missing = Uuid::new_v4();
        let loaded = complaint_repo.load_batch(&[second.id, missing, first.id]).await?;
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].as_ref().map(|c| c.id), Some(second.id));
        assert!(loaded[1].is_none());
        assert_eq!(loaded[2].as_ref().map(|c| c.id), Some(first.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let id = Uuid::new_v4();
        let err = ctx.complaint_repos().complaint_repository.load(id).await.unwrap_err();
        assert_eq!(
            RepositoryError::find(err.as_ref()),
            Some(&RepositoryError::NotFound { entity: "complaint", id })
        );
        Ok(())
    }
}
