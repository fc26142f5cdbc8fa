use async_trait::async_trait;
use civic_desk_db::models::ComplaintModel;
use civic_desk_db::repository::{LoadAudits, Page, PageRequest};
use civic_desk_db::RepositoryError;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{complaints_from_rows, ComplaintRepositoryImpl};

impl ComplaintRepositoryImpl {
    pub(super) async fn load_audits_impl(
        repo: &ComplaintRepositoryImpl,
        id: Uuid,
        page: PageRequest,
    ) -> Result<Page<ComplaintModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;

        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM complaint_audit WHERE id = $1"#)
            .bind(id)
            .fetch_one(&mut **transaction)
            .await?;

        let rows = sqlx::query(
            r#"
            SELECT * FROM complaint_audit
            WHERE id = $1
            ORDER BY updated_at DESC, audit_log_id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(id)
        .bind(page.limit_i64())
        .bind(page.offset_i64())
        .fetch_all(&mut **transaction)
        .await?;

        let items = complaints_from_rows(&rows)?;
        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[async_trait]
impl LoadAudits<Postgres, ComplaintModel> for ComplaintRepositoryImpl {
    async fn load_audits(
        &self,
        id: Uuid,
        page: PageRequest,
    ) -> Result<Page<ComplaintModel>, Box<dyn Error + Send + Sync>> {
        Self::load_audits_impl(self, id, page).await
    }
}
