use civic_desk_db::models::StatusHistoryModel;
use civic_desk_db::RepositoryError;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::StatusHistoryRepositoryImpl;

impl StatusHistoryRepositoryImpl {
    /// Status trail of a complaint, oldest entry first
    pub async fn find_by_complaint_id(
        &self,
        complaint_id: Uuid,
    ) -> Result<Vec<StatusHistoryModel>, Box<dyn Error + Send + Sync>> {
        let query = sqlx::query_as::<_, StatusHistoryModel>(
            r#"
            SELECT id, complaint_id, old_status, new_status, notes, changed_by, created_at
            FROM complaint_status_history
            WHERE complaint_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(complaint_id);

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;
        Ok(query.fetch_all(&mut **transaction).await?)
    }
}
