use civic_desk_db::models::ComplaintModel;
use civic_desk_db::RepositoryError;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{complaints_from_rows, ComplaintRepositoryImpl};

impl ComplaintRepositoryImpl {
    /// Complaints assigned to `officer_id`, newest first
    pub async fn find_by_assigned_officer_id(
        &self,
        officer_id: Uuid,
    ) -> Result<Vec<ComplaintModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;
            sqlx::query(
                r#"
                SELECT * FROM complaints
                WHERE assigned_officer_id = $1
                ORDER BY created_at DESC, id
                "#,
            )
            .bind(officer_id)
            .fetch_all(&mut **transaction)
            .await?
        };
        tracing::debug!(%officer_id, count = rows.len(), "loaded officer assignments");
        complaints_from_rows(&rows)
    }
}
