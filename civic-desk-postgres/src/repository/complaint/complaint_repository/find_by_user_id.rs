use civic_desk_db::models::ComplaintModel;
use civic_desk_db::RepositoryError;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{complaints_from_rows, ComplaintRepositoryImpl};

impl ComplaintRepositoryImpl {
    /// Complaints filed by `user_id`, newest first
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<ComplaintModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;
            sqlx::query(
                r#"
                SELECT * FROM complaints
                WHERE user_id = $1
                ORDER BY created_at DESC, id
                "#,
            )
            .bind(user_id)
            .fetch_all(&mut **transaction)
            .await?
        };
        tracing::debug!(%user_id, count = rows.len(), "loaded citizen complaints");
        complaints_from_rows(&rows)
    }
}
