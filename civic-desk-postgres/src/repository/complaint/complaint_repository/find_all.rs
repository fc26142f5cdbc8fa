use civic_desk_db::models::ComplaintModel;
use civic_desk_db::RepositoryError;
use std::error::Error;

use super::repo_impl::{complaints_from_rows, ComplaintRepositoryImpl};

impl ComplaintRepositoryImpl {
    /// Every complaint, newest first
    pub async fn find_all(&self) -> Result<Vec<ComplaintModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;
            sqlx::query(r#"SELECT * FROM complaints ORDER BY created_at DESC, id"#)
                .fetch_all(&mut **transaction)
                .await?
        };
        complaints_from_rows(&rows)
    }
}
