use async_trait::async_trait;
use civic_desk_db::models::DepartmentModel;
use civic_desk_db::repository::LoadBatch;
use civic_desk_db::RepositoryError;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::DepartmentRepositoryImpl;
use crate::utils::TryFromRow;

#[async_trait]
impl LoadBatch<Postgres, DepartmentModel> for DepartmentRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<DepartmentModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;
            sqlx::query(r#"SELECT id, name, created_at FROM departments WHERE id = ANY($1)"#)
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut item_map = HashMap::with_capacity(rows.len());
        for row in rows {
            let item = DepartmentModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }
        Ok(ids.iter().map(|id| item_map.remove(id)).collect())
    }
}
