use async_trait::async_trait;
use civic_desk_db::models::{AuditLinkModel, DepartmentModel, EntityType};
use civic_desk_db::repository::CreateBatch;
use civic_desk_db::RepositoryError;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::DepartmentRepositoryImpl;
use crate::repository::audit::audit_link_repository::create::insert_audit_link;

#[async_trait]
impl CreateBatch<Postgres, DepartmentModel> for DepartmentRepositoryImpl {
    /// Departments carry no hash chain; with an audit log they are linked to it
    async fn create_batch(
        &self,
        items: Vec<DepartmentModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<DepartmentModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;

        for item in &items {
            sqlx::query(r#"INSERT INTO departments (id, name, created_at) VALUES ($1, $2, $3)"#)
                .bind(item.id)
                .bind(item.name.as_str())
                .bind(item.created_at)
                .execute(&mut **transaction)
                .await?;

            if let Some(audit_log_id) = audit_log_id {
                let audit_link = AuditLinkModel {
                    audit_log_id,
                    entity_id: item.id,
                    entity_type: EntityType::Department,
                };
                insert_audit_link(&mut **transaction, &audit_link).await?;
            }
        }

        Ok(items)
    }
}
