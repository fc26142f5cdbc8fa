use async_trait::async_trait;
use civic_desk_db::models::{AuditLinkModel, EntityType, UserRoleModel};
use civic_desk_db::repository::CreateBatch;
use civic_desk_db::RepositoryError;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::UserRoleRepositoryImpl;
use crate::repository::audit::audit_link_repository::create::insert_audit_link;

#[async_trait]
impl CreateBatch<Postgres, UserRoleModel> for UserRoleRepositoryImpl {
    /// Fails on a second role for the same user (unique `user_id`)
    async fn create_batch(
        &self,
        items: Vec<UserRoleModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<UserRoleModel>, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO user_roles (id, user_id, role, department_id)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(item.id)
            .bind(item.user_id)
            .bind(item.role)
            .bind(item.department_id)
            .execute(&mut **transaction)
            .await?;

            if let Some(audit_log_id) = audit_log_id {
                let audit_link = AuditLinkModel {
                    audit_log_id,
                    entity_id: item.id,
                    entity_type: EntityType::UserRole,
                };
                insert_audit_link(&mut **transaction, &audit_link).await?;
            }
        }

        Ok(items)
    }
}
