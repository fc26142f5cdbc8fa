use civic_desk_db::models::{AuditLinkModel, EntityType, UserRoleModel};
use civic_desk_db::RepositoryError;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::UserRoleRepositoryImpl;
use crate::repository::audit::audit_link_repository::create::insert_audit_link;

impl UserRoleRepositoryImpl {
    /// Inserts the assignment or replaces the user's existing one.
    ///
    /// A replaced row keeps its id, which is what the returned model carries.
    pub async fn assign(
        &self,
        item: &UserRoleModel,
        audit_log_id: Uuid,
    ) -> Result<UserRoleModel, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;

        let saved = sqlx::query_as::<_, UserRoleModel>(
            r#"
            INSERT INTO user_roles (id, user_id, role, department_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
                SET role = EXCLUDED.role, department_id = EXCLUDED.department_id
            RETURNING id, user_id, role, department_id
            "#,
        )
        .bind(item.id)
        .bind(item.user_id)
        .bind(item.role)
        .bind(item.department_id)
        .fetch_one(&mut **transaction)
        .await?;

        let audit_link = AuditLinkModel {
            audit_log_id,
            entity_id: saved.id,
            entity_type: EntityType::UserRole,
        };
        insert_audit_link(&mut **transaction, &audit_link).await?;

        Ok(saved)
    }
}
