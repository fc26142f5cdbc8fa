use civic_desk_db::models::{AuditLinkModel, EntityType, StatusHistoryModel};
use civic_desk_db::RepositoryError;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::StatusHistoryRepositoryImpl;
use crate::repository::audit::audit_link_repository::create::insert_audit_link;

impl StatusHistoryRepositoryImpl {
    /// Appends one entry and links it to the transaction's audit log
    pub async fn create(
        &self,
        entry: &StatusHistoryModel,
        audit_log_id: Uuid,
    ) -> Result<StatusHistoryModel, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;

        sqlx::query(
            r#"
            INSERT INTO complaint_status_history
            (id, complaint_id, old_status, new_status, notes, changed_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id)
        .bind(entry.complaint_id)
        .bind(entry.old_status)
        .bind(entry.new_status)
        .bind(entry.notes.as_deref())
        .bind(entry.changed_by)
        .bind(entry.created_at)
        .execute(&mut **transaction)
        .await?;

        let audit_link = AuditLinkModel {
            audit_log_id,
            entity_id: entry.id,
            entity_type: EntityType::StatusHistory,
        };
        insert_audit_link(&mut **transaction, &audit_link).await?;

        Ok(entry.clone())
    }
}
