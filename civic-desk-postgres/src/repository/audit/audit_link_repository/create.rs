use civic_desk_db::{models::AuditLinkModel, RepositoryError};
use sqlx::PgConnection;
use std::error::Error;

use super::repo_impl::AuditLinkRepositoryImpl;

/// Inserts one link row on an already locked connection
pub(crate) async fn insert_audit_link(
    connection: &mut PgConnection,
    audit_link: &AuditLinkModel,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO audit_link (audit_log_id, entity_id, entity_type)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(audit_link.audit_log_id)
    .bind(audit_link.entity_id)
    .bind(audit_link.entity_type)
    .execute(connection)
    .await?;
    Ok(())
}

impl AuditLinkRepositoryImpl {
    pub(super) async fn create_impl(
        repo: &AuditLinkRepositoryImpl,
        audit_link: &AuditLinkModel,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;
        insert_audit_link(&mut **transaction, audit_link).await?;
        Ok(())
    }
}
