use async_trait::async_trait;
use civic_desk_db::models::{AuditLinkModel, ComplaintModel, EntityType};
use civic_desk_db::repository::CreateBatch;
use civic_desk_db::utils::hash_as_i64;
use civic_desk_db::RepositoryError;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ComplaintRepositoryImpl;
use crate::repository::audit::audit_link_repository::create::insert_audit_link;

impl ComplaintRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ComplaintRepositoryImpl,
        items: Vec<ComplaintModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ComplaintModel>, Box<dyn Error + Send + Sync>> {
        let audit_log_id = audit_log_id.ok_or("audit_log_id is required for ComplaintModel")?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;

        for mut item in items {
            item.hash = 0;
            item.audit_log_id = Some(audit_log_id);
            item.hash = hash_as_i64(&item)?;

            Self::insert_snapshot(&mut **transaction, &item).await?;

            sqlx::query(
                r#"
                INSERT INTO complaints
                (id, user_id, category, sub_category, description, city, area, priority, status, image_url, assigned_department_id, assigned_officer_id, created_at, updated_at, antecedent_hash, antecedent_audit_log_id, hash, audit_log_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
                "#,
            )
            .bind(item.id)
            .bind(item.user_id)
            .bind(item.category.as_str())
            .bind(item.sub_category.as_str())
            .bind(item.description.as_str())
            .bind(item.city.as_str())
            .bind(item.area.as_str())
            .bind(item.priority)
            .bind(item.status)
            .bind(item.image_url.as_deref())
            .bind(item.assigned_department_id)
            .bind(item.assigned_officer_id)
            .bind(item.created_at)
            .bind(item.updated_at)
            .bind(item.antecedent_hash)
            .bind(item.antecedent_audit_log_id)
            .bind(item.hash)
            .bind(item.audit_log_id)
            .execute(&mut **transaction)
            .await?;

            let audit_link = AuditLinkModel {
                audit_log_id,
                entity_id: item.id,
                entity_type: EntityType::Complaint,
            };
            insert_audit_link(&mut **transaction, &audit_link).await?;

            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, ComplaintModel> for ComplaintRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ComplaintModel>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<ComplaintModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items, audit_log_id).await
    }
}
