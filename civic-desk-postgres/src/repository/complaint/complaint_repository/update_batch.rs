use async_trait::async_trait;
use civic_desk_db::models::{AuditLinkModel, ComplaintModel, EntityType};
use civic_desk_db::repository::UpdateBatch;
use civic_desk_db::utils::hash_as_i64;
use civic_desk_db::RepositoryError;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ComplaintRepositoryImpl;
use crate::repository::audit::audit_link_repository::create::insert_audit_link;

impl ComplaintRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &ComplaintRepositoryImpl,
        items: Vec<ComplaintModel>,
        audit_log_id: Uuid,
    ) -> Result<Vec<ComplaintModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut updated_items = Vec::with_capacity(items.len());
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;

        for mut item in items {
            let previous_hash = item.hash;
            let previous_audit_log_id = item
                .audit_log_id
                .ok_or(RepositoryError::MissingAuditLog(item.id))?;

            let mut entity_for_hashing = item.clone();
            entity_for_hashing.hash = 0;
            if hash_as_i64(&entity_for_hashing)? == previous_hash {
                updated_items.push(item);
                continue;
            }

            item.antecedent_hash = previous_hash;
            item.antecedent_audit_log_id = previous_audit_log_id;
            item.audit_log_id = Some(audit_log_id);
            item.hash = 0;
            item.hash = hash_as_i64(&item)?;

            Self::insert_snapshot(&mut **transaction, &item).await?;

            let rows_affected = sqlx::query(
                r#"
                UPDATE complaints SET
                category = $2, sub_category = $3, description = $4,
                city = $5, area = $6, priority = $7, status = $8, image_url = $9,
                assigned_department_id = $10, assigned_officer_id = $11, updated_at = $12,
                antecedent_hash = $13, antecedent_audit_log_id = $14,
                hash = $15, audit_log_id = $16
                WHERE id = $1 AND hash = $17 AND audit_log_id = $18
                "#,
            )
            .bind(item.id)
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
            .bind(item.updated_at)
            .bind(item.antecedent_hash)
            .bind(item.antecedent_audit_log_id)
            .bind(item.hash)
            .bind(item.audit_log_id)
            .bind(previous_hash)
            .bind(previous_audit_log_id)
            .execute(&mut **transaction)
            .await?
            .rows_affected();

            if rows_affected == 0 {
                tracing::warn!(complaint_id = %item.id, "complaint changed since it was loaded");
                return Err(RepositoryError::ConcurrentModification {
                    entity: "complaint",
                    id: item.id,
                }
                .into());
            }

            let audit_link = AuditLinkModel {
                audit_log_id,
                entity_id: item.id,
                entity_type: EntityType::Complaint,
            };
            insert_audit_link(&mut **transaction, &audit_link).await?;

            updated_items.push(item);
        }

        Ok(updated_items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, ComplaintModel> for ComplaintRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<ComplaintModel>,
        audit_log_id: Uuid,
    ) -> Result<Vec<ComplaintModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items, audit_log_id).await
    }
}
