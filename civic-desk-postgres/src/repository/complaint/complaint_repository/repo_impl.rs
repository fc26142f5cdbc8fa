use civic_desk_db::models::ComplaintModel;
use sqlx::{postgres::PgRow, PgConnection, Row};
use std::error::Error;

use postgres_unit_of_work::Executor;
use crate::utils::{get_heapless_string, TryFromRow};

pub struct ComplaintRepositoryImpl {
    pub executor: Executor,
}

impl ComplaintRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Writes the snapshot of `item` to `complaint_audit`
    pub(super) async fn insert_snapshot(
        connection: &mut PgConnection,
        item: &ComplaintModel,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO complaint_audit
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
        .execute(connection)
        .await?;
        Ok(())
    }
}

impl TryFromRow<PgRow> for ComplaintModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ComplaintModel {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            category: get_heapless_string(row, "category")?,
            sub_category: get_heapless_string(row, "sub_category")?,
            description: row.try_get("description")?,
            city: get_heapless_string(row, "city")?,
            area: get_heapless_string(row, "area")?,
            priority: row.try_get("priority")?,
            status: row.try_get("status")?,
            image_url: row.try_get("image_url")?,
            assigned_department_id: row.try_get("assigned_department_id")?,
            assigned_officer_id: row.try_get("assigned_officer_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            antecedent_hash: row.try_get("antecedent_hash")?,
            antecedent_audit_log_id: row.try_get("antecedent_audit_log_id")?,
            hash: row.try_get("hash")?,
            audit_log_id: row.try_get("audit_log_id")?,
        })
    }
}

/// Maps rows in query order
pub(super) fn complaints_from_rows(rows: &[PgRow]) -> Result<Vec<ComplaintModel>, Box<dyn Error + Send + Sync>> {
    rows.iter().map(ComplaintModel::try_from_row).collect()
}
