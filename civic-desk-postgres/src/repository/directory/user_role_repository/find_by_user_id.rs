use civic_desk_db::models::UserRoleModel;
use civic_desk_db::RepositoryError;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::UserRoleRepositoryImpl;

impl UserRoleRepositoryImpl {
    /// Role assignment of a user; `None` when the user has none
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<UserRoleModel>, Box<dyn Error + Send + Sync>> {
        let query = sqlx::query_as::<_, UserRoleModel>(
            r#"SELECT id, user_id, role, department_id FROM user_roles WHERE user_id = $1"#,
        )
        .bind(user_id);

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;
        Ok(query.fetch_optional(&mut **transaction).await?)
    }
}
