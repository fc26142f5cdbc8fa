use civic_desk_db::models::DepartmentModel;
use civic_desk_db::RepositoryError;
use std::error::Error;

use super::repo_impl::DepartmentRepositoryImpl;
use crate::utils::TryFromRow;

impl DepartmentRepositoryImpl {
    /// All departments ordered by name
    pub async fn find_all(&self) -> Result<Vec<DepartmentModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;
            sqlx::query(r#"SELECT id, name, created_at FROM departments ORDER BY name"#)
                .fetch_all(&mut **transaction)
                .await?
        };
        rows.iter().map(DepartmentModel::try_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::{create_test_department, setup_test_context};
    use civic_desk_db::repository::{CreateBatch, LoadBatch};

    #[tokio::test]
    async fn test_departments_listed_by_name() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let department_repo = &ctx.directory_repos().department_repository;

        let water = create_test_department("Zz Water Works");
        let roads = create_test_department("Zy Roads");
        department_repo
            .create_batch(vec![water.clone(), roads.clone()], None)
            .await?;

        let all = department_repo.find_all().await?;
        let names: Vec<_> = all
            .iter()
            .filter(|d| d.id == water.id || d.id == roads.id)
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["Zy Roads", "Zz Water Works"]);

        let loaded = department_repo.load_batch(&[water.id]).await?;
        assert_eq!(loaded, vec![Some(water)]);
        Ok(())
    }
}
