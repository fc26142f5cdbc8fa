use civic_desk_db::models::DepartmentModel;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

use postgres_unit_of_work::Executor;
use crate::utils::{get_heapless_string, TryFromRow};

pub struct DepartmentRepositoryImpl {
    pub executor: Executor,
}

impl DepartmentRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for DepartmentModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(DepartmentModel {
            id: row.try_get("id")?,
            name: get_heapless_string(row, "name")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
