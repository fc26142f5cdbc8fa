//! Schema setup and teardown from the SQL files shipped with this crate.
//!
//! `migrations/` runs in ascending file order, `cleanup/` in descending
//! order. Every script is idempotent.

use sqlx::PgPool;
use std::fs;
use std::path::Path;

/// Executes `migrations/*.sql` in ascending order
///
/// # Example
///
/// ```rust,no_run
/// use sqlx::PgPool;
/// use civic_desk_postgres::repository::db_init::init_database;
///
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// init_database(pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn init_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    execute_sql_files_in_order(pool, &migrations_dir, true).await
}

/// Executes `cleanup/*.sql` in descending order, dropping every table and type
pub async fn cleanup_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    let cleanup_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("cleanup");
    execute_sql_files_in_order(pool, &cleanup_dir, false).await
}

async fn execute_sql_files_in_order(
    pool: &PgPool,
    dir: &Path,
    ascending: bool,
) -> Result<(), sqlx::Error> {
    let mut entries: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("sql"))
        .collect();

    entries.sort();
    if !ascending {
        entries.reverse();
    }

    for path in entries {
        tracing::debug!(file = %path.display(), "executing sql script");
        let sql = fs::read_to_string(&path)?;
        sqlx::raw_sql(&sql).execute(pool).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PostgresConfig;

    #[tokio::test]
    async fn test_init_is_repeatable() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let pool = PostgresConfig::from_env().connect().await?;

        init_database(&pool).await?;
        init_database(&pool).await?;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name IN \
             ('complaints', 'complaint_status_history', 'user_roles', 'departments')",
        )
        .fetch_one(&pool)
        .await?;
        assert_eq!(tables, 4);
        Ok(())
    }
}
