//! Ending the transaction shared through an [`Executor`].
//!
//! Repositories of one session hold clones of the same executor. Finishing
//! takes the transaction out of it, so any later repository call fails with
//! [`RepositoryError::TransactionConsumed`], and so does a second commit.

use civic_desk_db::RepositoryError;
use postgres_unit_of_work::Executor;
use std::error::Error;

pub async fn commit(executor: &Executor) -> Result<(), Box<dyn Error + Send + Sync>> {
    let transaction = executor
        .tx
        .lock()
        .await
        .take()
        .ok_or(RepositoryError::TransactionConsumed)?;
    transaction.commit().await?;
    Ok(())
}

pub async fn rollback(executor: &Executor) -> Result<(), Box<dyn Error + Send + Sync>> {
    let transaction = executor
        .tx
        .lock()
        .await
        .take()
        .ok_or(RepositoryError::TransactionConsumed)?;
    transaction.rollback().await?;
    Ok(())
}
