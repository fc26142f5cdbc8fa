use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for updating multiple entities in a batch
///
/// Only items whose content hash changed are written. Each write is guarded
/// by the hash and audit log id the item was loaded with; if another
/// transaction got there first the update fails with
/// `RepositoryError::ConcurrentModification`.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable trait
#[async_trait]
pub trait UpdateBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// # Arguments
    /// * `items` - Entities to update, as loaded and then modified
    /// * `audit_log_id` - Audit log of the surrounding transaction
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The items with their new hash and audit log reference
    async fn update_batch(
        &self,
        items: Vec<T>,
        audit_log_id: Uuid,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
