use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for creating multiple entities in a batch
///
/// All creates run inside the repository's unit of work. Returns the saved
/// items with generated fields (hash, audit log reference) populated.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable trait
#[async_trait]
pub trait CreateBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// Save multiple items
    ///
    /// # Arguments
    /// * `items` - Entities to create
    /// * `audit_log_id` - Audit log of the surrounding transaction; required for auditable entities
    async fn create_batch(
        &self,
        items: Vec<T>,
        audit_log_id: Option<Uuid>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
