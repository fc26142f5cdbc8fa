use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::auditable::Auditable;
use crate::repository::pagination::{Page, PageRequest};

/// Generic repository trait for loading the audit snapshots of an entity
///
/// Every create and update writes a full copy of the entity to its audit
/// table. This trait pages through those copies, newest first.
///
/// # Example
/// ```ignore
/// let page = complaint_repo.load_audits(complaint_id, PageRequest::new(20, 0)).await?;
/// println!("Page {} of {}", page.page_number(), page.total_pages());
/// ```
#[async_trait]
pub trait LoadAudits<DB: Database, T: Auditable>: Send + Sync {
    async fn load_audits(
        &self,
        id: Uuid,
        page: PageRequest,
    ) -> Result<Page<T>, Box<dyn std::error::Error + Send + Sync>>;
}
