pub mod create_batch;
pub mod exist_by_ids;
pub mod load;
pub mod load_audits;
pub mod load_batch;
pub mod pagination;
pub mod update_batch;

// Re-exports
pub use create_batch::*;
pub use exist_by_ids::*;
pub use load::*;
pub use load_audits::*;
pub use load_batch::*;
pub use pagination::*;
pub use update_batch::*;
