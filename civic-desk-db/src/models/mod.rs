pub mod auditable;
pub mod identifiable;
pub mod audit;
pub mod complaint;
pub mod status_history;
pub mod department;
pub mod user_role;

// Re-exports
pub use auditable::*;
pub use identifiable::*;
pub use audit::*;
pub use complaint::*;
pub use status_history::*;
pub use department::*;
pub use user_role::*;
