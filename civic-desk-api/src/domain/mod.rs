pub mod catalog;
pub mod common_enums;
pub mod complaint_request;
pub mod session;

pub use catalog::*;
pub use common_enums::*;
pub use complaint_request::*;
pub use session::*;
