//! Read-side views over the complaint set: role scoping, admin filters,
//! aggregate reports and CSV export. None of these mutate anything.

pub mod export;
pub mod filter;
pub mod report;
pub mod scope;

pub use export::*;
pub use filter::*;
pub use report::*;
pub use scope::*;

#[cfg(test)]
pub(crate) mod test_support;
