use civic_desk_api::{ComplaintPriority, ComplaintStatus};
use serde::{Deserialize, Serialize};

use crate::models::ComplaintModel;

/// A single admin filter condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion {
    /// Case-insensitive substring over description and sub-category
    Search(String),
    Category(String),
    Status(ComplaintStatus),
    City(String),
    Priority(ComplaintPriority),
}

impl Criterion {
    pub fn matches(&self, complaint: &ComplaintModel) -> bool {
        match self {
            Criterion::Search(needle) => {
                let needle = needle.trim().to_lowercase();
                needle.is_empty()
                    || complaint.description.to_lowercase().contains(&needle)
                    || complaint.sub_category.to_lowercase().contains(&needle)
            }
            Criterion::Category(category) => complaint.category.as_str() == category,
            Criterion::Status(status) => complaint.status == *status,
            Criterion::City(city) => complaint.city.as_str() == city,
            Criterion::Priority(priority) => complaint.priority == *priority,
        }
    }
}

/// Conjunction of criteria; the empty filter matches everything.
///
/// # Example
/// ```
/// use civic_desk_db::views::ComplaintFilter;
/// use civic_desk_api::ComplaintStatus;
///
/// let filter = ComplaintFilter::new()
///     .search("leak")
///     .status(ComplaintStatus::Open)
///     .city("Mumbai");
/// assert_eq!(filter.criteria().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintFilter {
    criteria: Vec<Criterion>,
}

impl ComplaintFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn with(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn search(self, text: impl Into<String>) -> Self {
        self.with(Criterion::Search(text.into()))
    }

    pub fn category(self, category: impl Into<String>) -> Self {
        self.with(Criterion::Category(category.into()))
    }

    pub fn status(self, status: ComplaintStatus) -> Self {
        self.with(Criterion::Status(status))
    }

    pub fn city(self, city: impl Into<String>) -> Self {
        self.with(Criterion::City(city.into()))
    }

    pub fn priority(self, priority: ComplaintPriority) -> Self {
        self.with(Criterion::Priority(priority))
    }

    /// Filter matching what both `self` and `other` match
    pub fn and(mut self, other: ComplaintFilter) -> Self {
        self.criteria.extend(other.criteria);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, complaint: &ComplaintModel) -> bool {
        self.criteria.iter().all(|c| c.matches(complaint))
    }

    /// Matching complaints, in input order
    pub fn apply<'a>(&self, complaints: &'a [ComplaintModel]) -> Vec<&'a ComplaintModel> {
        complaints.iter().filter(|c| self.matches(c)).collect()
    }
}
