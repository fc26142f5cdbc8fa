use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::catalog;
use super::common_enums::{ComplaintPriority, ComplaintStatus};
use crate::error::ApiResult;

/// Citizen intake form.
///
/// `sub_category` must belong to `category` and `area` to `city`; both are
/// checked against the static catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_catalog_membership"))]
pub struct NewComplaintRequest {
    #[validate(length(min = 1, max = 50, message = "category is required"))]
    pub category: String,

    #[validate(length(min = 1, max = 100, message = "sub-category is required"))]
    pub sub_category: String,

    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 50, message = "city is required"))]
    pub city: String,

    #[validate(length(min = 1, max = 50, message = "area is required"))]
    pub area: String,

    /// Public URL produced by the upload collaborator
    #[validate(url(message = "image reference must be a URL"))]
    pub image_url: Option<String>,
}

impl NewComplaintRequest {
    /// Trims free text, drops a blank image reference and validates the result
    pub fn validated(mut self) -> ApiResult<Self> {
        self.description = self.description.trim().to_string();
        self.image_url = self
            .image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        self.validate()?;
        Ok(self)
    }
}

fn validate_catalog_membership(request: &NewComplaintRequest) -> Result<(), ValidationError> {
    if !request.category.is_empty()
        && !catalog::is_valid_sub_category(&request.category, &request.sub_category)
    {
        return Err(ValidationError::new("sub_category_not_in_category")
            .with_message("sub-category does not belong to the selected category".into()));
    }
    if !request.city.is_empty() && !catalog::is_valid_area(&request.city, &request.area) {
        return Err(ValidationError::new("area_not_in_city")
            .with_message("area does not belong to the selected city".into()));
    }
    Ok(())
}

/// Requested change to a complaint.
///
/// Absent fields are left as they are. For the assignment fields
/// `Some(None)` clears the assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintChanges {
    pub status: Option<ComplaintStatus>,
    pub priority: Option<ComplaintPriority>,
    pub assigned_department_id: Option<Option<Uuid>>,
    pub assigned_officer_id: Option<Option<Uuid>>,
    /// Recorded on the history entry when the status changes
    pub note: Option<String>,
}

impl ComplaintChanges {
    pub fn status(status: ComplaintStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn with_priority(mut self, priority: ComplaintPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_department(mut self, department_id: Option<Uuid>) -> Self {
        self.assigned_department_id = Some(department_id);
        self
    }

    pub fn with_officer(mut self, officer_id: Option<Uuid>) -> Self {
        self.assigned_officer_id = Some(officer_id);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Note with surrounding whitespace removed; blank notes become `None`
    pub fn normalized_note(&self) -> Option<String> {
        self.note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }

    /// True when anything other than the status (and its note) is requested
    pub fn touches_more_than_status(&self) -> bool {
        self.priority.is_some()
            || self.assigned_department_id.is_some()
            || self.assigned_officer_id.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && !self.touches_more_than_status()
    }
}
