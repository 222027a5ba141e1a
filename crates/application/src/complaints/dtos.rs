use chrono::{DateTime, Utc};
use fixdesk_core::{entities::complaints, ComplaintStatus, ReviewStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Rejects whitespace-only values, which the store would otherwise trim
/// down to an empty field.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateComplaintRequest {
    #[validate(length(min = 1, max = 200, message = "Subject is required"))]
    #[validate(custom(function = not_blank, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    #[validate(custom(function = not_blank, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, max = 20, message = "Phone is required"))]
    #[validate(custom(function = not_blank, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, max = 100, message = "Product is required"))]
    #[validate(custom(function = not_blank, message = "Product is required"))]
    pub product: String,
    #[validate(length(min = 1, max = 100, message = "Department is required"))]
    #[validate(custom(function = not_blank, message = "Department is required"))]
    pub department: String,
}

/// Full complaint detail as returned to the owner and the public tracking
/// endpoint. Field names and status strings echo the stored row verbatim.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComplaintDetail {
    pub id: i64,
    pub reference: String,
    pub subject: String,
    pub description: String,
    pub phone: String,
    pub product: String,
    pub department: String,
    pub status: ComplaintStatus,
    pub admin_comment: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub technician_name: Option<String>,
    pub technician_response: Option<String>,
    pub supervisor_review_status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ComplaintDetail {
    pub fn from_model(complaint: complaints::Model, technician_name: Option<String>) -> Self {
        Self {
            id: complaint.id,
            reference: complaint.reference(),
            subject: complaint.subject,
            description: complaint.description,
            phone: complaint.phone,
            product: complaint.product,
            department: complaint.department,
            status: complaint.status,
            admin_comment: complaint.admin_comment,
            assigned_to: complaint.assigned_to,
            technician_name,
            technician_response: complaint.technician_response,
            supervisor_review_status: complaint.supervisor_review_status,
            created_at: complaint.created_at.into(),
            updated_at: complaint.updated_at.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateComplaintResponse {
    pub message: String,
    pub complaint: ComplaintDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackComplaintResponse {
    pub message: String,
    pub complaint: ComplaintDetail,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateComplaintRequest {
        CreateComplaintRequest {
            subject: "Leak".to_string(),
            description: "Tap leaking".to_string(),
            phone: "555-0100".to_string(),
            product: "Faucet".to_string(),
            department: "Plumbing".to_string(),
        }
    }

    #[test]
    fn test_create_complaint_validation() {
        assert!(request().validate().is_ok());

        let mut missing = request();
        missing.subject = "".to_string();
        assert!(missing.validate().is_err());
    }

    #[test]
    fn test_create_complaint_rejects_blank_fields() {
        // Whitespace-only input would be stored empty after trimming.
        let mut blank = request();
        blank.subject = "   ".to_string();
        assert!(blank.validate().is_err());

        let mut blank = request();
        blank.department = "\t\n".to_string();
        assert!(blank.validate().is_err());
    }
}
