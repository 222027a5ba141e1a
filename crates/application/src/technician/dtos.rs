use chrono::{DateTime, Utc};
use fixdesk_core::{ComplaintStatus, ReviewStatus};
use serde::{Deserialize, Serialize};

/// Work-queue row for a technician, joined with the submitter's contact
/// details.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssignedComplaint {
    pub id: i64,
    pub reference: String,
    pub subject: String,
    pub description: String,
    pub phone: String,
    pub product: String,
    pub department: String,
    pub status: ComplaintStatus,
    pub admin_comment: Option<String>,
    pub technician_response: Option<String>,
    pub supervisor_review_status: ReviewStatus,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Either field may be sent alone. `technician_response` is only written
/// when present in the payload; an empty string is a deliberate write.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateAssignedRequest {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub technician_response: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateAssignedResponse {
    pub message: String,
    pub id: i64,
    pub status: ComplaintStatus,
    pub technician_response: Option<String>,
    pub updated_at: DateTime<Utc>,
}
