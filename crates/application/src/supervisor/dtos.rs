use chrono::{DateTime, Utc};
use fixdesk_core::{ComplaintStatus, ReviewStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Complaint row for the supervisor/admin dashboard, joined with the
/// submitter, the assigned technician and the finalizer.
#[derive(Debug, Serialize, Deserialize)]
pub struct SupervisorComplaint {
    pub id: i64,
    pub reference: String,
    pub user_id: Uuid,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub subject: String,
    pub description: String,
    pub phone: String,
    pub product: String,
    pub department: String,
    pub status: ComplaintStatus,
    pub admin_comment: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub technician_name: Option<String>,
    pub technician_email: Option<String>,
    pub technician_response: Option<String>,
    pub supervisor_review_status: ReviewStatus,
    pub final_status_set_by: Option<Uuid>,
    pub finalizer_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssignComplaintRequest {
    pub technician_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssignComplaintResponse {
    pub message: String,
    pub id: i64,
    pub assigned_to: Uuid,
    pub status: ComplaintStatus,
    pub supervisor_review_status: ReviewStatus,
    pub updated_at: DateTime<Utc>,
}

/// Review payload. Statuses arrive as raw strings and are checked against
/// the lifecycle allow-lists before any write. A missing comment keeps
/// the stored one; an empty string clears it.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewComplaintRequest {
    pub supervisor_review_status: String,
    pub final_status: String,
    #[serde(default)]
    pub supervisor_comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewComplaintResponse {
    pub message: String,
    pub id: i64,
    pub status: ComplaintStatus,
    pub supervisor_review_status: ReviewStatus,
    pub admin_comment: Option<String>,
    pub final_status_set_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TechnicianInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Fully-joined dataset row consumed by the report/export service.
/// Spreadsheet formatting happens downstream.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportRow {
    pub complaint_id: i64,
    pub reference: String,
    pub subject: String,
    pub description: String,
    pub status: ComplaintStatus,
    pub product: String,
    pub department: String,
    pub technician_response: Option<String>,
    pub admin_comment: Option<String>,
    pub supervisor_review_status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub contact_phone: String,
    pub assigned_technician_name: Option<String>,
}
