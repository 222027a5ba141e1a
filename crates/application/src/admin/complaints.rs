//! Admin escape hatch on complaints: unconditional status and comment
//! overwrites that bypass the role-scoped transition paths, plus hard
//! delete. Gated to the admin role at the HTTP layer.

use crate::complaints::dtos::ComplaintDetail;
use crate::complaints::lifecycle::parse_admin_status;
use crate::{AppError, AppResult};
use chrono::Utc;
use fixdesk_core::entities::complaints;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// `comment: null` clears the stored comment, any string overwrites it.
#[derive(Debug, Serialize, Deserialize)]
pub struct SetCommentRequest {
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminComplaintResponse {
    pub message: String,
    pub complaint: ComplaintDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteComplaintResponse {
    pub message: String,
    pub id: i64,
}

pub struct UpdateComplaintStatusUseCase;

impl UpdateComplaintStatusUseCase {
    #[instrument(skip(db, req), fields(complaint_id = complaint_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        complaint_id: i64,
        req: UpdateStatusRequest,
    ) -> AppResult<AdminComplaintResponse> {
        let status = parse_admin_status(&req.status)?;

        let complaint = complaints::Entity::find_by_id(complaint_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Complaint not found".to_string()))?;

        let mut active: complaints::ActiveModel = complaint.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(db).await?;

        info!(status = status.as_str(), "Complaint status overridden");
        Ok(AdminComplaintResponse {
            message: "Complaint status updated successfully!".to_string(),
            complaint: ComplaintDetail::from_model(updated, None),
        })
    }
}

pub struct SetAdminCommentUseCase;

impl SetAdminCommentUseCase {
    #[instrument(skip(db, req), fields(complaint_id = complaint_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        complaint_id: i64,
        req: SetCommentRequest,
    ) -> AppResult<AdminComplaintResponse> {
        let complaint = complaints::Entity::find_by_id(complaint_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Complaint not found".to_string()))?;

        let mut active: complaints::ActiveModel = complaint.into();
        active.admin_comment = Set(req.comment);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(db).await?;

        Ok(AdminComplaintResponse {
            message: "Admin comment updated successfully!".to_string(),
            complaint: ComplaintDetail::from_model(updated, None),
        })
    }
}

pub struct DeleteComplaintUseCase;

impl DeleteComplaintUseCase {
    #[instrument(skip(db), fields(complaint_id = complaint_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        complaint_id: i64,
    ) -> AppResult<DeleteComplaintResponse> {
        let complaint = complaints::Entity::find_by_id(complaint_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Complaint not found".to_string()))?;

        complaint.delete(db).await?;

        info!("Complaint deleted");
        Ok(DeleteComplaintResponse {
            message: format!("Complaint with ID {} deleted successfully!", complaint_id),
            id: complaint_id,
        })
    }
}
