use super::dtos::{UpdateAssignedRequest, UpdateAssignedResponse};
use crate::complaints::lifecycle::parse_technician_status;
use crate::{AppError, AppResult};
use chrono::Utc;
use fixdesk_core::entities::complaints;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{info, instrument};
use uuid::Uuid;

/// Status/response update by the assigned technician. The assignment is
/// re-read from the store on every call; the caller's claim of being the
/// assignee is never trusted.
pub struct UpdateAssignedComplaintUseCase;

impl UpdateAssignedComplaintUseCase {
    #[instrument(skip(db, req), fields(complaint_id = complaint_id, technician_id = %technician_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        technician_id: Uuid,
        complaint_id: i64,
        req: UpdateAssignedRequest,
    ) -> AppResult<UpdateAssignedResponse> {
        if req.status.is_none() && req.technician_response.is_none() {
            return Err(AppError::Validation(
                "Status or technician response is required for update".to_string(),
            ));
        }

        // Validate the status before reading the row so a bad payload
        // cannot write anything.
        let status = req
            .status
            .as_deref()
            .map(parse_technician_status)
            .transpose()?;

        let complaint = complaints::Entity::find_by_id(complaint_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Complaint not found".to_string()))?;

        if complaint.assigned_to != Some(technician_id) {
            return Err(AppError::Authorization(
                "You are not authorized to update this complaint".to_string(),
            ));
        }

        let reference = complaint.reference();
        let mut active: complaints::ActiveModel = complaint.into();
        if let Some(status) = status {
            active.status = Set(status);
        }
        if let Some(response) = req.technician_response {
            active.technician_response = Set(Some(response));
        }
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(db).await?;

        info!(complaint_id = updated.id, "Complaint updated by technician");

        Ok(UpdateAssignedResponse {
            message: format!("Complaint {} updated successfully!", reference),
            id: updated.id,
            status: updated.status,
            technician_response: updated.technician_response,
            updated_at: updated.updated_at.into(),
        })
    }
}
