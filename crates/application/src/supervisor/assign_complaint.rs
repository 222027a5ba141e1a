use super::dtos::{AssignComplaintRequest, AssignComplaintResponse};
use crate::{AppError, AppResult};
use chrono::Utc;
use fixdesk_core::{entities::complaints, entities::users, ComplaintStatus, ReviewStatus, Role};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{info, instrument};

/// Binds a complaint to exactly one technician. Re-assignment is allowed
/// from any status; the previous review verdict is wiped so an old
/// approval or rejection cannot leak into the new work item.
pub struct AssignComplaintUseCase;

impl AssignComplaintUseCase {
    #[instrument(skip(db, req), fields(complaint_id = complaint_id, technician_id = %req.technician_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        complaint_id: i64,
        req: AssignComplaintRequest,
    ) -> AppResult<AssignComplaintResponse> {
        // The target must hold the technician role at assignment time.
        let technician = users::Entity::find_by_id(req.technician_id)
            .one(db)
            .await?;
        match technician {
            Some(ref u) if u.role == Role::Technician => {}
            _ => {
                return Err(AppError::Validation(
                    "Invalid technician ID or user is not a technician".to_string(),
                ))
            }
        }

        let complaint = complaints::Entity::find_by_id(complaint_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Complaint not found".to_string()))?;

        let reference = complaint.reference();
        let mut active: complaints::ActiveModel = complaint.into();
        active.assigned_to = Set(Some(req.technician_id));
        active.status = Set(ComplaintStatus::Assigned);
        active.supervisor_review_status = Set(ReviewStatus::NotApplicable);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(db).await?;

        info!(complaint_id = updated.id, "Complaint assigned");

        Ok(AssignComplaintResponse {
            message: format!("Complaint {} assigned to technician successfully!", reference),
            id: updated.id,
            assigned_to: req.technician_id,
            status: updated.status,
            supervisor_review_status: updated.supervisor_review_status,
            updated_at: updated.updated_at.into(),
        })
    }
}
