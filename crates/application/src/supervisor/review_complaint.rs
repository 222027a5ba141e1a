use super::dtos::{ReviewComplaintRequest, ReviewComplaintResponse};
use crate::complaints::lifecycle::{parse_final_status, parse_review_decision};
use crate::{AppError, AppResult, Identity};
use chrono::Utc;
use fixdesk_core::entities::complaints;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{info, instrument};

/// Supervisor/admin verdict on a technician's work: sets the final
/// lifecycle status and the review status together and stamps who
/// finalized. Both enums are validated before the row is read so an
/// invalid payload never writes anything.
pub struct ReviewComplaintUseCase;

impl ReviewComplaintUseCase {
    #[instrument(skip(db, actor, req), fields(complaint_id = complaint_id, actor_id = %actor.id))]
    pub async fn execute(
        db: &DatabaseConnection,
        actor: &Identity,
        complaint_id: i64,
        req: ReviewComplaintRequest,
    ) -> AppResult<ReviewComplaintResponse> {
        let final_status = parse_final_status(&req.final_status)?;
        let review_status = parse_review_decision(&req.supervisor_review_status)?;

        let complaint = complaints::Entity::find_by_id(complaint_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Complaint not found".to_string()))?;

        let reference = complaint.reference();
        let mut active: complaints::ActiveModel = complaint.into();
        active.status = Set(final_status);
        active.supervisor_review_status = Set(review_status);
        // Absent comment keeps the stored value; an empty string clears it.
        if let Some(comment) = req.supervisor_comment {
            let comment = comment.trim().to_string();
            active.admin_comment = Set(if comment.is_empty() { None } else { Some(comment) });
        }
        active.final_status_set_by = Set(Some(actor.id));
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(db).await?;

        info!(complaint_id = updated.id, status = updated.status.as_str(), "Complaint finalized");

        Ok(ReviewComplaintResponse {
            message: format!("Complaint {} review and status finalized successfully!", reference),
            id: updated.id,
            status: updated.status,
            supervisor_review_status: updated.supervisor_review_status,
            admin_comment: updated.admin_comment,
            final_status_set_by: actor.id,
            updated_at: updated.updated_at.into(),
        })
    }
}
