use super::dtos::{ComplaintDetail, TrackComplaintResponse};
use crate::{AppError, AppResult};
use fixdesk_core::entities::{complaints, users};
use sea_orm::{DatabaseConnection, EntityTrait};

/// Status lookup by tracking id. Reachable without authentication so a
/// submitter can check a receipt without logging in. Ids are sequential,
/// so anyone holding a receipt number can read that complaint's detail.
pub struct TrackComplaintUseCase;

impl TrackComplaintUseCase {
    pub async fn execute(
        db: &DatabaseConnection,
        complaint_id: i64,
    ) -> AppResult<TrackComplaintResponse> {
        let complaint = complaints::Entity::find_by_id(complaint_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Complaint not found".to_string()))?;

        let technician_name = match complaint.assigned_to {
            Some(id) => users::Entity::find_by_id(id).one(db).await?.map(|u| u.name),
            None => None,
        };

        Ok(TrackComplaintResponse {
            message: "Complaint details found".to_string(),
            complaint: ComplaintDetail::from_model(complaint, technician_name),
        })
    }
}
