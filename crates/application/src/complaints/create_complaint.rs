use super::dtos::{ComplaintDetail, CreateComplaintRequest, CreateComplaintResponse};
use crate::AppResult;
use chrono::Utc;
use fixdesk_core::{entities::complaints, ComplaintStatus, ReviewStatus};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

pub struct CreateComplaintUseCase;

impl CreateComplaintUseCase {
    #[instrument(skip(db, req), fields(owner_id = %owner_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        owner_id: Uuid,
        req: CreateComplaintRequest,
    ) -> AppResult<CreateComplaintResponse> {
        req.validate()?;

        let now = Utc::now();
        let new_complaint = complaints::ActiveModel {
            user_id: Set(owner_id),
            subject: Set(req.subject.trim().to_string()),
            description: Set(req.description.trim().to_string()),
            phone: Set(req.phone.trim().to_string()),
            product: Set(req.product.trim().to_string()),
            department: Set(req.department.trim().to_string()),
            status: Set(ComplaintStatus::Pending),
            assigned_to: Set(None),
            technician_response: Set(None),
            supervisor_review_status: Set(ReviewStatus::NotApplicable),
            admin_comment: Set(None),
            final_status_set_by: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let complaint = new_complaint.insert(db).await?;
        info!(complaint_id = complaint.id, "Complaint submitted");

        Ok(CreateComplaintResponse {
            message: "Complaint submitted successfully!".to_string(),
            complaint: ComplaintDetail::from_model(complaint, None),
        })
    }
}
