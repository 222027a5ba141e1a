use super::dtos::ReportRow;
use crate::lookup::users_by_id;
use crate::AppResult;
use fixdesk_core::entities::complaints;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

/// Builds the joined complaint + submitter + technician dataset the
/// export service consumes. Formatting (spreadsheet layout, column
/// widths) is the exporter's concern, not ours.
pub struct ComplaintReportUseCase;

impl ComplaintReportUseCase {
    pub async fn execute(db: &DatabaseConnection) -> AppResult<Vec<ReportRow>> {
        let rows = complaints::Entity::find()
            .order_by_desc(complaints::Column::CreatedAt)
            .all(db)
            .await?;

        let referenced = rows
            .iter()
            .flat_map(|c| [Some(c.user_id), c.assigned_to].into_iter().flatten());
        let users = users_by_id(db, referenced).await?;

        Ok(rows
            .into_iter()
            .map(|c| {
                let owner = users.get(&c.user_id);
                let technician = c.assigned_to.and_then(|id| users.get(&id));
                ReportRow {
                    complaint_id: c.id,
                    reference: c.reference(),
                    subject: c.subject,
                    description: c.description,
                    status: c.status,
                    product: c.product,
                    department: c.department,
                    technician_response: c.technician_response,
                    admin_comment: c.admin_comment,
                    supervisor_review_status: c.supervisor_review_status,
                    created_at: c.created_at.into(),
                    updated_at: c.updated_at.into(),
                    user_name: owner.map(|u| u.name.clone()),
                    user_email: owner.map(|u| u.email.clone()),
                    contact_phone: c.phone,
                    assigned_technician_name: technician.map(|u| u.name.clone()),
                }
            })
            .collect())
    }
}
