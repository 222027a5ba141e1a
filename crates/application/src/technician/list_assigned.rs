use super::dtos::AssignedComplaint;
use crate::lookup::users_by_id;
use crate::AppResult;
use fixdesk_core::entities::complaints;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

pub struct ListAssignedComplaintsUseCase;

impl ListAssignedComplaintsUseCase {
    pub async fn execute(
        db: &DatabaseConnection,
        technician_id: Uuid,
    ) -> AppResult<Vec<AssignedComplaint>> {
        let rows = complaints::Entity::find()
            .filter(complaints::Column::AssignedTo.eq(technician_id))
            .order_by_desc(complaints::Column::CreatedAt)
            .all(db)
            .await?;

        let owners = users_by_id(db, rows.iter().map(|c| c.user_id)).await?;

        Ok(rows
            .into_iter()
            .map(|c| {
                let owner = owners.get(&c.user_id);
                AssignedComplaint {
                    id: c.id,
                    reference: c.reference(),
                    subject: c.subject,
                    description: c.description,
                    phone: c.phone,
                    product: c.product,
                    department: c.department,
                    status: c.status,
                    admin_comment: c.admin_comment,
                    technician_response: c.technician_response,
                    supervisor_review_status: c.supervisor_review_status,
                    user_name: owner.map(|u| u.name.clone()),
                    user_email: owner.map(|u| u.email.clone()),
                    created_at: c.created_at.into(),
                    updated_at: c.updated_at.into(),
                }
            })
            .collect())
    }
}
