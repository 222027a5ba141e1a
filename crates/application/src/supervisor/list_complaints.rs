use super::dtos::SupervisorComplaint;
use crate::lookup::users_by_id;
use crate::AppResult;
use fixdesk_core::entities::complaints;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

pub struct ListAllComplaintsUseCase;

impl ListAllComplaintsUseCase {
    pub async fn execute(db: &DatabaseConnection) -> AppResult<Vec<SupervisorComplaint>> {
        let rows = complaints::Entity::find()
            .order_by_desc(complaints::Column::CreatedAt)
            .all(db)
            .await?;

        let referenced = rows.iter().flat_map(|c| {
            [Some(c.user_id), c.assigned_to, c.final_status_set_by]
                .into_iter()
                .flatten()
        });
        let users = users_by_id(db, referenced).await?;

        Ok(rows
            .into_iter()
            .map(|c| {
                let owner = users.get(&c.user_id);
                let technician = c.assigned_to.and_then(|id| users.get(&id));
                let finalizer = c.final_status_set_by.and_then(|id| users.get(&id));
                SupervisorComplaint {
                    id: c.id,
                    reference: c.reference(),
                    user_id: c.user_id,
                    user_name: owner.map(|u| u.name.clone()),
                    user_email: owner.map(|u| u.email.clone()),
                    subject: c.subject,
                    description: c.description,
                    phone: c.phone,
                    product: c.product,
                    department: c.department,
                    status: c.status,
                    admin_comment: c.admin_comment,
                    assigned_to: c.assigned_to,
                    technician_name: technician.map(|u| u.name.clone()),
                    technician_email: technician.map(|u| u.email.clone()),
                    technician_response: c.technician_response,
                    supervisor_review_status: c.supervisor_review_status,
                    final_status_set_by: c.final_status_set_by,
                    finalizer_name: finalizer.map(|u| u.name.clone()),
                    created_at: c.created_at.into(),
                    updated_at: c.updated_at.into(),
                }
            })
            .collect())
    }
}
