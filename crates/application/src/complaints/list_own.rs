use super::dtos::ComplaintDetail;
use crate::lookup::users_by_id;
use crate::AppResult;
use fixdesk_core::entities::complaints;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

pub struct ListOwnComplaintsUseCase;

impl ListOwnComplaintsUseCase {
    pub async fn execute(
        db: &DatabaseConnection,
        owner_id: Uuid,
    ) -> AppResult<Vec<ComplaintDetail>> {
        let rows = complaints::Entity::find()
            .filter(complaints::Column::UserId.eq(owner_id))
            .order_by_desc(complaints::Column::CreatedAt)
            .all(db)
            .await?;

        let technicians = users_by_id(db, rows.iter().filter_map(|c| c.assigned_to)).await?;

        Ok(rows
            .into_iter()
            .map(|c| {
                let technician_name = c
                    .assigned_to
                    .and_then(|id| technicians.get(&id))
                    .map(|u| u.name.clone());
                ComplaintDetail::from_model(c, technician_name)
            })
            .collect())
    }
}
