use super::dtos::TechnicianInfo;
use crate::AppResult;
use fixdesk_core::{entities::users, Role};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

pub struct ListTechniciansUseCase;

impl ListTechniciansUseCase {
    pub async fn execute(db: &DatabaseConnection) -> AppResult<Vec<TechnicianInfo>> {
        let rows = users::Entity::find()
            .filter(users::Column::Role.eq(Role::Technician))
            .order_by_asc(users::Column::Name)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|u| TechnicianInfo {
                id: u.user_id,
                name: u.name,
                email: u.email,
            })
            .collect())
    }
}
