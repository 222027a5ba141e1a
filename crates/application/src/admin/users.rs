//! Admin account management: the only place roles change after
//! registration. A role update takes effect on the target's very next
//! request because identities are re-resolved from the store per call.

use crate::{AppError, AppResult};
use chrono::{DateTime, Utc};
use fixdesk_core::{entities::complaints, entities::users, ComplaintStatus, ReviewStatus, Role};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for UserSummary {
    fn from(u: users::Model) -> Self {
        Self {
            id: u.user_id,
            name: u.name,
            email: u.email,
            role: u.role,
            created_at: u.created_at.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateUserRoleRequest {
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub message: String,
    pub id: Uuid,
}

pub struct ListUsersUseCase;

impl ListUsersUseCase {
    pub async fn execute(db: &DatabaseConnection) -> AppResult<Vec<UserSummary>> {
        let rows = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(UserSummary::from).collect())
    }
}

pub struct UpdateUserRoleUseCase;

impl UpdateUserRoleUseCase {
    #[instrument(skip(db, req), fields(user_id = %user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        user_id: Uuid,
        req: UpdateUserRoleRequest,
    ) -> AppResult<UserSummary> {
        let role = Role::parse(&req.role)
            .ok_or_else(|| AppError::Validation("Invalid role provided".to_string()))?;

        let user = users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let mut active: users::ActiveModel = user.into();
        active.role = Set(role);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(db).await?;

        info!(role = role.as_str(), "User role updated");
        Ok(updated.into())
    }
}

pub struct DeleteUserUseCase;

impl DeleteUserUseCase {
    #[instrument(skip(db), fields(user_id = %user_id))]
    pub async fn execute(db: &DatabaseConnection, user_id: Uuid) -> AppResult<DeleteUserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        // Open assignments held by the deleted user go back to the pool.
        // The technician FK only nulls `assigned_to` on delete, which
        // would leave rows at Assigned/In Progress with no assignee.
        complaints::Entity::update_many()
            .col_expr(complaints::Column::Status, Expr::value(ComplaintStatus::Pending))
            .col_expr(complaints::Column::AssignedTo, Expr::value(Option::<Uuid>::None))
            .col_expr(
                complaints::Column::SupervisorReviewStatus,
                Expr::value(ReviewStatus::NotApplicable),
            )
            .col_expr(complaints::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(complaints::Column::AssignedTo.eq(user_id))
            .filter(complaints::Column::Status.is_in([
                ComplaintStatus::Assigned,
                ComplaintStatus::InProgress,
            ]))
            .exec(db)
            .await?;

        // Owned complaints go with the account. The FK also cascades;
        // deleting explicitly keeps the behavior visible here.
        complaints::Entity::delete_many()
            .filter(complaints::Column::UserId.eq(user_id))
            .exec(db)
            .await?;

        user.delete(db).await?;

        info!("User deleted");
        Ok(DeleteUserResponse {
            message: "User deleted successfully".to_string(),
            id: user_id,
        })
    }
}
