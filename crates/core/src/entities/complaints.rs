use crate::enums::{ComplaintStatus, ReviewStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "complaints")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Creator; immutable after submission.
    pub user_id: Uuid,
    pub subject: String,
    pub description: String,
    pub phone: String,
    pub product: String,
    pub department: String,
    pub status: ComplaintStatus,
    /// Must reference a user whose role is exactly `technician`.
    pub assigned_to: Option<Uuid>,
    pub technician_response: Option<String>,
    pub supervisor_review_status: ReviewStatus,
    pub admin_comment: Option<String>,
    /// Supervisor or admin who last finalized this complaint.
    pub final_status_set_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::UserId",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AssignedTo",
        to = "super::users::Column::UserId"
    )]
    Technician,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::FinalStatusSetBy",
        to = "super::users::Column::UserId"
    )]
    Finalizer,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Human-facing tracking reference, e.g. `REQ000007`.
    pub fn reference(&self) -> String {
        format!("REQ{:06}", self.id)
    }
}
