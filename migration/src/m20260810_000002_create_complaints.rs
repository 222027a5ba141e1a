use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Complaints::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Complaints::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Complaints::UserId).uuid().not_null())
                    .col(ColumnDef::new(Complaints::Subject).string_len(200).not_null())
                    .col(ColumnDef::new(Complaints::Description).text().not_null())
                    .col(ColumnDef::new(Complaints::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(Complaints::Product).string_len(100).not_null())
                    .col(ColumnDef::new(Complaints::Department).string_len(100).not_null())
                    .col(ColumnDef::new(Complaints::Status).string_len(20).not_null().default("Pending"))
                    .col(ColumnDef::new(Complaints::AssignedTo).uuid())
                    .col(ColumnDef::new(Complaints::TechnicianResponse).text())
                    .col(ColumnDef::new(Complaints::SupervisorReviewStatus).string_len(20).not_null().default("N/A"))
                    .col(ColumnDef::new(Complaints::AdminComment).text())
                    .col(ColumnDef::new(Complaints::FinalStatusSetBy).uuid())
                    .col(ColumnDef::new(Complaints::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .col(ColumnDef::new(Complaints::UpdatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaints_owner")
                            .from(Complaints::Table, Complaints::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaints_technician")
                            .from(Complaints::Table, Complaints::AssignedTo)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaints_finalizer")
                            .from(Complaints::Table, Complaints::FinalStatusSetBy)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_complaints_user_id")
                    .table(Complaints::Table)
                    .col(Complaints::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_complaints_assigned_to")
                    .table(Complaints::Table)
                    .col(Complaints::AssignedTo)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Complaints::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Complaints {
    Table,
    Id,
    UserId,
    Subject,
    Description,
    Phone,
    Product,
    Department,
    Status,
    AssignedTo,
    TechnicianResponse,
    SupervisorReviewStatus,
    AdminComment,
    FinalStatusSetBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
}
