use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{delete, get, put, web, HttpResponse, Responder};
use application::access;
use application::admin::{
    complaints::{
        DeleteComplaintUseCase, SetAdminCommentUseCase, SetCommentRequest, UpdateComplaintStatusUseCase,
        UpdateStatusRequest,
    },
    users::{DeleteUserUseCase, ListUsersUseCase, UpdateUserRoleRequest, UpdateUserRoleUseCase},
};
use application::auth::use_cases::ResolveIdentityUseCase;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

#[get("/users")]
pub async fn list_users(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    access::authorize(&identity, access::MANAGE_USERS)?;

    let users = ListUsersUseCase::execute(&db).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[put("/users/{id}/role")]
pub async fn update_user_role(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUserRoleRequest>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    access::authorize(&identity, access::MANAGE_USERS)?;

    let updated = UpdateUserRoleUseCase::execute(&db, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/users/{id}")]
pub async fn delete_user(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    access::authorize(&identity, access::MANAGE_USERS)?;

    let response = DeleteUserUseCase::execute(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/complaints/{id}/status")]
pub async fn update_complaint_status(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i64>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    access::authorize(&identity, access::MANAGE_COMPLAINTS)?;

    let response =
        UpdateComplaintStatusUseCase::execute(&db, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/complaints/{id}/comment")]
pub async fn set_admin_comment(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i64>,
    body: web::Json<SetCommentRequest>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    access::authorize(&identity, access::MANAGE_COMPLAINTS)?;

    let response =
        SetAdminCommentUseCase::execute(&db, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/complaints/{id}")]
pub async fn delete_complaint(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i64>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    access::authorize(&identity, access::MANAGE_COMPLAINTS)?;

    let response = DeleteComplaintUseCase::execute(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
