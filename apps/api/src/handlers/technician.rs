use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{get, put, web, HttpResponse, Responder};
use application::access;
use application::auth::use_cases::ResolveIdentityUseCase;
use application::technician::{
    dtos::UpdateAssignedRequest, list_assigned::ListAssignedComplaintsUseCase,
    update_complaint::UpdateAssignedComplaintUseCase,
};
use sea_orm::DatabaseConnection;

#[get("/complaints")]
pub async fn list_assigned(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    access::authorize(&identity, access::VIEW_ASSIGNED_COMPLAINTS)?;

    let complaints = ListAssignedComplaintsUseCase::execute(&db, identity.id).await?;
    Ok(HttpResponse::Ok().json(complaints))
}

#[put("/complaints/{id}")]
pub async fn update_complaint(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i64>,
    body: web::Json<UpdateAssignedRequest>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    access::authorize(&identity, access::UPDATE_ASSIGNED_COMPLAINT)?;

    let response = UpdateAssignedComplaintUseCase::execute(
        &db,
        identity.id,
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(response))
}
