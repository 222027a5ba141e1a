use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{get, post, web, HttpResponse, Responder};
use application::auth::use_cases::ResolveIdentityUseCase;
use application::complaints::{
    create_complaint::CreateComplaintUseCase, dtos::CreateComplaintRequest,
    list_own::ListOwnComplaintsUseCase, track_complaint::TrackComplaintUseCase,
};
use application::access;
use sea_orm::DatabaseConnection;

#[post("")]
pub async fn create_complaint(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateComplaintRequest>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    access::authorize(&identity, access::CREATE_COMPLAINT)?;

    let response = CreateComplaintUseCase::execute(&db, identity.id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/my-complaints")]
pub async fn my_complaints(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    access::authorize(&identity, access::VIEW_OWN_COMPLAINTS)?;

    let complaints = ListOwnComplaintsUseCase::execute(&db, identity.id).await?;
    Ok(HttpResponse::Ok().json(complaints))
}

/// Public tracking lookup; no token required.
#[get("/track/{id}")]
pub async fn track_complaint(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i64>,
) -> Result<impl Responder, HttpAppError> {
    let response = TrackComplaintUseCase::execute(&db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
