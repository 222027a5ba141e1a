use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{get, post, put, web, HttpResponse, Responder};
use application::access;
use application::auth::use_cases::ResolveIdentityUseCase;
use application::supervisor::{
    assign_complaint::AssignComplaintUseCase,
    dtos::{AssignComplaintRequest, ReviewComplaintRequest},
    list_complaints::ListAllComplaintsUseCase,
    list_technicians::ListTechniciansUseCase,
    report::ComplaintReportUseCase,
    review_complaint::ReviewComplaintUseCase,
};
use sea_orm::DatabaseConnection;

#[get("/complaints")]
pub async fn list_complaints(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    access::authorize(&identity, access::LIST_ALL_COMPLAINTS)?;

    let complaints = ListAllComplaintsUseCase::execute(&db).await?;
    Ok(HttpResponse::Ok().json(complaints))
}

#[put("/complaints/{id}/assign")]
pub async fn assign_complaint(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i64>,
    body: web::Json<AssignComplaintRequest>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    access::authorize(&identity, access::ASSIGN_COMPLAINT)?;

    let response =
        AssignComplaintUseCase::execute(&db, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/complaints/{id}/review")]
pub async fn review_complaint(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i64>,
    body: web::Json<ReviewComplaintRequest>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    access::authorize(&identity, access::REVIEW_COMPLAINT)?;

    let response =
        ReviewComplaintUseCase::execute(&db, &identity, path.into_inner(), body.into_inner())
            .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/technicians")]
pub async fn list_technicians(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    access::authorize(&identity, access::LIST_TECHNICIANS)?;

    let technicians = ListTechniciansUseCase::execute(&db).await?;
    Ok(HttpResponse::Ok().json(technicians))
}

#[get("/report")]
pub async fn complaint_report(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    access::authorize(&identity, access::VIEW_REPORT)?;

    let rows = ComplaintReportUseCase::execute(&db).await?;
    Ok(HttpResponse::Ok().json(rows))
}
