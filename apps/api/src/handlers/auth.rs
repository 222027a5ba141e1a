use crate::config::Config;
use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use actix_web::{get, post, put, web, HttpResponse, Responder};
use application::auth::{
    dtos::{
        ForgotPasswordRequest, LoginRequest, MessageResponse, RegisterRequest,
        ResetPasswordRequest, UpdateProfileRequest,
    },
    use_cases::{
        AuthConfig, GetProfileUseCase, LoginUseCase, RegisterUserUseCase,
        RequestPasswordResetUseCase, ResetPasswordUseCase, ResolveIdentityUseCase,
        UpdateProfileUseCase,
    },
};
use infrastructure::mailer::PasswordResetMailer;
use sea_orm::DatabaseConnection;

fn auth_config(config: &Config) -> AuthConfig {
    AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
        jwt_expiration: config.jwt_expiration,
    }
}

#[post("/register")]
pub async fn register(
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    body: web::Json<RegisterRequest>,
) -> Result<impl Responder, HttpAppError> {
    let response =
        RegisterUserUseCase::execute(&db, &auth_config(&config), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
pub async fn login(
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    body: web::Json<LoginRequest>,
) -> Result<impl Responder, HttpAppError> {
    let response = LoginUseCase::execute(&db, &auth_config(&config), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/forgot-password")]
pub async fn forgot_password(
    db: web::Data<DatabaseConnection>,
    mailer: web::Data<PasswordResetMailer>,
    body: web::Json<ForgotPasswordRequest>,
) -> Result<impl Responder, HttpAppError> {
    let ticket = RequestPasswordResetUseCase::execute(&db, body.into_inner()).await?;

    // Delivery happens off the request path, and the response is the same
    // whether or not the email matched an account.
    if let Some(ticket) = ticket {
        let mailer = mailer.into_inner();
        actix_web::rt::spawn(async move {
            mailer.send_reset_link(&ticket.email, &ticket.token).await;
        });
    }

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "If an account with that email exists, a password reset link has been sent"
            .to_string(),
    }))
}

#[post("/reset-password")]
pub async fn reset_password(
    db: web::Data<DatabaseConnection>,
    body: web::Json<ResetPasswordRequest>,
) -> Result<impl Responder, HttpAppError> {
    let response = ResetPasswordUseCase::execute(&db, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/profile")]
pub async fn get_profile(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    let profile = GetProfileUseCase::execute(&db, identity.id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("/profile")]
pub async fn update_profile(
    user: AuthUser,
    db: web::Data<DatabaseConnection>,
    config: web::Data<Config>,
    body: web::Json<UpdateProfileRequest>,
) -> Result<impl Responder, HttpAppError> {
    let identity = ResolveIdentityUseCase::execute(&db, &user).await?;
    let response = UpdateProfileUseCase::execute(
        &db,
        &auth_config(&config),
        identity.id,
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(response))
}
