use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::config::Config;
use api::handlers::{admin, auth, complaints, health, supervisor, technician};
use api::middleware::auth::AuthMiddleware;
use api::middleware::rate_limit::PerIpRateLimitMiddleware;
use infrastructure::mailer::PasswordResetMailer;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,api=debug,actix_web=info".into());

    let is_json = std::env::var("LOG_FORMAT").unwrap_or_default() == "json";

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }

    let config = Config::from_env()?;
    let config_data = web::Data::new(config.clone());
    tracing::info!("Starting fixdesk API server...");

    let db = infrastructure::database::init_database(&config.database_url).await?;
    let mailer = web::Data::new(PasswordResetMailer::new(config.web_app_url.clone()));

    let server_addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Server listening on {}", server_addr);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        // Global rate limiter: 100 requests per minute per IP
        let per_ip_rate_limit = PerIpRateLimitMiddleware::new(100);

        // Stricter rate limit for credential endpoints: 10 requests per minute per IP
        let auth_rate_limit = PerIpRateLimitMiddleware::new(10);

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(per_ip_rate_limit)
            .wrap(AuthMiddleware)
            .app_data(web::Data::new(db.clone()))
            .app_data(config_data.clone())
            .app_data(mailer.clone())
            // Health (no rate limit)
            .service(health::health_check)
            // Registration, login and password reset with stricter rate limiting
            .service(
                web::scope("/api/auth")
                    .wrap(auth_rate_limit)
                    .service(auth::register)
                    .service(auth::login)
                    .service(auth::forgot_password)
                    .service(auth::reset_password),
            )
            // Profile of the logged-in user
            .service(
                web::scope("/api/users")
                    .service(auth::get_profile)
                    .service(auth::update_profile),
            )
            // Complaint intake and tracking
            .service(
                web::scope("/api/complaints")
                    .service(complaints::create_complaint)
                    .service(complaints::my_complaints)
                    .service(complaints::track_complaint),
            )
            // Supervisor workflow
            .service(
                web::scope("/api/supervisor")
                    .service(supervisor::list_complaints)
                    .service(supervisor::assign_complaint)
                    .service(supervisor::review_complaint)
                    .service(supervisor::list_technicians)
                    .service(supervisor::complaint_report),
            )
            // Technician workflow
            .service(
                web::scope("/api/technician")
                    .service(technician::list_assigned)
                    .service(technician::update_complaint),
            )
            // Account and complaint administration
            .service(
                web::scope("/api/admin")
                    .service(admin::list_users)
                    .service(admin::update_user_role)
                    .service(admin::delete_user)
                    .service(admin::update_complaint_status)
                    .service(admin::set_admin_comment)
                    .service(admin::delete_complaint),
            )
    })
    .bind(&server_addr)?
    .run()
    .await?;

    Ok(())
}
