use actix_web::{test, web, App};
use api::config::Config;
use api::handlers::{admin, auth, complaints, supervisor, technician};
use api::middleware::auth::AuthMiddleware;
use fixdesk_core::entities::users;
use fixdesk_core::Role;
use infrastructure::database;
use infrastructure::mailer::PasswordResetMailer;
use migration::Migrator;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use uuid::Uuid;

// These tests run against the database named in .env / DATABASE_URL and
// are skipped when none is configured.
async fn setup() -> Option<(DatabaseConnection, Config)> {
    dotenvy::from_filename(".env").ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set, skipping integration test");
        return None;
    }
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
    }

    let config = Config::from_env().expect("Failed to load config");
    let db = database::init_database(&config.database_url)
        .await
        .expect("Failed to connect DB");
    Migrator::up(&db, None).await.expect("Migration failed");
    Some((db, config))
}

async fn promote(db: &DatabaseConnection, user_id: Uuid, role: Role) {
    let user = users::Entity::find_by_id(user_id)
        .one(db)
        .await
        .expect("DB error")
        .expect("User not found");
    let mut active: users::ActiveModel = user.into();
    active.role = Set(role);
    active.update(db).await.expect("Failed to update role");
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@fixdesk.test", prefix, Uuid::new_v4())
}

macro_rules! test_app {
    ($db:expr, $config:expr) => {
        test::init_service(
            App::new()
                .wrap(AuthMiddleware)
                .app_data(web::Data::new($db.clone()))
                .app_data(web::Data::new($config.clone()))
                .app_data(web::Data::new(PasswordResetMailer::new(
                    $config.web_app_url.clone(),
                )))
                .service(
                    web::scope("/api/auth")
                        .service(auth::register)
                        .service(auth::login)
                        .service(auth::forgot_password)
                        .service(auth::reset_password),
                )
                .service(
                    web::scope("/api/users")
                        .service(auth::get_profile)
                        .service(auth::update_profile),
                )
                .service(
                    web::scope("/api/complaints")
                        .service(complaints::create_complaint)
                        .service(complaints::my_complaints)
                        .service(complaints::track_complaint),
                )
                .service(
                    web::scope("/api/supervisor")
                        .service(supervisor::list_complaints)
                        .service(supervisor::assign_complaint)
                        .service(supervisor::review_complaint)
                        .service(supervisor::list_technicians)
                        .service(supervisor::complaint_report),
                )
                .service(
                    web::scope("/api/technician")
                        .service(technician::list_assigned)
                        .service(technician::update_complaint),
                )
                .service(
                    web::scope("/api/admin")
                        .service(admin::list_users)
                        .service(admin::update_user_role)
                        .service(admin::delete_user)
                        .service(admin::update_complaint_status)
                        .service(admin::set_admin_comment)
                        .service(admin::delete_complaint),
                ),
        )
        .await
    };
}

macro_rules! register_user {
    ($app:expr, $name:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "name": $name,
                "email": $email,
                "password": "password123"
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status().as_u16(), 201);
        let body: Value = test::read_body_json(resp).await;
        let token = body["token"].as_str().expect("token").to_string();
        let user_id: Uuid = body["user"]["id"]
            .as_str()
            .expect("user id")
            .parse()
            .expect("uuid");
        (token, user_id)
    }};
}

#[actix_web::test]
async fn test_complaint_lifecycle_roundtrip() {
    let Some((db, config)) = setup().await else {
        return;
    };
    let app = test_app!(db, config);

    let (owner_token, _owner_id) = register_user!(app, "Owner", unique_email("owner"));
    let (tech_token, tech_id) = register_user!(app, "Tech One", unique_email("tech1"));
    let (other_tech_token, other_tech_id) =
        register_user!(app, "Tech Two", unique_email("tech2"));
    let (sup_token, sup_id) = register_user!(app, "Supervisor", unique_email("sup"));

    promote(&db, tech_id, Role::Technician).await;
    promote(&db, other_tech_id, Role::Technician).await;
    promote(&db, sup_id, Role::Supervisor).await;

    // Plain users cannot see the supervisor list. Tokens issued before
    // the promotions above still work because the role is re-read from
    // the database on every request.
    let req = test::TestRequest::get()
        .uri("/api/supervisor/complaints")
        .insert_header(("Authorization", format!("Bearer {}", owner_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);

    // Owner submits a complaint.
    let req = test::TestRequest::post()
        .uri("/api/complaints")
        .insert_header(("Authorization", format!("Bearer {}", owner_token)))
        .set_json(json!({
            "subject": "Broken laptop screen",
            "description": "Screen flickers and goes black",
            "phone": "0812345678",
            "product": "Laptop X200",
            "department": "IT Support"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    let complaint_id = body["complaint"]["id"].as_i64().expect("complaint id");
    assert_eq!(body["complaint"]["status"], "Pending");
    assert_eq!(
        body["complaint"]["reference"],
        format!("REQ{:06}", complaint_id)
    );

    // Assigning to a non-technician is rejected.
    let req = test::TestRequest::put()
        .uri(&format!("/api/supervisor/complaints/{}/assign", complaint_id))
        .insert_header(("Authorization", format!("Bearer {}", sup_token)))
        .set_json(json!({ "technician_id": sup_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    // Assign to a real technician.
    let req = test::TestRequest::put()
        .uri(&format!("/api/supervisor/complaints/{}/assign", complaint_id))
        .insert_header(("Authorization", format!("Bearer {}", sup_token)))
        .set_json(json!({ "technician_id": tech_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    // A technician who is not assigned cannot update it.
    let req = test::TestRequest::put()
        .uri(&format!("/api/technician/complaints/{}", complaint_id))
        .insert_header(("Authorization", format!("Bearer {}", other_tech_token)))
        .set_json(json!({ "status": "In Progress" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);

    // The assigned technician can, but only to technician-settable states.
    let req = test::TestRequest::put()
        .uri(&format!("/api/technician/complaints/{}", complaint_id))
        .insert_header(("Authorization", format!("Bearer {}", tech_token)))
        .set_json(json!({ "status": "Closed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let req = test::TestRequest::put()
        .uri(&format!("/api/technician/complaints/{}", complaint_id))
        .insert_header(("Authorization", format!("Bearer {}", tech_token)))
        .set_json(json!({
            "status": "Resolved",
            "technician_response": "Replaced the display cable"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    // Review with an unknown final status fails fast and leaves the row
    // untouched.
    let req = test::TestRequest::post()
        .uri(&format!("/api/supervisor/complaints/{}/review", complaint_id))
        .insert_header(("Authorization", format!("Bearer {}", sup_token)))
        .set_json(json!({
            "supervisor_review_status": "Approved",
            "final_status": "Garbage"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let untouched = fixdesk_core::entities::complaints::Entity::find_by_id(complaint_id)
        .one(&db)
        .await
        .expect("DB error")
        .expect("Complaint not found");
    assert_eq!(untouched.status, fixdesk_core::ComplaintStatus::Resolved);
    assert!(untouched.final_status_set_by.is_none());

    // A valid review finalizes and records who finalized it.
    let req = test::TestRequest::post()
        .uri(&format!("/api/supervisor/complaints/{}/review", complaint_id))
        .insert_header(("Authorization", format!("Bearer {}", sup_token)))
        .set_json(json!({
            "supervisor_review_status": "Approved",
            "final_status": "Closed",
            "supervisor_comment": "Work confirmed with the user"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let finalized = fixdesk_core::entities::complaints::Entity::find_by_id(complaint_id)
        .one(&db)
        .await
        .expect("DB error")
        .expect("Complaint not found");
    assert_eq!(finalized.status, fixdesk_core::ComplaintStatus::Closed);
    assert_eq!(finalized.final_status_set_by, Some(sup_id));
    assert_eq!(
        finalized.admin_comment.as_deref(),
        Some("Work confirmed with the user")
    );

    // Finalizing again with the identical payload is a state no-op but
    // still bumps the update timestamp.
    let req = test::TestRequest::post()
        .uri(&format!("/api/supervisor/complaints/{}/review", complaint_id))
        .insert_header(("Authorization", format!("Bearer {}", sup_token)))
        .set_json(json!({
            "supervisor_review_status": "Approved",
            "final_status": "Closed",
            "supervisor_comment": "Work confirmed with the user"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let refinalized = fixdesk_core::entities::complaints::Entity::find_by_id(complaint_id)
        .one(&db)
        .await
        .expect("DB error")
        .expect("Complaint not found");
    assert_eq!(refinalized.status, finalized.status);
    assert_eq!(
        refinalized.supervisor_review_status,
        finalized.supervisor_review_status
    );
    assert_eq!(refinalized.admin_comment, finalized.admin_comment);
    assert_eq!(refinalized.final_status_set_by, finalized.final_status_set_by);
    assert!(refinalized.updated_at > finalized.updated_at);

    // A review without the comment field preserves the stored comment.
    let req = test::TestRequest::post()
        .uri(&format!("/api/supervisor/complaints/{}/review", complaint_id))
        .insert_header(("Authorization", format!("Bearer {}", sup_token)))
        .set_json(json!({
            "supervisor_review_status": "Approved",
            "final_status": "Closed"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let kept = fixdesk_core::entities::complaints::Entity::find_by_id(complaint_id)
        .one(&db)
        .await
        .expect("DB error")
        .expect("Complaint not found");
    assert_eq!(
        kept.admin_comment.as_deref(),
        Some("Work confirmed with the user")
    );

    // An empty comment is a deliberate clear.
    let req = test::TestRequest::post()
        .uri(&format!("/api/supervisor/complaints/{}/review", complaint_id))
        .insert_header(("Authorization", format!("Bearer {}", sup_token)))
        .set_json(json!({
            "supervisor_review_status": "Approved",
            "final_status": "Closed",
            "supervisor_comment": ""
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let cleared = fixdesk_core::entities::complaints::Entity::find_by_id(complaint_id)
        .one(&db)
        .await
        .expect("DB error")
        .expect("Complaint not found");
    assert_eq!(cleared.admin_comment, None);

    // Anyone can track by id without a token.
    let req = test::TestRequest::get()
        .uri(&format!("/api/complaints/track/{}", complaint_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["complaint"]["status"], "Closed");
    assert_eq!(body["complaint"]["technician_name"], "Tech One");
}

#[actix_web::test]
async fn test_admin_manages_users_and_complaints() {
    let Some((db, config)) = setup().await else {
        return;
    };
    let app = test_app!(db, config);

    let (admin_token, admin_id) = register_user!(app, "Admin", unique_email("admin"));
    let (user_token, user_id) = register_user!(app, "Member", unique_email("member"));

    // A fresh registration cannot touch the admin surface.
    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);

    promote(&db, admin_id, Role::Admin).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    // Role change through the API.
    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/users/{}/role", user_id))
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .set_json(json!({ "role": "technician" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["role"], "technician");

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/users/{}/role", user_id))
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .set_json(json!({ "role": "overlord" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    // Set the member back to a plain user so they can file a complaint.
    promote(&db, user_id, Role::User).await;

    let req = test::TestRequest::post()
        .uri("/api/complaints")
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .set_json(json!({
            "subject": "Printer out of toner",
            "description": "Third floor printer needs a cartridge",
            "phone": "0899999999",
            "product": "Printer P55",
            "department": "Facilities"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    let complaint_id = body["complaint"]["id"].as_i64().expect("complaint id");

    // Deleting a technician who holds an open assignment sends the
    // complaint back to the pool instead of leaving it Assigned with no
    // assignee.
    let (_doomed_token, doomed_tech_id) =
        register_user!(app, "Short Timer", unique_email("doomed-tech"));
    promote(&db, doomed_tech_id, Role::Technician).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/supervisor/complaints/{}/assign", complaint_id))
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .set_json(json!({ "technician_id": doomed_tech_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/users/{}", doomed_tech_id))
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let released = fixdesk_core::entities::complaints::Entity::find_by_id(complaint_id)
        .one(&db)
        .await
        .expect("DB error")
        .expect("Complaint not found");
    assert_eq!(released.status, fixdesk_core::ComplaintStatus::Pending);
    assert_eq!(released.assigned_to, None);
    assert_eq!(
        released.supervisor_review_status,
        fixdesk_core::ReviewStatus::NotApplicable
    );

    // Direct status override and comment.
    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/complaints/{}/status", complaint_id))
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .set_json(json!({ "status": "Rejected" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/complaints/{}/comment", complaint_id))
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .set_json(json!({ "comment": "Duplicate of an earlier request" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    // Deleting the account removes their complaints as well.
    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/users/{}", user_id))
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let gone = fixdesk_core::entities::complaints::Entity::find_by_id(complaint_id)
        .one(&db)
        .await
        .expect("DB error");
    assert!(gone.is_none());
}

#[actix_web::test]
async fn test_auth_profile_and_password_reset() {
    let Some((db, config)) = setup().await else {
        return;
    };
    let app = test_app!(db, config);

    let email = unique_email("profile");
    let (token, user_id) = register_user!(app, "Profile User", &email);

    // Duplicate registration conflicts.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Profile User",
            "email": email,
            "password": "password123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 409);

    // Wrong password and unknown email answer identically.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    // Profile round-trip.
    let req = test::TestRequest::get()
        .uri("/api/users/profile")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], email);
    assert_eq!(body["role"], "user");

    // No token at all is rejected on protected routes.
    let req = test::TestRequest::get().uri("/api/users/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    // Forgot-password answers 200 for known and unknown emails alike.
    let req = test::TestRequest::post()
        .uri("/api/auth/forgot-password")
        .set_json(json!({ "email": email }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let req = test::TestRequest::post()
        .uri("/api/auth/forgot-password")
        .set_json(json!({ "email": unique_email("nobody") }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    // The stored token resets the password; a bogus token does not.
    let user = users::Entity::find_by_id(user_id)
        .one(&db)
        .await
        .expect("DB error")
        .expect("User not found");
    let reset_token = user.reset_password_token.expect("reset token stored");

    let req = test::TestRequest::post()
        .uri("/api/auth/reset-password")
        .set_json(json!({ "token": "not-a-real-token", "new_password": "newpassword1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let req = test::TestRequest::post()
        .uri("/api/auth/reset-password")
        .set_json(json!({ "token": reset_token, "new_password": "newpassword1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": "newpassword1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
}
