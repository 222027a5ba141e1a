use crate::access::Identity;
use crate::auth::dtos::*;
use crate::{AppError, AppResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use fixdesk_core::{entities::users, Role};
use jsonwebtoken::{encode, EncodingKey, Header};
use rand::RngCore;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

#[cfg(test)]
#[path = "use_cases_test.rs"]
mod tests;

// ============ Config ============

pub struct AuthConfig {
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    pub jwt_expiration: i64,
}

// ============ Constants ============

const RESET_TOKEN_TTL_MINUTES: i64 = 60;

// ============ Helpers ============

pub fn issue_token(config: &AuthConfig, user: &users::Model) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.user_id.to_string(),
        name: user.name.clone(),
        role: user.role.as_str().to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(config.jwt_expiration)).timestamp(),
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    let token = encode(&Header::default(), &claims, &encoding_key)?;
    Ok(token)
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

// ============ Resolve Identity Use Case ============

/// Resolves a verified token to a live identity. The user row is
/// re-fetched on every call: the role claim inside the token may be stale
/// (an admin can demote or promote a user mid-session), and a deleted user
/// must stop authenticating immediately.
pub struct ResolveIdentityUseCase;

impl ResolveIdentityUseCase {
    pub async fn execute(db: &DatabaseConnection, claims: &Claims) -> AppResult<Identity> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Authentication("Invalid subject in token".to_string()))?;

        let user = users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                AppError::Authentication(
                    "User for this token no longer exists".to_string(),
                )
            })?;

        Ok(Identity {
            id: user.user_id,
            name: user.name,
            email: user.email,
            role: user.role,
        })
    }
}

// ============ Register Use Case ============

pub struct RegisterUserUseCase;

impl RegisterUserUseCase {
    #[instrument(skip(db, config, req), fields(email = %req.email))]
    pub async fn execute(
        db: &DatabaseConnection,
        config: &AuthConfig,
        req: RegisterRequest,
    ) -> AppResult<AuthResponse> {
        req.validate()?;

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(req.email.trim()))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let new_user = users::ActiveModel {
            user_id: Set(Uuid::new_v4()),
            name: Set(req.name.trim().to_string()),
            email: Set(req.email.trim().to_string()),
            password_hash: Set(hash_password(&req.password)?),
            // Self-registration always produces a plain user; other roles
            // are granted by an admin afterwards.
            role: Set(Role::User),
            reset_password_token: Set(None),
            reset_password_expires: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let user = new_user.insert(db).await?;

        info!(user_id = %user.user_id, "User registered");

        let token = issue_token(config, &user)?;
        Ok(AuthResponse {
            message: "User registered successfully!".to_string(),
            token,
            user: user.into(),
        })
    }
}

// ============ Login Use Case ============

pub struct LoginUseCase;

impl LoginUseCase {
    #[instrument(skip(db, config, req), fields(email = %req.email))]
    pub async fn execute(
        db: &DatabaseConnection,
        config: &AuthConfig,
        req: LoginRequest,
    ) -> AppResult<AuthResponse> {
        req.validate()?;

        let user = users::Entity::find()
            .filter(users::Column::Email.eq(req.email.trim()))
            .one(db)
            .await?;

        // Same error for unknown email and wrong password.
        let user = match user {
            Some(u) if verify_password(&req.password, &u.password_hash)? => u,
            _ => {
                warn!("Failed login attempt");
                return Err(AppError::Authentication("Invalid credentials".to_string()));
            }
        };

        let token = issue_token(config, &user)?;
        Ok(AuthResponse {
            message: "Logged in successfully!".to_string(),
            token,
            user: user.into(),
        })
    }
}

// ============ Profile Use Cases ============

pub struct GetProfileUseCase;

impl GetProfileUseCase {
    pub async fn execute(db: &DatabaseConnection, user_id: Uuid) -> AppResult<ProfileResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        Ok(ProfileResponse {
            id: user.user_id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at.into(),
            updated_at: user.updated_at.into(),
        })
    }
}

pub struct UpdateProfileUseCase;

impl UpdateProfileUseCase {
    #[instrument(skip(db, config, req), fields(user_id = %user_id))]
    pub async fn execute(
        db: &DatabaseConnection,
        config: &AuthConfig,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> AppResult<UpdateProfileResponse> {
        req.validate()?;

        let user = users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let mut credentials_changed = false;
        let mut active_user: users::ActiveModel = user.clone().into();

        if let Some(ref name) = req.name {
            let name = name.trim();
            if !name.is_empty() && name != user.name {
                active_user.name = Set(name.to_string());
            }
        }

        if let Some(ref email) = req.email {
            let email = email.trim();
            if !email.is_empty() && email != user.email {
                let taken = users::Entity::find()
                    .filter(users::Column::Email.eq(email))
                    .filter(users::Column::UserId.ne(user_id))
                    .one(db)
                    .await?;
                if taken.is_some() {
                    return Err(AppError::Conflict(
                        "This email is already registered by another user".to_string(),
                    ));
                }
                active_user.email = Set(email.to_string());
                credentials_changed = true;
            }
        }

        if let Some(ref new_password) = req.new_password {
            let current = req.current_password.as_deref().ok_or_else(|| {
                AppError::Validation(
                    "Current password is required to change password".to_string(),
                )
            })?;
            if !verify_password(current, &user.password_hash)? {
                return Err(AppError::Authentication(
                    "Incorrect current password".to_string(),
                ));
            }
            active_user.password_hash = Set(hash_password(new_password)?);
            credentials_changed = true;
        }

        active_user.updated_at = Set(Utc::now().into());
        let updated = active_user.update(db).await?;

        let token = if credentials_changed {
            Some(issue_token(config, &updated)?)
        } else {
            None
        };

        Ok(UpdateProfileResponse {
            message: "Profile updated successfully!".to_string(),
            user: updated.into(),
            token,
        })
    }
}

// ============ Password Reset Use Cases ============

pub struct RequestPasswordResetUseCase;

impl RequestPasswordResetUseCase {
    /// Returns a delivery ticket when the email matches an account, `None`
    /// otherwise. The caller must answer identically in both cases so the
    /// endpoint cannot be used to probe which emails are registered.
    #[instrument(skip(db, req))]
    pub async fn execute(
        db: &DatabaseConnection,
        req: ForgotPasswordRequest,
    ) -> AppResult<Option<PasswordResetTicket>> {
        req.validate()?;

        let user = users::Entity::find()
            .filter(users::Column::Email.eq(req.email.trim()))
            .one(db)
            .await?;

        let Some(user) = user else {
            info!("Password reset requested for unknown email");
            return Ok(None);
        };

        let mut token_bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut token_bytes);
        let token: String = token_bytes.iter().map(|b| format!("{:02x}", b)).collect();

        let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);

        let email = user.email.clone();
        let mut active_user: users::ActiveModel = user.into();
        active_user.reset_password_token = Set(Some(token.clone()));
        active_user.reset_password_expires = Set(Some(expires_at.into()));
        active_user.updated_at = Set(Utc::now().into());
        active_user.update(db).await?;

        Ok(Some(PasswordResetTicket {
            email,
            token,
            expires_at,
        }))
    }
}

pub struct ResetPasswordUseCase;

impl ResetPasswordUseCase {
    #[instrument(skip(db, req))]
    pub async fn execute(
        db: &DatabaseConnection,
        req: ResetPasswordRequest,
    ) -> AppResult<MessageResponse> {
        req.validate()?;

        let user = users::Entity::find()
            .filter(users::Column::ResetPasswordToken.eq(req.token.as_str()))
            .filter(users::Column::ResetPasswordExpires.gt(Utc::now()))
            .one(db)
            .await?
            .ok_or_else(|| {
                AppError::Validation(
                    "Password reset token is invalid or has expired".to_string(),
                )
            })?;

        let mut active_user: users::ActiveModel = user.into();
        active_user.password_hash = Set(hash_password(&req.new_password)?);
        active_user.reset_password_token = Set(None);
        active_user.reset_password_expires = Set(None);
        active_user.updated_at = Set(Utc::now().into());
        active_user.update(db).await?;

        Ok(MessageResponse {
            message: "Password has been reset successfully".to_string(),
        })
    }
}
