#[cfg(test)]
mod tests {
    use crate::auth::dtos::*;
    use crate::AppError;
    use validator::Validate;

    #[test]
    fn test_register_validation() {
        let valid_req = RegisterRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(valid_req.validate().is_ok());

        // Name too short
        let invalid_req = RegisterRequest {
            name: "J".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(invalid_req.validate().is_err());

        // Malformed email
        let invalid_req2 = RegisterRequest {
            name: "Jane Doe".to_string(),
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
        };
        assert!(invalid_req2.validate().is_err());

        // Password too short
        let invalid_req3 = RegisterRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(invalid_req3.validate().is_err());
    }

    #[test]
    fn test_login_validation() {
        let valid_req = LoginRequest {
            email: "jane@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(valid_req.validate().is_ok());

        let invalid_req = LoginRequest {
            email: "jane@example.com".to_string(),
            password: "".to_string(),
        };
        assert!(invalid_req.validate().is_err());
    }

    #[test]
    fn test_reset_password_validation() {
        let valid_req = ResetPasswordRequest {
            token: "abc123".to_string(),
            new_password: "secret1".to_string(),
        };
        assert!(valid_req.validate().is_ok());

        let invalid_req = ResetPasswordRequest {
            token: "".to_string(),
            new_password: "secret1".to_string(),
        };
        assert!(invalid_req.validate().is_err());

        let invalid_req2 = ResetPasswordRequest {
            token: "abc123".to_string(),
            new_password: "12345".to_string(),
        };
        assert!(invalid_req2.validate().is_err());
    }

    #[test]
    fn test_update_profile_validation() {
        // All fields optional
        let empty_req = UpdateProfileRequest {
            name: None,
            email: None,
            current_password: None,
            new_password: None,
        };
        assert!(empty_req.validate().is_ok());

        let invalid_req = UpdateProfileRequest {
            name: None,
            email: Some("not-an-email".to_string()),
            current_password: None,
            new_password: None,
        };
        assert!(invalid_req.validate().is_err());
    }

    #[test]
    fn test_app_error_status_codes() {
        let auth_error = AppError::Authentication("test".to_string());
        assert_eq!(auth_error.status_code(), 401);
        assert_eq!(auth_error.error_code(), "AUTHENTICATION_FAILED");

        let forbidden = AppError::Authorization("test".to_string());
        assert_eq!(forbidden.status_code(), 403);
        assert_eq!(forbidden.error_code(), "AUTHORIZATION_FAILED");

        let validation_error = AppError::Validation("test".to_string());
        assert_eq!(validation_error.status_code(), 400);
        assert_eq!(validation_error.error_code(), "VALIDATION_ERROR");

        let conflict = AppError::Conflict("test".to_string());
        assert_eq!(conflict.status_code(), 409);
        assert_eq!(conflict.error_code(), "CONFLICT");

        let not_found = AppError::NotFound("test".to_string());
        assert_eq!(not_found.status_code(), 404);
        assert_eq!(not_found.error_code(), "NOT_FOUND");
    }
}
