//! Role-based authorization gate.
//!
//! Every protected operation names its allow-list here and calls
//! [`authorize`] with a freshly resolved [`Identity`]. Role comparison is
//! exact membership, not a hierarchy: a supervisor is not implicitly
//! allowed on technician-only operations.

use crate::{AppError, AppResult};
use fixdesk_core::Role;
use uuid::Uuid;

/// A caller identity resolved from the store for the current request.
/// Never constructed from client-supplied body fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Identity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

// Operation allow-lists. One constant per operation so the whole
// authorization table reads in one place.
pub const CREATE_COMPLAINT: &[Role] = &[Role::User];
pub const VIEW_OWN_COMPLAINTS: &[Role] = &[Role::User];
pub const LIST_ALL_COMPLAINTS: &[Role] = &[Role::Admin, Role::Supervisor];
pub const ASSIGN_COMPLAINT: &[Role] = &[Role::Admin, Role::Supervisor];
pub const REVIEW_COMPLAINT: &[Role] = &[Role::Admin, Role::Supervisor];
pub const LIST_TECHNICIANS: &[Role] = &[Role::Admin, Role::Supervisor];
pub const VIEW_REPORT: &[Role] = &[Role::Admin, Role::Supervisor];
pub const VIEW_ASSIGNED_COMPLAINTS: &[Role] = &[Role::Technician];
pub const UPDATE_ASSIGNED_COMPLAINT: &[Role] = &[Role::Technician];
pub const MANAGE_USERS: &[Role] = &[Role::Admin];
pub const MANAGE_COMPLAINTS: &[Role] = &[Role::Admin];

/// Fails with `Authorization` unless the identity's role is in the
/// allow-list.
pub fn authorize(identity: &Identity, allowed: &[Role]) -> AppResult<()> {
    if allowed.contains(&identity.role) {
        Ok(())
    } else {
        Err(AppError::Authorization(format!(
            "Role '{}' is not authorized for this operation",
            identity.role.as_str()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_allow_list_membership() {
        assert!(authorize(&identity(Role::User), CREATE_COMPLAINT).is_ok());
        assert!(authorize(&identity(Role::Admin), ASSIGN_COMPLAINT).is_ok());
        assert!(authorize(&identity(Role::Supervisor), ASSIGN_COMPLAINT).is_ok());
        assert!(authorize(&identity(Role::Technician), UPDATE_ASSIGNED_COMPLAINT).is_ok());
        assert!(authorize(&identity(Role::Admin), MANAGE_USERS).is_ok());
    }

    #[test]
    fn test_no_role_hierarchy() {
        // Supervisors and admins are not implicitly technicians.
        assert!(authorize(&identity(Role::Supervisor), UPDATE_ASSIGNED_COMPLAINT).is_err());
        assert!(authorize(&identity(Role::Admin), VIEW_ASSIGNED_COMPLAINTS).is_err());
        // Admins are not implicitly users either.
        assert!(authorize(&identity(Role::Admin), CREATE_COMPLAINT).is_err());
        // Supervisors cannot manage accounts.
        assert!(authorize(&identity(Role::Supervisor), MANAGE_USERS).is_err());
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let err = authorize(&identity(Role::User), LIST_ALL_COMPLAINTS).unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "AUTHORIZATION_FAILED");
    }
}
