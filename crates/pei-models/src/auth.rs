use pei_core::PermissionSet;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::User;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
    pub permissions: PermissionSet,
}

/// Capability set resolved for the caller's role.
///
/// `recognized` is false when the role string fell back to the Família set.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsResponse {
    pub role: String,
    pub recognized: bool,
    pub permissions: PermissionSet,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: User,
    pub permissions: PermissionSet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pei_core::get_permissions;

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequest {
            email: "admin@escola.br".to_string(),
            password: "secret".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "not-an-email".to_string(),
            password: String::new(),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_permissions_response_shape() {
        let response = PermissionsResponse {
            role: "Tutor".to_string(),
            recognized: true,
            permissions: get_permissions("Tutor"),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["role"], "Tutor");
        assert_eq!(json["recognized"], true);
        assert_eq!(json["permissions"]["canViewStudents"], true);
        assert_eq!(json["permissions"]["canManageUsers"], false);
    }
}
