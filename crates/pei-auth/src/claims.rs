//! JWT claim structures for access tokens.

use pei_core::permissions::{PermissionSet, Role, get_permissions};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Claims embedded in access tokens.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    /// Role string exactly as stored for the user
    pub role: String,
    /// School scope, absent for users not bound to a school
    pub school_id: Option<Uuid>,
    /// Expiration timestamp (Unix seconds)
    pub exp: usize,
    /// Issued-at timestamp (Unix seconds)
    pub iat: usize,
}

impl Claims {
    pub fn role(&self) -> Role {
        Role::parse(&self.role)
    }

    /// Resolves the capability set for the token's role.
    pub fn permissions(&self) -> PermissionSet {
        get_permissions(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: &str) -> Claims {
        Claims {
            sub: Uuid::nil().to_string(),
            email: "test@example.com".to_string(),
            role: role.to_string(),
            school_id: None,
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_claims_serialize() {
        let json = serde_json::to_string(&claims("Tutor")).unwrap();
        assert!(json.contains(r#""role":"Tutor""#));
        assert!(json.contains(r#""school_id":null"#));
    }

    #[test]
    fn test_claims_resolve_permissions() {
        assert_eq!(claims("Profissional").role(), Role::Profissional);
        assert!(claims("Administrador").permissions().can_manage_users);
        assert_eq!(
            claims("Visitante").permissions(),
            claims("Família").permissions()
        );
    }
}
