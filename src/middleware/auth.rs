use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use pei_auth::{Claims, verify_token};
use pei_core::AppError;
use pei_core::permissions::{Capability, PermissionSet, Role};
use pei_observability::track_permission_check;
use tracing::debug;
use uuid::Uuid;

use crate::state::AppState;

/// Extractor that validates the bearer JWT and exposes its claims.
///
/// Capabilities are resolved from the role string on every call to
/// [`AuthUser::permissions`]; nothing permission-related lives in the token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn role(&self) -> Role {
        self.0.role()
    }

    pub fn permissions(&self) -> PermissionSet {
        self.0.permissions()
    }

    pub fn school_id(&self) -> Option<Uuid> {
        self.0.school_id
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }

    /// Fails with 403 unless the caller's role grants `capability`.
    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        let granted = self.permissions().allows(capability);
        track_permission_check(&self.metric_role(), capability.as_str(), granted);

        if !granted {
            debug!(role = %self.0.role, capability = %capability, "Capability check denied");
            return Err(AppError::forbidden(format!(
                "Access denied. Missing capability: {capability}"
            )));
        }
        Ok(())
    }

    /// Role label for metrics. Unrecognized strings share one label.
    fn metric_role(&self) -> String {
        self.role().to_string()
    }

    /// School restriction for row-level access.
    ///
    /// `None` means unrestricted (the role can view all schools). Otherwise
    /// the caller is pinned to the school in their token, and a caller with
    /// no school gets 403.
    pub fn school_scope(&self) -> Result<Option<Uuid>, AppError> {
        if self.permissions().can_view_all_schools {
            return Ok(None);
        }
        self.school_id()
            .map(Some)
            .ok_or_else(|| AppError::forbidden("Access denied. User is not assigned to a school"))
    }

    /// Effective school filter for a request that may name a school.
    ///
    /// Scoped callers always get their own school, whatever they asked for.
    pub fn scoped_school(&self, requested: Option<Uuid>) -> Result<Option<Uuid>, AppError> {
        Ok(self.school_scope()?.or(requested))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token.trim(), &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Declares an extractor that authenticates the caller and then requires one
/// capability.
macro_rules! require_capability {
    ($name:ident, $capability:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub AuthUser);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = AuthUser::from_request_parts(parts, state).await?;
                auth_user.require($capability)?;
                Ok($name(auth_user))
            }
        }
    };
}

require_capability!(RequireManageUsers, Capability::ManageUsers);
require_capability!(RequireDeleteStudents, Capability::DeleteStudents);
require_capability!(RequireViewAllSchools, Capability::ViewAllSchools);
require_capability!(RequireEditClasses, Capability::EditClasses);
require_capability!(RequireEditStudents, Capability::EditStudents);
require_capability!(RequireViewManagement, Capability::ViewManagement);
require_capability!(RequireViewStudents, Capability::ViewStudents);
require_capability!(RequireViewDisciplines, Capability::ViewDisciplines);
require_capability!(RequireViewReports, Capability::ViewReports);

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str, school_id: Option<Uuid>) -> AuthUser {
        AuthUser(Claims {
            sub: Uuid::new_v4().to_string(),
            email: "user@escola.br".to_string(),
            role: role.to_string(),
            school_id,
            exp: 9999999999,
            iat: 0,
        })
    }

    #[test]
    fn test_require_capability() {
        assert!(user("Administrador", None).require(Capability::ManageUsers).is_ok());

        let err = user("Tutor", None).require(Capability::EditStudents).unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
        assert_eq!(
            err.error.to_string(),
            "Access denied. Missing capability: canEditStudents"
        );
    }

    #[test]
    fn test_unknown_role_is_treated_as_familia() {
        let unknown = user("Coordenador", None);
        assert!(unknown.require(Capability::ViewStudents).is_ok());
        assert!(unknown.require(Capability::ViewReports).is_ok());
        assert!(unknown.require(Capability::ViewDisciplines).is_err());
        assert_eq!(unknown.role(), Role::Unrecognized);
    }

    #[test]
    fn test_school_scope() {
        let school = Uuid::new_v4();
        let other = Uuid::new_v4();

        let admin = user("Administrador", None);
        assert_eq!(admin.school_scope().unwrap(), None);
        assert_eq!(admin.scoped_school(Some(other)).unwrap(), Some(other));

        let professional = user("Profissional", Some(school));
        assert_eq!(professional.school_scope().unwrap(), Some(school));
        assert_eq!(professional.scoped_school(Some(other)).unwrap(), Some(school));
        assert_eq!(professional.scoped_school(None).unwrap(), Some(school));

        let unassigned = user("Tutor", None);
        assert_eq!(unassigned.school_scope().unwrap_err().status.as_u16(), 403);
    }

    #[test]
    fn test_metric_role_collapses_unrecognized() {
        assert_eq!(user("Família", None).metric_role(), "Família");
        assert_eq!(user("Coordenador", None).metric_role(), "unrecognized");
        assert_eq!(user("", None).metric_role(), "unrecognized");
    }

    #[test]
    fn test_user_id_parsing() {
        let mut auth = user("Tutor", None);
        assert!(auth.user_id().is_ok());
        auth.0.sub = "not-a-uuid".to_string();
        assert_eq!(auth.user_id().unwrap_err().status.as_u16(), 401);
    }
}
