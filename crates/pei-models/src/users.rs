//! Application user models and DTOs (`usuarios`).
//!
//! The `perfil` column holds the role string exactly as the permission
//! resolver expects it (`Administrador`, `Profissional`, `Tutor`, `Família`).

use chrono::{DateTime, Utc};
use pei_core::permissions::Role;
use pei_core::serde::{deserialize_optional_string, deserialize_optional_uuid};
use pei_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Row of the `usuarios` table, including the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
    pub perfil: String,
    pub escola_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub const COLUMNS: &'static str =
        "id, nome, email, senha_hash, perfil, escola_id, created_at, updated_at";
}

/// API view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub school_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.nome,
            email: row.email,
            role: row.perfil,
            school_id: row.escola_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn recognized_role(role: &str) -> Result<(), ValidationError> {
    if Role::parse(role).is_recognized() {
        Ok(())
    } else {
        let mut err = ValidationError::new("unknown_role");
        err.message =
            Some("Role must be one of Administrador, Profissional, Tutor, Família".into());
        Err(err)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(custom(function = "recognized_role"))]
    pub role: String,
    pub school_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub school_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(role: &str) -> CreateUserDto {
        CreateUserDto {
            name: "Beatriz".to_string(),
            email: "beatriz@escola.br".to_string(),
            password: "senha-segura".to_string(),
            role: role.to_string(),
            school_id: None,
        }
    }

    #[test]
    fn test_user_hides_password_hash() {
        let row = UserRow {
            id: Uuid::new_v4(),
            nome: "Beatriz".to_string(),
            email: "beatriz@escola.br".to_string(),
            senha_hash: "$2b$12$hash".to_string(),
            perfil: "Tutor".to_string(),
            escola_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&User::from(row)).unwrap();
        assert!(!json.contains("hash"));
        assert!(json.contains(r#""role":"Tutor""#));
    }

    #[test]
    fn test_create_user_requires_recognized_role() {
        for role in ["Administrador", "Profissional", "Tutor", "Família"] {
            assert!(dto(role).validate().is_ok(), "{role}");
        }
        assert!(dto("Professor").validate().is_err());
        assert!(dto("").validate().is_err());
    }

    #[test]
    fn test_create_user_short_password() {
        let mut short = dto("Tutor");
        short.password = "123".to_string();
        assert!(short.validate().is_err());
    }
}
