//! School models and DTOs.

use chrono::{DateTime, Utc};
use pei_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Row of the `escolas` table.
#[derive(Debug, Clone, FromRow)]
pub struct SchoolRow {
    pub id: Uuid,
    pub nome: String,
    pub endereco: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SchoolRow {
    pub const COLUMNS: &'static str =
        "id, nome, endereco, telefone, email, created_at, updated_at";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SchoolRow> for School {
    fn from(row: SchoolRow) -> Self {
        Self {
            id: row.id,
            name: row.nome,
            address: row.endereco,
            phone: row.telefone,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchoolDto {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    pub address: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchoolDto {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub address: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SchoolFilterParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedSchoolsResponse {
    pub data: Vec<School>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> SchoolRow {
        SchoolRow {
            id: Uuid::new_v4(),
            nome: "Escola Municipal Aurora".to_string(),
            endereco: Some("Rua das Flores, 10".to_string()),
            telefone: None,
            email: Some("contato@aurora.edu.br".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_maps_to_school() {
        let row = row();
        let id = row.id;
        let school = School::from(row);
        assert_eq!(school.id, id);
        assert_eq!(school.name, "Escola Municipal Aurora");
        assert_eq!(school.address.as_deref(), Some("Rua das Flores, 10"));
        assert!(school.phone.is_none());
    }

    #[test]
    fn test_school_serializes_camel_case() {
        let json = serde_json::to_value(School::from(row())).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("nome").is_none());
        assert_eq!(json["name"], "Escola Municipal Aurora");
    }

    #[test]
    fn test_create_school_validation() {
        let valid = CreateSchoolDto {
            name: "Escola".to_string(),
            address: None,
            phone: None,
            email: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateSchoolDto {
            name: String::new(),
            address: None,
            phone: None,
            email: Some("not-an-email".to_string()),
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }
}
