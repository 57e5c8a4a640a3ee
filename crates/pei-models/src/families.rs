//! Family models and DTOs (`familias`).
//!
//! A family record holds the guardian's contact details. Students point to
//! their family through `familia_id`.

use chrono::{DateTime, Utc};
use pei_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, FromRow)]
pub struct FamilyRow {
    pub id: Uuid,
    pub nome_responsavel: String,
    pub parentesco: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub endereco: Option<String>,
    pub usuario_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FamilyRow {
    pub const COLUMNS: &'static str = "id, nome_responsavel, parentesco, email, telefone, \
         endereco, usuario_id, created_at, updated_at";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: Uuid,
    pub guardian_name: String,
    pub relationship: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FamilyRow> for Family {
    fn from(row: FamilyRow) -> Self {
        Self {
            id: row.id,
            guardian_name: row.nome_responsavel,
            relationship: row.parentesco,
            email: row.email,
            phone: row.telefone,
            address: row.endereco,
            user_id: row.usuario_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFamilyDto {
    #[validate(length(min = 1, max = 255, message = "Guardian name must be between 1 and 255 characters"))]
    pub guardian_name: String,
    #[validate(length(max = 50))]
    pub relationship: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    pub address: Option<String>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFamilyDto {
    #[validate(length(min = 1, max = 255, message = "Guardian name must be between 1 and 255 characters"))]
    pub guardian_name: Option<String>,
    #[validate(length(max = 50))]
    pub relationship: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    pub address: Option<String>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FamilyFilterParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedFamiliesResponse {
    pub data: Vec<Family>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_maps_to_family() {
        let row = FamilyRow {
            id: Uuid::new_v4(),
            nome_responsavel: "Paulo Lima".to_string(),
            parentesco: Some("Pai".to_string()),
            email: None,
            telefone: None,
            endereco: Some("Av. Brasil, 500".to_string()),
            usuario_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let family = Family::from(row);
        assert_eq!(family.guardian_name, "Paulo Lima");
        assert_eq!(family.relationship.as_deref(), Some("Pai"));

        let json = serde_json::to_value(&family).unwrap();
        assert_eq!(json["guardianName"], "Paulo Lima");
    }

    #[test]
    fn test_create_family_validation() {
        let dto: CreateFamilyDto =
            serde_json::from_str(r#"{"guardianName":"","email":"x@y.z"}"#).unwrap();
        assert!(dto.validate().is_err());
    }
}
