//! Professional models and DTOs (`profissionais`).

use chrono::{DateTime, Utc};
use pei_core::serde::deserialize_optional_uuid;
use pei_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, FromRow)]
pub struct ProfessionalRow {
    pub id: Uuid,
    pub nome: String,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub especialidade: Option<String>,
    pub escola_id: Option<Uuid>,
    pub usuario_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfessionalRow {
    pub const COLUMNS: &'static str = "id, nome, email, telefone, especialidade, escola_id, \
         usuario_id, created_at, updated_at";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub school_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfessionalRow> for Professional {
    fn from(row: ProfessionalRow) -> Self {
        Self {
            id: row.id,
            name: row.nome,
            email: row.email,
            phone: row.telefone,
            specialty: row.especialidade,
            school_id: row.escola_id,
            user_id: row.usuario_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfessionalDto {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub specialty: Option<String>,
    pub school_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfessionalDto {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub specialty: Option<String>,
    pub school_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProfessionalFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub school_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedProfessionalsResponse {
    pub data: Vec<Professional>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_maps_to_professional() {
        let row = ProfessionalRow {
            id: Uuid::new_v4(),
            nome: "Carla Souza".to_string(),
            email: Some("carla@escola.br".to_string()),
            telefone: Some("(11) 99999-0000".to_string()),
            especialidade: Some("Psicopedagogia".to_string()),
            escola_id: None,
            usuario_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let professional = Professional::from(row);
        assert_eq!(professional.name, "Carla Souza");
        assert_eq!(professional.specialty.as_deref(), Some("Psicopedagogia"));
        assert_eq!(professional.phone.as_deref(), Some("(11) 99999-0000"));
    }

    #[test]
    fn test_update_dto_rejects_bad_email() {
        let dto = UpdateProfessionalDto {
            email: Some("carla".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }
}
