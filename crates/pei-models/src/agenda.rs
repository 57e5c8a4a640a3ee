//! Agenda event models and DTOs (`agenda_eventos`).

use chrono::{DateTime, Utc};
use pei_core::serde::deserialize_optional_uuid;
use pei_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, FromRow)]
pub struct AgendaEventRow {
    pub id: Uuid,
    pub titulo: String,
    pub descricao: Option<String>,
    pub inicio: DateTime<Utc>,
    pub fim: Option<DateTime<Utc>>,
    pub aluno_id: Option<Uuid>,
    pub profissional_id: Option<Uuid>,
    pub escola_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AgendaEventRow {
    pub const COLUMNS: &'static str = "id, titulo, descricao, inicio, fim, aluno_id, \
         profissional_id, escola_id, created_at, updated_at";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgendaEvent {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub student_id: Option<Uuid>,
    pub professional_id: Option<Uuid>,
    pub school_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AgendaEventRow> for AgendaEvent {
    fn from(row: AgendaEventRow) -> Self {
        Self {
            id: row.id,
            title: row.titulo,
            description: row.descricao,
            starts_at: row.inicio,
            ends_at: row.fim,
            student_id: row.aluno_id,
            professional_id: row.profissional_id,
            school_id: row.escola_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn check_interval(
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (starts_at, ends_at) {
        if end < start {
            let mut err = ValidationError::new("invalid_interval");
            err.message = Some("Event cannot end before it starts".into());
            return Err(err);
        }
    }
    Ok(())
}

fn validate_create_event(dto: &CreateAgendaEventDto) -> Result<(), ValidationError> {
    check_interval(Some(dto.starts_at), dto.ends_at)
}

fn validate_update_event(dto: &UpdateAgendaEventDto) -> Result<(), ValidationError> {
    check_interval(dto.starts_at, dto.ends_at)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_event"))]
pub struct CreateAgendaEventDto {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub student_id: Option<Uuid>,
    pub professional_id: Option<Uuid>,
    pub school_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_event"))]
pub struct UpdateAgendaEventDto {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub student_id: Option<Uuid>,
    pub professional_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AgendaFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub school_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub student_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedAgendaResponse {
    pub data: Vec<AgendaEvent>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_row_maps_to_event() {
        let now = Utc::now();
        let row = AgendaEventRow {
            id: Uuid::new_v4(),
            titulo: "Reunião de pais".to_string(),
            descricao: None,
            inicio: now,
            fim: Some(now + Duration::hours(1)),
            aluno_id: None,
            profissional_id: None,
            escola_id: Some(Uuid::new_v4()),
            created_at: now,
            updated_at: now,
        };

        let event = AgendaEvent::from(row);
        assert_eq!(event.title, "Reunião de pais");
        assert_eq!(event.starts_at, now);
        assert_eq!(event.ends_at, Some(now + Duration::hours(1)));
    }

    #[test]
    fn test_event_cannot_end_before_start() {
        let now = Utc::now();
        let dto = CreateAgendaEventDto {
            title: "Atendimento".to_string(),
            description: None,
            starts_at: now,
            ends_at: Some(now - Duration::minutes(10)),
            student_id: None,
            professional_id: None,
            school_id: None,
        };
        assert!(dto.validate().is_err());

        let update = UpdateAgendaEventDto {
            ends_at: Some(now - Duration::minutes(10)),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_create_event_from_json() {
        let dto: CreateAgendaEventDto = serde_json::from_str(
            r#"{"title":"Aula","startsAt":"2025-03-10T13:00:00Z","endsAt":"2025-03-10T14:00:00Z"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.ends_at.unwrap() - dto.starts_at, Duration::hours(1));
    }
}
