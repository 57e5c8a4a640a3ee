//! Execution (acompanhamento) models and DTOs.
//!
//! An execution is a logged activity session: one student, one discipline,
//! one date, optionally the professional who ran it.

use chrono::{DateTime, NaiveDate, Utc};
use pei_core::serde::{deserialize_optional_string, deserialize_optional_uuid};
use pei_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Row of the `acompanhamentos` table.
#[derive(Debug, Clone, FromRow)]
pub struct ExecutionRow {
    pub id: Uuid,
    pub aluno_id: Uuid,
    pub profissional_id: Option<Uuid>,
    pub disciplina: String,
    pub atividade: String,
    pub data: NaiveDate,
    pub duracao_minutos: Option<i32>,
    pub desempenho: Option<String>,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExecutionRow {
    pub const COLUMNS: &'static str = "id, aluno_id, profissional_id, disciplina, atividade, \
         data, duracao_minutos, desempenho, observacoes, created_at, updated_at";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub id: Uuid,
    pub student_id: Uuid,
    pub professional_id: Option<Uuid>,
    pub discipline: String,
    pub activity: String,
    pub date: NaiveDate,
    pub duration_minutes: Option<i32>,
    pub performance: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExecutionRow> for Execution {
    fn from(row: ExecutionRow) -> Self {
        Self {
            id: row.id,
            student_id: row.aluno_id,
            professional_id: row.profissional_id,
            discipline: row.disciplina,
            activity: row.atividade,
            date: row.data,
            duration_minutes: row.duracao_minutos,
            performance: row.desempenho,
            notes: row.observacoes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExecutionDto {
    pub student_id: Uuid,
    pub professional_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100, message = "Discipline must be between 1 and 100 characters"))]
    pub discipline: String,
    #[validate(length(min = 1, message = "Activity is required"))]
    pub activity: String,
    pub date: NaiveDate,
    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration_minutes: Option<i32>,
    #[validate(length(max = 50))]
    pub performance: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExecutionDto {
    pub professional_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100, message = "Discipline must be between 1 and 100 characters"))]
    pub discipline: Option<String>,
    #[validate(length(min = 1, message = "Activity is required"))]
    pub activity: Option<String>,
    pub date: Option<NaiveDate>,
    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration_minutes: Option<i32>,
    #[validate(length(max = 50))]
    pub performance: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ExecutionFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub student_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub professional_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub discipline: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedExecutionsResponse {
    pub data: Vec<Execution>,
    pub meta: PaginationMeta,
}

/// Discipline name with its number of logged executions.
#[derive(Debug, Clone, FromRow)]
pub struct DisciplineRow {
    pub disciplina: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineSummary {
    pub discipline: String,
    pub executions: i64,
}

impl From<DisciplineRow> for DisciplineSummary {
    fn from(row: DisciplineRow) -> Self {
        Self {
            discipline: row.disciplina,
            executions: row.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto() -> CreateExecutionDto {
        CreateExecutionDto {
            student_id: Uuid::new_v4(),
            professional_id: None,
            discipline: "Matemática".to_string(),
            activity: "Jogo de contagem com material dourado".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
            duration_minutes: Some(45),
            performance: Some("Bom".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_row_maps_to_execution() {
        let row = ExecutionRow {
            id: Uuid::new_v4(),
            aluno_id: Uuid::new_v4(),
            profissional_id: Some(Uuid::new_v4()),
            disciplina: "Português".to_string(),
            atividade: "Leitura compartilhada".to_string(),
            data: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
            duracao_minutos: Some(30),
            desempenho: None,
            observacoes: Some("Participou bem".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let student_id = row.aluno_id;

        let execution = Execution::from(row);
        assert_eq!(execution.student_id, student_id);
        assert_eq!(execution.discipline, "Português");
        assert_eq!(execution.duration_minutes, Some(30));
        assert_eq!(execution.notes.as_deref(), Some("Participou bem"));
    }

    #[test]
    fn test_create_execution_validation() {
        assert!(create_dto().validate().is_ok());

        let mut negative = create_dto();
        negative.duration_minutes = Some(-5);
        assert!(negative.validate().is_err());

        let mut blank = create_dto();
        blank.discipline = String::new();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_discipline_summary_mapping() {
        let summary = DisciplineSummary::from(DisciplineRow {
            disciplina: "Artes".to_string(),
            total: 7,
        });
        assert_eq!(summary.discipline, "Artes");
        assert_eq!(summary.executions, 7);
    }
}
