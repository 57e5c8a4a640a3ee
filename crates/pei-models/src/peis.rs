//! PEI (individualized education plan) models and DTOs.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use pei_core::serde::deserialize_optional_uuid;
use pei_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Lifecycle status of a plan, stored as text in `peis.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PeiStatus {
    #[default]
    Rascunho,
    Ativo,
    Concluido,
}

impl PeiStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeiStatus::Rascunho => "rascunho",
            PeiStatus::Ativo => "ativo",
            PeiStatus::Concluido => "concluido",
        }
    }
}

impl FromStr for PeiStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rascunho" => Ok(PeiStatus::Rascunho),
            "ativo" => Ok(PeiStatus::Ativo),
            "concluido" => Ok(PeiStatus::Concluido),
            other => Err(format!("invalid PEI status: {other}")),
        }
    }
}

impl fmt::Display for PeiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn deserialize_optional_status<'de, D>(deserializer: D) -> Result<Option<PeiStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Row of the `peis` table.
#[derive(Debug, Clone, FromRow)]
pub struct PeiRow {
    pub id: Uuid,
    pub aluno_id: Uuid,
    pub profissional_id: Option<Uuid>,
    pub ano_letivo: i32,
    pub objetivos: String,
    pub estrategias: Option<String>,
    pub recursos: Option<String>,
    pub avaliacao: Option<String>,
    pub status: String,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PeiRow {
    pub const COLUMNS: &'static str = "id, aluno_id, profissional_id, ano_letivo, objetivos, \
         estrategias, recursos, avaliacao, status, data_inicio, data_fim, created_at, updated_at";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pei {
    pub id: Uuid,
    pub student_id: Uuid,
    pub professional_id: Option<Uuid>,
    pub year: i32,
    pub goals: String,
    pub strategies: Option<String>,
    pub resources: Option<String>,
    pub evaluation: Option<String>,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PeiRow> for Pei {
    fn from(row: PeiRow) -> Self {
        Self {
            id: row.id,
            student_id: row.aluno_id,
            professional_id: row.profissional_id,
            year: row.ano_letivo,
            goals: row.objetivos,
            strategies: row.estrategias,
            resources: row.recursos,
            evaluation: row.avaliacao,
            status: row.status,
            start_date: row.data_inicio,
            end_date: row.data_fim,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn check_period(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            let mut err = ValidationError::new("invalid_period");
            err.message = Some("End date cannot precede start date".into());
            return Err(err);
        }
    }
    Ok(())
}

fn validate_create_pei(dto: &CreatePeiDto) -> Result<(), ValidationError> {
    check_period(dto.start_date, dto.end_date)
}

fn validate_update_pei(dto: &UpdatePeiDto) -> Result<(), ValidationError> {
    check_period(dto.start_date, dto.end_date)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_pei"))]
pub struct CreatePeiDto {
    pub student_id: Uuid,
    pub professional_id: Option<Uuid>,
    #[validate(range(min = 2000, max = 2100, message = "Year must be between 2000 and 2100"))]
    pub year: i32,
    #[validate(length(min = 1, message = "Goals are required"))]
    pub goals: String,
    pub strategies: Option<String>,
    pub resources: Option<String>,
    pub evaluation: Option<String>,
    pub status: Option<PeiStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Partial update. The period check only applies when both dates are sent.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_pei"))]
pub struct UpdatePeiDto {
    pub professional_id: Option<Uuid>,
    #[validate(range(min = 2000, max = 2100, message = "Year must be between 2000 and 2100"))]
    pub year: Option<i32>,
    #[validate(length(min = 1, message = "Goals are required"))]
    pub goals: Option<String>,
    pub strategies: Option<String>,
    pub resources: Option<String>,
    pub evaluation: Option<String>,
    pub status: Option<PeiStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PeiFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub student_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_status")]
    pub status: Option<PeiStatus>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedPeisResponse {
    pub data: Vec<Pei>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto() -> CreatePeiDto {
        CreatePeiDto {
            student_id: Uuid::new_v4(),
            professional_id: None,
            year: 2025,
            goals: "Ampliar autonomia na leitura".to_string(),
            strategies: None,
            resources: None,
            evaluation: None,
            status: None,
            start_date: NaiveDate::from_ymd_opt(2025, 2, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 15),
        }
    }

    #[test]
    fn test_status_parse_and_display() {
        for status in [PeiStatus::Rascunho, PeiStatus::Ativo, PeiStatus::Concluido] {
            assert_eq!(status.as_str().parse::<PeiStatus>(), Ok(status));
            assert_eq!(status.to_string(), status.as_str());
        }
        assert!("arquivado".parse::<PeiStatus>().is_err());
        assert_eq!(PeiStatus::default(), PeiStatus::Rascunho);
    }

    #[test]
    fn test_status_json_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&PeiStatus::Concluido).unwrap(),
            r#""concluido""#
        );
        let dto: UpdatePeiDto = serde_json::from_str(r#"{"status":"ativo"}"#).unwrap();
        assert_eq!(dto.status, Some(PeiStatus::Ativo));
        assert!(serde_json::from_str::<UpdatePeiDto>(r#"{"status":"ATIVO"}"#).is_err());
    }

    #[test]
    fn test_row_maps_to_pei() {
        let row = PeiRow {
            id: Uuid::new_v4(),
            aluno_id: Uuid::new_v4(),
            profissional_id: None,
            ano_letivo: 2024,
            objetivos: "Comunicação alternativa".to_string(),
            estrategias: Some("Pranchas de comunicação".to_string()),
            recursos: None,
            avaliacao: None,
            status: "ativo".to_string(),
            data_inicio: None,
            data_fim: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let pei = Pei::from(row);
        assert_eq!(pei.year, 2024);
        assert_eq!(pei.goals, "Comunicação alternativa");
        assert_eq!(pei.strategies.as_deref(), Some("Pranchas de comunicação"));
        assert_eq!(pei.status, "ativo");
    }

    #[test]
    fn test_period_validation() {
        assert!(create_dto().validate().is_ok());

        let mut inverted = create_dto();
        inverted.end_date = NaiveDate::from_ymd_opt(2025, 1, 1);
        assert!(inverted.validate().is_err());

        let partial = UpdatePeiDto {
            end_date: NaiveDate::from_ymd_opt(2020, 1, 1),
            ..Default::default()
        };
        assert!(partial.validate().is_ok());
    }

    #[test]
    fn test_year_range() {
        let mut dto = create_dto();
        dto.year = 1999;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_filter_status_from_query() {
        let filters: PeiFilterParams =
            serde_json::from_str(r#"{"status":"concluido","studentId":""}"#).unwrap();
        assert_eq!(filters.status, Some(PeiStatus::Concluido));
        assert!(filters.student_id.is_none());
        assert!(serde_json::from_str::<PeiFilterParams>(r#"{"status":"x"}"#).is_err());
    }
}
