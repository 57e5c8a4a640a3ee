//! Student models and DTOs.
//!
//! Students live in the `alunos` table. Each student belongs to exactly one
//! school and optionally to a family.

use chrono::{DateTime, NaiveDate, Utc};
use pei_core::serde::{deserialize_optional_bool, deserialize_optional_uuid};
use pei_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Row of the `alunos` table.
#[derive(Debug, Clone, FromRow)]
pub struct StudentRow {
    pub id: Uuid,
    pub nome: String,
    pub data_nascimento: Option<NaiveDate>,
    pub escola_id: Uuid,
    pub familia_id: Option<Uuid>,
    pub serie: Option<String>,
    pub turma: Option<String>,
    pub diagnostico: Option<String>,
    pub observacoes: Option<String>,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudentRow {
    pub const COLUMNS: &'static str = "id, nome, data_nascimento, escola_id, familia_id, serie, \
         turma, diagnostico, observacoes, ativo, created_at, updated_at";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub school_id: Uuid,
    pub family_id: Option<Uuid>,
    pub grade: Option<String>,
    pub class_name: Option<String>,
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: row.id,
            name: row.nome,
            birth_date: row.data_nascimento,
            school_id: row.escola_id,
            family_id: row.familia_id,
            grade: row.serie,
            class_name: row.turma,
            diagnosis: row.diagnostico,
            notes: row.observacoes,
            active: row.ativo,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn birth_date_not_in_future(date: Option<NaiveDate>) -> Result<(), ValidationError> {
    match date {
        Some(date) if date > Utc::now().date_naive() => {
            let mut err = ValidationError::new("birth_date_in_future");
            err.message = Some("Birth date cannot be in the future".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

fn validate_create_student(dto: &CreateStudentDto) -> Result<(), ValidationError> {
    birth_date_not_in_future(dto.birth_date)
}

fn validate_update_student(dto: &UpdateStudentDto) -> Result<(), ValidationError> {
    birth_date_not_in_future(dto.birth_date)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_student"))]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    /// Target school. Ignored for users scoped to a single school.
    pub school_id: Option<Uuid>,
    pub family_id: Option<Uuid>,
    #[validate(length(max = 50))]
    pub grade: Option<String>,
    #[validate(length(max = 50))]
    pub class_name: Option<String>,
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
    pub active: Option<bool>,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_student"))]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub family_id: Option<Uuid>,
    #[validate(length(max = 50))]
    pub grade: Option<String>,
    #[validate(length(max = 50))]
    pub class_name: Option<String>,
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
    pub active: Option<bool>,
}

/// Equality filters for listing students.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StudentFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub school_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub family_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub active: Option<bool>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto() -> CreateStudentDto {
        CreateStudentDto {
            name: "Maria Clara".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2015, 3, 9),
            school_id: None,
            family_id: None,
            grade: Some("3º ano".to_string()),
            class_name: Some("B".to_string()),
            diagnosis: None,
            notes: None,
            active: None,
        }
    }

    #[test]
    fn test_row_maps_to_student() {
        let row = StudentRow {
            id: Uuid::new_v4(),
            nome: "João".to_string(),
            data_nascimento: NaiveDate::from_ymd_opt(2014, 1, 2),
            escola_id: Uuid::new_v4(),
            familia_id: None,
            serie: Some("4º ano".to_string()),
            turma: Some("A".to_string()),
            diagnostico: Some("TEA".to_string()),
            observacoes: None,
            ativo: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let school_id = row.escola_id;

        let student = Student::from(row);
        assert_eq!(student.name, "João");
        assert_eq!(student.school_id, school_id);
        assert_eq!(student.grade.as_deref(), Some("4º ano"));
        assert_eq!(student.class_name.as_deref(), Some("A"));
        assert_eq!(student.diagnosis.as_deref(), Some("TEA"));
        assert!(student.active);

        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["birthDate"], "2014-01-02");
        assert_eq!(json["className"], "A");
    }

    #[test]
    fn test_create_student_dto_validation() {
        assert!(create_dto().validate().is_ok());

        let mut empty_name = create_dto();
        empty_name.name = String::new();
        assert!(empty_name.validate().is_err());

        let mut long_grade = create_dto();
        long_grade.grade = Some("x".repeat(51));
        assert!(long_grade.validate().is_err());
    }

    #[test]
    fn test_birth_date_in_future_is_rejected() {
        let mut dto = create_dto();
        dto.birth_date = Some(Utc::now().date_naive() + chrono::Duration::days(2));
        assert!(dto.validate().is_err());

        let update = UpdateStudentDto {
            birth_date: Some(Utc::now().date_naive() + chrono::Duration::days(2)),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_empty_update_is_valid() {
        assert!(UpdateStudentDto::default().validate().is_ok());
    }

    #[test]
    fn test_create_dto_accepts_camel_case_json() {
        let dto: CreateStudentDto = serde_json::from_str(
            r#"{"name":"Ana","birthDate":"2016-07-21","className":"C","active":false}"#,
        )
        .unwrap();
        assert_eq!(dto.birth_date, NaiveDate::from_ymd_opt(2016, 7, 21));
        assert_eq!(dto.class_name.as_deref(), Some("C"));
        assert_eq!(dto.active, Some(false));
    }

    #[test]
    fn test_filter_params_from_query_strings() {
        let school = Uuid::new_v4();
        let json = format!(r#"{{"schoolId":"{school}","familyId":"","active":"true","page":"2"}}"#);
        let filters: StudentFilterParams = serde_json::from_str(&json).unwrap();
        assert_eq!(filters.school_id, Some(school));
        assert_eq!(filters.family_id, None);
        assert_eq!(filters.active, Some(true));
        assert_eq!(filters.pagination.offset(), 10);
    }
}
