use anyhow::Context;
use pei_core::AppError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::model::{
    CreateStudentDto, Student, StudentFilterParams, StudentRow, UpdateStudentDto,
};
use crate::utils::db::{map_write_error, not_found};

const FILTERS: &str = "($1::uuid IS NULL OR escola_id = $1) \
     AND ($2::uuid IS NULL OR familia_id = $2) \
     AND ($3::boolean IS NULL OR ativo = $3)";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, dto))]
    pub async fn create_student(
        db: &PgPool,
        dto: CreateStudentDto,
        school_id: Uuid,
    ) -> Result<Student, AppError> {
        let sql = format!(
            "INSERT INTO alunos (nome, data_nascimento, escola_id, familia_id, serie, turma, \
             diagnostico, observacoes, ativo) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
            StudentRow::COLUMNS
        );

        let row = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(&dto.name)
            .bind(dto.birth_date)
            .bind(school_id)
            .bind(dto.family_id)
            .bind(&dto.grade)
            .bind(&dto.class_name)
            .bind(&dto.diagnosis)
            .bind(&dto.notes)
            .bind(dto.active.unwrap_or(true))
            .fetch_one(db)
            .await
            .map_err(|e| map_write_error(e, "Student"))?;

        Ok(row.into())
    }

    /// Lists students matching `filters`. `school_id` is the effective
    /// school filter, already narrowed to the caller's scope.
    #[instrument(skip(db))]
    pub async fn get_students(
        db: &PgPool,
        school_id: Option<Uuid>,
        filters: &StudentFilterParams,
    ) -> Result<(Vec<Student>, i64), AppError> {
        let sql = format!(
            "SELECT {} FROM alunos WHERE {FILTERS} ORDER BY nome LIMIT $4 OFFSET $5",
            StudentRow::COLUMNS
        );
        let rows = sqlx::query_as::<_, StudentRow>(&sql)
            .bind(school_id)
            .bind(filters.family_id)
            .bind(filters.active)
            .bind(filters.pagination.limit())
            .bind(filters.pagination.offset())
            .fetch_all(db)
            .await
            .context("Failed to fetch students")
            .map_err(AppError::database)?;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM alunos WHERE {FILTERS}"))
            .bind(school_id)
            .bind(filters.family_id)
            .bind(filters.active)
            .fetch_one(db)
            .await
            .context("Failed to count students")
            .map_err(AppError::database)?;

        Ok((rows.into_iter().map(Student::from).collect(), total))
    }

    /// Fetches one student, restricted to `scope` when given.
    #[instrument(skip(db))]
    pub async fn get_student(
        db: &PgPool,
        id: Uuid,
        scope: Option<Uuid>,
    ) -> Result<Student, AppError> {
        let sql = format!(
            "SELECT {} FROM alunos WHERE id = $1 AND ($2::uuid IS NULL OR escola_id = $2)",
            StudentRow::COLUMNS
        );
        sqlx::query_as::<_, StudentRow>(&sql)
            .bind(id)
            .bind(scope)
            .fetch_optional(db)
            .await
            .context("Failed to fetch student")
            .map_err(AppError::database)?
            .map(Student::from)
            .ok_or_else(|| not_found("Student"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: Uuid,
        scope: Option<Uuid>,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let sql = format!(
            "UPDATE alunos SET \
                nome = COALESCE($3, nome), \
                data_nascimento = COALESCE($4, data_nascimento), \
                familia_id = COALESCE($5, familia_id), \
                serie = COALESCE($6, serie), \
                turma = COALESCE($7, turma), \
                diagnostico = COALESCE($8, diagnostico), \
                observacoes = COALESCE($9, observacoes), \
                ativo = COALESCE($10, ativo), \
                updated_at = NOW() \
             WHERE id = $1 AND ($2::uuid IS NULL OR escola_id = $2) \
             RETURNING {}",
            StudentRow::COLUMNS
        );

        sqlx::query_as::<_, StudentRow>(&sql)
            .bind(id)
            .bind(scope)
            .bind(&dto.name)
            .bind(dto.birth_date)
            .bind(dto.family_id)
            .bind(&dto.grade)
            .bind(&dto.class_name)
            .bind(&dto.diagnosis)
            .bind(&dto.notes)
            .bind(dto.active)
            .fetch_optional(db)
            .await
            .map_err(|e| map_write_error(e, "Student"))?
            .map(Student::from)
            .ok_or_else(|| not_found("Student"))
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: Uuid, scope: Option<Uuid>) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM alunos WHERE id = $1 AND ($2::uuid IS NULL OR escola_id = $2)")
                .bind(id)
                .bind(scope)
                .execute(db)
                .await
                .context("Failed to delete student")
                .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(not_found("Student"));
        }

        Ok(())
    }
}
