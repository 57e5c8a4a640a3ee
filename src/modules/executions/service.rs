//! Executions are scoped through their student: a school restriction keeps
//! only rows whose `aluno_id` belongs to that school.

use anyhow::Context;
use pei_core::AppError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::executions::model::{
    CreateExecutionDto, DisciplineRow, DisciplineSummary, Execution, ExecutionFilterParams,
    ExecutionRow, UpdateExecutionDto,
};
use crate::utils::db::{map_write_error, not_found};

const IN_SCHOOL: &str =
    "($1::uuid IS NULL OR aluno_id IN (SELECT id FROM alunos WHERE escola_id = $1))";

pub struct ExecutionService;

impl ExecutionService {
    #[instrument(skip(db, dto))]
    pub async fn create_execution(
        db: &PgPool,
        dto: CreateExecutionDto,
    ) -> Result<Execution, AppError> {
        let sql = format!(
            "INSERT INTO acompanhamentos (aluno_id, profissional_id, disciplina, atividade, data, \
             duracao_minutos, desempenho, observacoes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            ExecutionRow::COLUMNS
        );

        let row = sqlx::query_as::<_, ExecutionRow>(&sql)
            .bind(dto.student_id)
            .bind(dto.professional_id)
            .bind(&dto.discipline)
            .bind(&dto.activity)
            .bind(dto.date)
            .bind(dto.duration_minutes)
            .bind(&dto.performance)
            .bind(&dto.notes)
            .fetch_one(db)
            .await
            .map_err(|e| map_write_error(e, "Execution"))?;

        Ok(row.into())
    }

    #[instrument(skip(db))]
    pub async fn get_executions(
        db: &PgPool,
        scope: Option<Uuid>,
        filters: &ExecutionFilterParams,
    ) -> Result<(Vec<Execution>, i64), AppError> {
        let conditions = format!(
            "{IN_SCHOOL} \
             AND ($2::uuid IS NULL OR aluno_id = $2) \
             AND ($3::uuid IS NULL OR profissional_id = $3) \
             AND ($4::text IS NULL OR disciplina = $4)"
        );

        let sql = format!(
            "SELECT {} FROM acompanhamentos WHERE {conditions} \
             ORDER BY data DESC, created_at DESC LIMIT $5 OFFSET $6",
            ExecutionRow::COLUMNS
        );
        let rows = sqlx::query_as::<_, ExecutionRow>(&sql)
            .bind(scope)
            .bind(filters.student_id)
            .bind(filters.professional_id)
            .bind(&filters.discipline)
            .bind(filters.pagination.limit())
            .bind(filters.pagination.offset())
            .fetch_all(db)
            .await
            .context("Failed to fetch executions")
            .map_err(AppError::database)?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM acompanhamentos WHERE {conditions}"))
                .bind(scope)
                .bind(filters.student_id)
                .bind(filters.professional_id)
                .bind(&filters.discipline)
                .fetch_one(db)
                .await
                .context("Failed to count executions")
                .map_err(AppError::database)?;

        Ok((rows.into_iter().map(Execution::from).collect(), total))
    }

    #[instrument(skip(db))]
    pub async fn get_execution(
        db: &PgPool,
        id: Uuid,
        scope: Option<Uuid>,
    ) -> Result<Execution, AppError> {
        let sql = format!(
            "SELECT {} FROM acompanhamentos WHERE {IN_SCHOOL} AND id = $2",
            ExecutionRow::COLUMNS
        );
        sqlx::query_as::<_, ExecutionRow>(&sql)
            .bind(scope)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch execution")
            .map_err(AppError::database)?
            .map(Execution::from)
            .ok_or_else(|| not_found("Execution"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_execution(
        db: &PgPool,
        id: Uuid,
        scope: Option<Uuid>,
        dto: UpdateExecutionDto,
    ) -> Result<Execution, AppError> {
        let sql = format!(
            "UPDATE acompanhamentos SET \
                profissional_id = COALESCE($3, profissional_id), \
                disciplina = COALESCE($4, disciplina), \
                atividade = COALESCE($5, atividade), \
                data = COALESCE($6, data), \
                duracao_minutos = COALESCE($7, duracao_minutos), \
                desempenho = COALESCE($8, desempenho), \
                observacoes = COALESCE($9, observacoes), \
                updated_at = NOW() \
             WHERE {IN_SCHOOL} AND id = $2 \
             RETURNING {}",
            ExecutionRow::COLUMNS
        );

        sqlx::query_as::<_, ExecutionRow>(&sql)
            .bind(scope)
            .bind(id)
            .bind(dto.professional_id)
            .bind(&dto.discipline)
            .bind(&dto.activity)
            .bind(dto.date)
            .bind(dto.duration_minutes)
            .bind(&dto.performance)
            .bind(&dto.notes)
            .fetch_optional(db)
            .await
            .map_err(|e| map_write_error(e, "Execution"))?
            .map(Execution::from)
            .ok_or_else(|| not_found("Execution"))
    }

    #[instrument(skip(db))]
    pub async fn delete_execution(
        db: &PgPool,
        id: Uuid,
        scope: Option<Uuid>,
    ) -> Result<(), AppError> {
        let result = sqlx::query(&format!(
            "DELETE FROM acompanhamentos WHERE {IN_SCHOOL} AND id = $2"
        ))
        .bind(scope)
        .bind(id)
        .execute(db)
        .await
        .context("Failed to delete execution")
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(not_found("Execution"));
        }

        Ok(())
    }

    /// Disciplines that have at least one execution, with their counts.
    #[instrument(skip(db))]
    pub async fn get_disciplines(
        db: &PgPool,
        scope: Option<Uuid>,
    ) -> Result<Vec<DisciplineSummary>, AppError> {
        let rows = sqlx::query_as::<_, DisciplineRow>(&format!(
            "SELECT disciplina, COUNT(*) AS total FROM acompanhamentos WHERE {IN_SCHOOL} \
             GROUP BY disciplina ORDER BY disciplina"
        ))
        .bind(scope)
        .fetch_all(db)
        .await
        .context("Failed to fetch disciplines")
        .map_err(AppError::database)?;

        Ok(rows.into_iter().map(DisciplineSummary::from).collect())
    }
}
