use anyhow::Context;
use pei_core::AppError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::peis::model::{CreatePeiDto, Pei, PeiFilterParams, PeiRow, UpdatePeiDto};
use crate::utils::db::{map_write_error, not_found};

const IN_SCHOOL: &str =
    "($1::uuid IS NULL OR aluno_id IN (SELECT id FROM alunos WHERE escola_id = $1))";

pub struct PeiService;

impl PeiService {
    #[instrument(skip(db, dto))]
    pub async fn create_pei(db: &PgPool, dto: CreatePeiDto) -> Result<Pei, AppError> {
        let sql = format!(
            "INSERT INTO peis (aluno_id, profissional_id, ano_letivo, objetivos, estrategias, \
             recursos, avaliacao, status, data_inicio, data_fim) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {}",
            PeiRow::COLUMNS
        );

        let row = sqlx::query_as::<_, PeiRow>(&sql)
            .bind(dto.student_id)
            .bind(dto.professional_id)
            .bind(dto.year)
            .bind(&dto.goals)
            .bind(&dto.strategies)
            .bind(&dto.resources)
            .bind(&dto.evaluation)
            .bind(dto.status.unwrap_or_default().as_str())
            .bind(dto.start_date)
            .bind(dto.end_date)
            .fetch_one(db)
            .await
            .map_err(|e| map_write_error(e, "PEI"))?;

        Ok(row.into())
    }

    #[instrument(skip(db))]
    pub async fn get_peis(
        db: &PgPool,
        scope: Option<Uuid>,
        filters: &PeiFilterParams,
    ) -> Result<(Vec<Pei>, i64), AppError> {
        let conditions = format!(
            "{IN_SCHOOL} \
             AND ($2::uuid IS NULL OR aluno_id = $2) \
             AND ($3::text IS NULL OR status = $3)"
        );
        let status = filters.status.map(|s| s.as_str());

        let sql = format!(
            "SELECT {} FROM peis WHERE {conditions} \
             ORDER BY ano_letivo DESC, created_at DESC LIMIT $4 OFFSET $5",
            PeiRow::COLUMNS
        );
        let rows = sqlx::query_as::<_, PeiRow>(&sql)
            .bind(scope)
            .bind(filters.student_id)
            .bind(status)
            .bind(filters.pagination.limit())
            .bind(filters.pagination.offset())
            .fetch_all(db)
            .await
            .context("Failed to fetch PEIs")
            .map_err(AppError::database)?;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM peis WHERE {conditions}"))
            .bind(scope)
            .bind(filters.student_id)
            .bind(status)
            .fetch_one(db)
            .await
            .context("Failed to count PEIs")
            .map_err(AppError::database)?;

        Ok((rows.into_iter().map(Pei::from).collect(), total))
    }

    #[instrument(skip(db))]
    pub async fn get_pei(db: &PgPool, id: Uuid, scope: Option<Uuid>) -> Result<Pei, AppError> {
        let sql = format!(
            "SELECT {} FROM peis WHERE {IN_SCHOOL} AND id = $2",
            PeiRow::COLUMNS
        );
        sqlx::query_as::<_, PeiRow>(&sql)
            .bind(scope)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch PEI")
            .map_err(AppError::database)?
            .map(Pei::from)
            .ok_or_else(|| not_found("PEI"))
    }

    /// Applies a partial update.
    ///
    /// The period check on the DTO only sees dates sent together, so the
    /// stored dates are re-checked here before writing.
    #[instrument(skip(db, dto))]
    pub async fn update_pei(
        db: &PgPool,
        id: Uuid,
        scope: Option<Uuid>,
        dto: UpdatePeiDto,
    ) -> Result<Pei, AppError> {
        let current = Self::get_pei(db, id, scope).await?;
        let start = dto.start_date.or(current.start_date);
        let end = dto.end_date.or(current.end_date);
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(AppError::unprocessable(anyhow::anyhow!(
                    "End date cannot precede start date"
                )));
            }
        }

        let sql = format!(
            "UPDATE peis SET \
                profissional_id = COALESCE($3, profissional_id), \
                ano_letivo = COALESCE($4, ano_letivo), \
                objetivos = COALESCE($5, objetivos), \
                estrategias = COALESCE($6, estrategias), \
                recursos = COALESCE($7, recursos), \
                avaliacao = COALESCE($8, avaliacao), \
                status = COALESCE($9, status), \
                data_inicio = COALESCE($10, data_inicio), \
                data_fim = COALESCE($11, data_fim), \
                updated_at = NOW() \
             WHERE {IN_SCHOOL} AND id = $2 \
             RETURNING {}",
            PeiRow::COLUMNS
        );

        sqlx::query_as::<_, PeiRow>(&sql)
            .bind(scope)
            .bind(id)
            .bind(dto.professional_id)
            .bind(dto.year)
            .bind(&dto.goals)
            .bind(&dto.strategies)
            .bind(&dto.resources)
            .bind(&dto.evaluation)
            .bind(dto.status.map(|s| s.as_str()))
            .bind(dto.start_date)
            .bind(dto.end_date)
            .fetch_optional(db)
            .await
            .map_err(|e| map_write_error(e, "PEI"))?
            .map(Pei::from)
            .ok_or_else(|| not_found("PEI"))
    }

    #[instrument(skip(db))]
    pub async fn delete_pei(db: &PgPool, id: Uuid, scope: Option<Uuid>) -> Result<(), AppError> {
        let result = sqlx::query(&format!("DELETE FROM peis WHERE {IN_SCHOOL} AND id = $2"))
            .bind(scope)
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete PEI")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(not_found("PEI"));
        }

        Ok(())
    }
}
