use anyhow::Context;
use pei_core::{AppError, PaginationParams};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::professionals::model::{
    CreateProfessionalDto, Professional, ProfessionalRow, UpdateProfessionalDto,
};
use crate::utils::db::{map_write_error, not_found};

pub struct ProfessionalService;

impl ProfessionalService {
    #[instrument(skip(db, dto))]
    pub async fn create_professional(
        db: &PgPool,
        dto: CreateProfessionalDto,
        school_id: Option<Uuid>,
    ) -> Result<Professional, AppError> {
        let sql = format!(
            "INSERT INTO profissionais (nome, email, telefone, especialidade, escola_id, usuario_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            ProfessionalRow::COLUMNS
        );

        let row = sqlx::query_as::<_, ProfessionalRow>(&sql)
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.specialty)
            .bind(school_id)
            .bind(dto.user_id)
            .fetch_one(db)
            .await
            .map_err(|e| map_write_error(e, "Professional"))?;

        Ok(row.into())
    }

    #[instrument(skip(db))]
    pub async fn get_professionals(
        db: &PgPool,
        school_id: Option<Uuid>,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Professional>, i64), AppError> {
        let sql = format!(
            "SELECT {} FROM profissionais WHERE ($1::uuid IS NULL OR escola_id = $1) \
             ORDER BY nome LIMIT $2 OFFSET $3",
            ProfessionalRow::COLUMNS
        );
        let rows = sqlx::query_as::<_, ProfessionalRow>(&sql)
            .bind(school_id)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(db)
            .await
            .context("Failed to fetch professionals")
            .map_err(AppError::database)?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM profissionais WHERE ($1::uuid IS NULL OR escola_id = $1)",
        )
        .bind(school_id)
        .fetch_one(db)
        .await
        .context("Failed to count professionals")
        .map_err(AppError::database)?;

        Ok((rows.into_iter().map(Professional::from).collect(), total))
    }

    #[instrument(skip(db))]
    pub async fn get_professional(
        db: &PgPool,
        id: Uuid,
        scope: Option<Uuid>,
    ) -> Result<Professional, AppError> {
        let sql = format!(
            "SELECT {} FROM profissionais WHERE id = $1 AND ($2::uuid IS NULL OR escola_id = $2)",
            ProfessionalRow::COLUMNS
        );
        sqlx::query_as::<_, ProfessionalRow>(&sql)
            .bind(id)
            .bind(scope)
            .fetch_optional(db)
            .await
            .context("Failed to fetch professional")
            .map_err(AppError::database)?
            .map(Professional::from)
            .ok_or_else(|| not_found("Professional"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_professional(
        db: &PgPool,
        id: Uuid,
        scope: Option<Uuid>,
        dto: UpdateProfessionalDto,
    ) -> Result<Professional, AppError> {
        let sql = format!(
            "UPDATE profissionais SET \
                nome = COALESCE($3, nome), \
                email = COALESCE($4, email), \
                telefone = COALESCE($5, telefone), \
                especialidade = COALESCE($6, especialidade), \
                escola_id = COALESCE($7, escola_id), \
                usuario_id = COALESCE($8, usuario_id), \
                updated_at = NOW() \
             WHERE id = $1 AND ($2::uuid IS NULL OR escola_id = $2) \
             RETURNING {}",
            ProfessionalRow::COLUMNS
        );

        sqlx::query_as::<_, ProfessionalRow>(&sql)
            .bind(id)
            .bind(scope)
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.specialty)
            .bind(dto.school_id)
            .bind(dto.user_id)
            .fetch_optional(db)
            .await
            .map_err(|e| map_write_error(e, "Professional"))?
            .map(Professional::from)
            .ok_or_else(|| not_found("Professional"))
    }

    #[instrument(skip(db))]
    pub async fn delete_professional(
        db: &PgPool,
        id: Uuid,
        scope: Option<Uuid>,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM profissionais WHERE id = $1 AND ($2::uuid IS NULL OR escola_id = $2)",
        )
        .bind(id)
        .bind(scope)
        .execute(db)
        .await
        .context("Failed to delete professional")
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(not_found("Professional"));
        }

        Ok(())
    }
}
