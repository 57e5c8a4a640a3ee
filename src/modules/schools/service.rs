use anyhow::Context;
use pei_core::{AppError, PaginationParams};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::schools::model::{CreateSchoolDto, School, SchoolRow, UpdateSchoolDto};
use crate::utils::db::{map_write_error, not_found};

pub struct SchoolService;

impl SchoolService {
    #[instrument(skip(db, dto))]
    pub async fn create_school(db: &PgPool, dto: CreateSchoolDto) -> Result<School, AppError> {
        let sql = format!(
            "INSERT INTO escolas (nome, endereco, telefone, email) VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            SchoolRow::COLUMNS
        );

        let row = sqlx::query_as::<_, SchoolRow>(&sql)
            .bind(&dto.name)
            .bind(&dto.address)
            .bind(&dto.phone)
            .bind(&dto.email)
            .fetch_one(db)
            .await
            .map_err(|e| map_write_error(e, "School"))?;

        Ok(row.into())
    }

    /// Lists schools by name. A `scope` limits the result to that one school.
    #[instrument(skip(db))]
    pub async fn get_schools(
        db: &PgPool,
        scope: Option<Uuid>,
        pagination: &PaginationParams,
    ) -> Result<(Vec<School>, i64), AppError> {
        let sql = format!(
            "SELECT {} FROM escolas WHERE ($1::uuid IS NULL OR id = $1) \
             ORDER BY nome LIMIT $2 OFFSET $3",
            SchoolRow::COLUMNS
        );
        let rows = sqlx::query_as::<_, SchoolRow>(&sql)
            .bind(scope)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(db)
            .await
            .context("Failed to fetch schools")
            .map_err(AppError::database)?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM escolas WHERE ($1::uuid IS NULL OR id = $1)")
                .bind(scope)
                .fetch_one(db)
                .await
                .context("Failed to count schools")
                .map_err(AppError::database)?;

        Ok((rows.into_iter().map(School::from).collect(), total))
    }

    #[instrument(skip(db))]
    pub async fn get_school(db: &PgPool, id: Uuid) -> Result<School, AppError> {
        let sql = format!("SELECT {} FROM escolas WHERE id = $1", SchoolRow::COLUMNS);
        sqlx::query_as::<_, SchoolRow>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch school")
            .map_err(AppError::database)?
            .map(School::from)
            .ok_or_else(|| not_found("School"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_school(
        db: &PgPool,
        id: Uuid,
        dto: UpdateSchoolDto,
    ) -> Result<School, AppError> {
        let sql = format!(
            "UPDATE escolas SET \
                nome = COALESCE($2, nome), \
                endereco = COALESCE($3, endereco), \
                telefone = COALESCE($4, telefone), \
                email = COALESCE($5, email), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            SchoolRow::COLUMNS
        );

        sqlx::query_as::<_, SchoolRow>(&sql)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.address)
            .bind(&dto.phone)
            .bind(&dto.email)
            .fetch_optional(db)
            .await
            .map_err(|e| map_write_error(e, "School"))?
            .map(School::from)
            .ok_or_else(|| not_found("School"))
    }

    /// Deletes a school. Its students, PEIs and agenda events cascade.
    #[instrument(skip(db))]
    pub async fn delete_school(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM escolas WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete school")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(not_found("School"));
        }

        Ok(())
    }
}
