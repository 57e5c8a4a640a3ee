use anyhow::Context;
use pei_core::{AppError, PaginationParams};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::families::model::{CreateFamilyDto, Family, FamilyRow, UpdateFamilyDto};
use crate::utils::db::{map_write_error, not_found};

pub struct FamilyService;

impl FamilyService {
    #[instrument(skip(db, dto))]
    pub async fn create_family(db: &PgPool, dto: CreateFamilyDto) -> Result<Family, AppError> {
        let sql = format!(
            "INSERT INTO familias (nome_responsavel, parentesco, email, telefone, endereco, usuario_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            FamilyRow::COLUMNS
        );

        let row = sqlx::query_as::<_, FamilyRow>(&sql)
            .bind(&dto.guardian_name)
            .bind(&dto.relationship)
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.address)
            .bind(dto.user_id)
            .fetch_one(db)
            .await
            .map_err(|e| map_write_error(e, "Family"))?;

        Ok(row.into())
    }

    #[instrument(skip(db))]
    pub async fn get_families(
        db: &PgPool,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Family>, i64), AppError> {
        let sql = format!(
            "SELECT {} FROM familias ORDER BY nome_responsavel LIMIT $1 OFFSET $2",
            FamilyRow::COLUMNS
        );
        let rows = sqlx::query_as::<_, FamilyRow>(&sql)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(db)
            .await
            .context("Failed to fetch families")
            .map_err(AppError::database)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM familias")
            .fetch_one(db)
            .await
            .context("Failed to count families")
            .map_err(AppError::database)?;

        Ok((rows.into_iter().map(Family::from).collect(), total))
    }

    #[instrument(skip(db))]
    pub async fn get_family(db: &PgPool, id: Uuid) -> Result<Family, AppError> {
        let sql = format!("SELECT {} FROM familias WHERE id = $1", FamilyRow::COLUMNS);
        sqlx::query_as::<_, FamilyRow>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch family")
            .map_err(AppError::database)?
            .map(Family::from)
            .ok_or_else(|| not_found("Family"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_family(
        db: &PgPool,
        id: Uuid,
        dto: UpdateFamilyDto,
    ) -> Result<Family, AppError> {
        let sql = format!(
            "UPDATE familias SET \
                nome_responsavel = COALESCE($2, nome_responsavel), \
                parentesco = COALESCE($3, parentesco), \
                email = COALESCE($4, email), \
                telefone = COALESCE($5, telefone), \
                endereco = COALESCE($6, endereco), \
                usuario_id = COALESCE($7, usuario_id), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            FamilyRow::COLUMNS
        );

        sqlx::query_as::<_, FamilyRow>(&sql)
            .bind(id)
            .bind(&dto.guardian_name)
            .bind(&dto.relationship)
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.address)
            .bind(dto.user_id)
            .fetch_optional(db)
            .await
            .map_err(|e| map_write_error(e, "Family"))?
            .map(Family::from)
            .ok_or_else(|| not_found("Family"))
    }

    /// Deletes a family. Linked students keep existing with no family.
    #[instrument(skip(db))]
    pub async fn delete_family(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM familias WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete family")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(not_found("Family"));
        }

        Ok(())
    }
}
