use anyhow::Context;
use pei_core::{AppError, hash_password};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{CreateUserDto, User, UserFilterParams, UserRow};
use crate::utils::db::{map_write_error, not_found};

pub struct UserService;

impl UserService {
    #[instrument(skip(db, dto), fields(email = %dto.email, role = %dto.role))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let senha_hash = hash_password(&dto.password)?;
        let sql = format!(
            "INSERT INTO usuarios (nome, email, senha_hash, perfil, escola_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            UserRow::COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(&senha_hash)
            .bind(&dto.role)
            .bind(dto.school_id)
            .fetch_one(db)
            .await
            .map_err(|e| map_write_error(e, "User"))?;

        Ok(row.into())
    }

    #[instrument(skip(db))]
    pub async fn get_users(
        db: &PgPool,
        filters: &UserFilterParams,
    ) -> Result<(Vec<User>, i64), AppError> {
        const CONDITIONS: &str =
            "($1::text IS NULL OR perfil = $1) AND ($2::uuid IS NULL OR escola_id = $2)";

        let sql = format!(
            "SELECT {} FROM usuarios WHERE {CONDITIONS} ORDER BY nome LIMIT $3 OFFSET $4",
            UserRow::COLUMNS
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&filters.role)
            .bind(filters.school_id)
            .bind(filters.pagination.limit())
            .bind(filters.pagination.offset())
            .fetch_all(db)
            .await
            .context("Failed to fetch users")
            .map_err(AppError::database)?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM usuarios WHERE {CONDITIONS}"))
                .bind(&filters.role)
                .bind(filters.school_id)
                .fetch_one(db)
                .await
                .context("Failed to count users")
                .map_err(AppError::database)?;

        Ok((rows.into_iter().map(User::from).collect(), total))
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let sql = format!("SELECT {} FROM usuarios WHERE id = $1", UserRow::COLUMNS);
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch user")
            .map_err(AppError::database)?
            .map(User::from)
            .ok_or_else(|| not_found("User"))
    }

    /// Row lookup including the password hash, for login.
    #[instrument(skip(db))]
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<UserRow>, AppError> {
        let sql = format!("SELECT {} FROM usuarios WHERE email = $1", UserRow::COLUMNS);
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(db)
            .await
            .context("Failed to fetch user by email")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete user")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(not_found("User"));
        }

        Ok(())
    }
}
