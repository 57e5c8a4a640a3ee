use anyhow::{Context, anyhow};
use pei_core::AppError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::agenda::model::{
    AgendaEvent, AgendaEventRow, AgendaFilterParams, CreateAgendaEventDto, UpdateAgendaEventDto,
};
use crate::utils::db::{map_write_error, not_found};

pub struct AgendaService;

impl AgendaService {
    #[instrument(skip(db, dto))]
    pub async fn create_event(
        db: &PgPool,
        dto: CreateAgendaEventDto,
        school_id: Option<Uuid>,
    ) -> Result<AgendaEvent, AppError> {
        let sql = format!(
            "INSERT INTO agenda_eventos (titulo, descricao, inicio, fim, aluno_id, \
             profissional_id, escola_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            AgendaEventRow::COLUMNS
        );

        let row = sqlx::query_as::<_, AgendaEventRow>(&sql)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(dto.starts_at)
            .bind(dto.ends_at)
            .bind(dto.student_id)
            .bind(dto.professional_id)
            .bind(school_id)
            .fetch_one(db)
            .await
            .map_err(|e| map_write_error(e, "Agenda event"))?;

        Ok(row.into())
    }

    #[instrument(skip(db))]
    pub async fn get_events(
        db: &PgPool,
        school_id: Option<Uuid>,
        filters: &AgendaFilterParams,
    ) -> Result<(Vec<AgendaEvent>, i64), AppError> {
        const CONDITIONS: &str = "($1::uuid IS NULL OR escola_id = $1) \
             AND ($2::uuid IS NULL OR aluno_id = $2)";

        let sql = format!(
            "SELECT {} FROM agenda_eventos WHERE {CONDITIONS} \
             ORDER BY inicio ASC LIMIT $3 OFFSET $4",
            AgendaEventRow::COLUMNS
        );
        let rows = sqlx::query_as::<_, AgendaEventRow>(&sql)
            .bind(school_id)
            .bind(filters.student_id)
            .bind(filters.pagination.limit())
            .bind(filters.pagination.offset())
            .fetch_all(db)
            .await
            .context("Failed to fetch agenda events")
            .map_err(AppError::database)?;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM agenda_eventos WHERE {CONDITIONS}"
        ))
        .bind(school_id)
        .bind(filters.student_id)
        .fetch_one(db)
        .await
        .context("Failed to count agenda events")
        .map_err(AppError::database)?;

        Ok((rows.into_iter().map(AgendaEvent::from).collect(), total))
    }

    #[instrument(skip(db))]
    pub async fn get_event(
        db: &PgPool,
        id: Uuid,
        scope: Option<Uuid>,
    ) -> Result<AgendaEvent, AppError> {
        let sql = format!(
            "SELECT {} FROM agenda_eventos WHERE id = $1 AND ($2::uuid IS NULL OR escola_id = $2)",
            AgendaEventRow::COLUMNS
        );
        sqlx::query_as::<_, AgendaEventRow>(&sql)
            .bind(id)
            .bind(scope)
            .fetch_optional(db)
            .await
            .context("Failed to fetch agenda event")
            .map_err(AppError::database)?
            .map(AgendaEvent::from)
            .ok_or_else(|| not_found("Agenda event"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_event(
        db: &PgPool,
        id: Uuid,
        scope: Option<Uuid>,
        dto: UpdateAgendaEventDto,
    ) -> Result<AgendaEvent, AppError> {
        let current = Self::get_event(db, id, scope).await?;
        let starts_at = dto.starts_at.unwrap_or(current.starts_at);
        if let Some(ends_at) = dto.ends_at.or(current.ends_at) {
            if ends_at < starts_at {
                return Err(AppError::unprocessable(anyhow!(
                    "Event cannot end before it starts"
                )));
            }
        }

        let sql = format!(
            "UPDATE agenda_eventos SET \
                titulo = COALESCE($3, titulo), \
                descricao = COALESCE($4, descricao), \
                inicio = COALESCE($5, inicio), \
                fim = COALESCE($6, fim), \
                aluno_id = COALESCE($7, aluno_id), \
                profissional_id = COALESCE($8, profissional_id), \
                updated_at = NOW() \
             WHERE id = $1 AND ($2::uuid IS NULL OR escola_id = $2) \
             RETURNING {}",
            AgendaEventRow::COLUMNS
        );

        sqlx::query_as::<_, AgendaEventRow>(&sql)
            .bind(id)
            .bind(scope)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(dto.starts_at)
            .bind(dto.ends_at)
            .bind(dto.student_id)
            .bind(dto.professional_id)
            .fetch_optional(db)
            .await
            .map_err(|e| map_write_error(e, "Agenda event"))?
            .map(AgendaEvent::from)
            .ok_or_else(|| not_found("Agenda event"))
    }

    #[instrument(skip(db))]
    pub async fn delete_event(db: &PgPool, id: Uuid, scope: Option<Uuid>) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM agenda_eventos WHERE id = $1 AND ($2::uuid IS NULL OR escola_id = $2)",
        )
        .bind(id)
        .bind(scope)
        .execute(db)
        .await
        .context("Failed to delete agenda event")
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(not_found("Agenda event"));
        }

        Ok(())
    }
}
