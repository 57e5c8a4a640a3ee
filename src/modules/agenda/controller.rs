use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use pei_core::{AppError, PaginationMeta};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{RequireEditClasses, RequireViewStudents};
use crate::modules::agenda::model::{
    AgendaEvent, AgendaFilterParams, CreateAgendaEventDto, PaginatedAgendaResponse,
    UpdateAgendaEventDto,
};
use crate::modules::agenda::service::AgendaService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::scope::{ensure_professional_in_scope, ensure_student_in_scope};
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/agenda",
    request_body = CreateAgendaEventDto,
    responses(
        (status = 201, description = "Event scheduled", body = AgendaEvent),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canEditClasses", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Agenda"
)]
#[instrument(skip(state))]
pub async fn create_event(
    State(state): State<AppState>,
    RequireEditClasses(auth_user): RequireEditClasses,
    ValidatedJson(dto): ValidatedJson<CreateAgendaEventDto>,
) -> Result<(StatusCode, Json<AgendaEvent>), AppError> {
    let school_id = auth_user.scoped_school(dto.school_id)?;
    let scope = auth_user.school_scope()?;
    ensure_student_in_scope(&state.db, scope, dto.student_id).await?;
    ensure_professional_in_scope(&state.db, scope, dto.professional_id).await?;

    let event = AgendaService::create_event(&state.db, dto, school_id).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    get,
    path = "/api/agenda",
    params(AgendaFilterParams),
    responses(
        (status = 200, description = "Paginated events in start order", body = PaginatedAgendaResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canViewStudents", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Agenda"
)]
#[instrument(skip(state))]
pub async fn get_events(
    State(state): State<AppState>,
    RequireViewStudents(auth_user): RequireViewStudents,
    Query(filters): Query<AgendaFilterParams>,
) -> Result<Json<PaginatedAgendaResponse>, AppError> {
    let school_id = auth_user.scoped_school(filters.school_id)?;
    let (data, total) = AgendaService::get_events(&state.db, school_id, &filters).await?;

    Ok(Json(PaginatedAgendaResponse {
        data,
        meta: PaginationMeta::new(&filters.pagination, total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/agenda/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = AgendaEvent),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canViewStudents", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Agenda"
)]
#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    RequireViewStudents(auth_user): RequireViewStudents,
    Path(id): Path<Uuid>,
) -> Result<Json<AgendaEvent>, AppError> {
    let scope = auth_user.school_scope()?;
    let event = AgendaService::get_event(&state.db, id, scope).await?;
    Ok(Json(event))
}

#[utoipa::path(
    put,
    path = "/api/agenda/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = UpdateAgendaEventDto,
    responses(
        (status = 200, description = "Event updated", body = AgendaEvent),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canEditClasses", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Agenda"
)]
#[instrument(skip(state))]
pub async fn update_event(
    State(state): State<AppState>,
    RequireEditClasses(auth_user): RequireEditClasses,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAgendaEventDto>,
) -> Result<Json<AgendaEvent>, AppError> {
    let scope = auth_user.school_scope()?;
    ensure_student_in_scope(&state.db, scope, dto.student_id).await?;
    ensure_professional_in_scope(&state.db, scope, dto.professional_id).await?;
    let event = AgendaService::update_event(&state.db, id, scope, dto).await?;
    Ok(Json(event))
}

#[utoipa::path(
    delete,
    path = "/api/agenda/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canEditClasses", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Agenda"
)]
#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    RequireEditClasses(auth_user): RequireEditClasses,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let scope = auth_user.school_scope()?;
    AgendaService::delete_event(&state.db, id, scope).await?;
    Ok(Json(json!({"message": "Agenda event deleted successfully"})))
}
