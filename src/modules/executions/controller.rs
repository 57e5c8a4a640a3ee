use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use pei_core::{AppError, PaginationMeta};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{RequireEditClasses, RequireViewDisciplines, RequireViewReports};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::executions::model::{
    CreateExecutionDto, DisciplineSummary, Execution, ExecutionFilterParams,
    PaginatedExecutionsResponse, UpdateExecutionDto,
};
use crate::modules::executions::service::ExecutionService;
use crate::state::AppState;
use crate::utils::scope::{ensure_professional_in_scope, ensure_student_in_scope};
use crate::validator::ValidatedJson;

/// Log an execution for a student
#[utoipa::path(
    post,
    path = "/api/executions",
    request_body = CreateExecutionDto,
    responses(
        (status = 201, description = "Execution logged", body = Execution),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canEditClasses", body = ErrorResponse),
        (status = 404, description = "Student not found in scope", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Executions"
)]
#[instrument(skip(state))]
pub async fn create_execution(
    State(state): State<AppState>,
    RequireEditClasses(auth_user): RequireEditClasses,
    ValidatedJson(dto): ValidatedJson<CreateExecutionDto>,
) -> Result<(StatusCode, Json<Execution>), AppError> {
    let scope = auth_user.school_scope()?;
    ensure_student_in_scope(&state.db, scope, Some(dto.student_id)).await?;
    ensure_professional_in_scope(&state.db, scope, dto.professional_id).await?;

    let execution = ExecutionService::create_execution(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(execution)))
}

#[utoipa::path(
    get,
    path = "/api/executions",
    params(ExecutionFilterParams),
    responses(
        (status = 200, description = "Paginated executions, newest first", body = PaginatedExecutionsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canViewReports", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Executions"
)]
#[instrument(skip(state))]
pub async fn get_executions(
    State(state): State<AppState>,
    RequireViewReports(auth_user): RequireViewReports,
    Query(filters): Query<ExecutionFilterParams>,
) -> Result<Json<PaginatedExecutionsResponse>, AppError> {
    let scope = auth_user.school_scope()?;
    let (data, total) = ExecutionService::get_executions(&state.db, scope, &filters).await?;

    Ok(Json(PaginatedExecutionsResponse {
        data,
        meta: PaginationMeta::new(&filters.pagination, total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/executions/disciplines",
    responses(
        (status = 200, description = "Disciplines with execution counts", body = Vec<DisciplineSummary>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canViewDisciplines", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Executions"
)]
#[instrument(skip(state))]
pub async fn get_disciplines(
    State(state): State<AppState>,
    RequireViewDisciplines(auth_user): RequireViewDisciplines,
) -> Result<Json<Vec<DisciplineSummary>>, AppError> {
    let scope = auth_user.school_scope()?;
    let disciplines = ExecutionService::get_disciplines(&state.db, scope).await?;
    Ok(Json(disciplines))
}

#[utoipa::path(
    get,
    path = "/api/executions/{id}",
    params(("id" = Uuid, Path, description = "Execution ID")),
    responses(
        (status = 200, description = "Execution details", body = Execution),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canViewReports", body = ErrorResponse),
        (status = 404, description = "Execution not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Executions"
)]
#[instrument(skip(state))]
pub async fn get_execution(
    State(state): State<AppState>,
    RequireViewReports(auth_user): RequireViewReports,
    Path(id): Path<Uuid>,
) -> Result<Json<Execution>, AppError> {
    let scope = auth_user.school_scope()?;
    let execution = ExecutionService::get_execution(&state.db, id, scope).await?;
    Ok(Json(execution))
}

#[utoipa::path(
    put,
    path = "/api/executions/{id}",
    params(("id" = Uuid, Path, description = "Execution ID")),
    request_body = UpdateExecutionDto,
    responses(
        (status = 200, description = "Execution updated", body = Execution),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canEditClasses", body = ErrorResponse),
        (status = 404, description = "Execution not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Executions"
)]
#[instrument(skip(state))]
pub async fn update_execution(
    State(state): State<AppState>,
    RequireEditClasses(auth_user): RequireEditClasses,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateExecutionDto>,
) -> Result<Json<Execution>, AppError> {
    let scope = auth_user.school_scope()?;
    ensure_professional_in_scope(&state.db, scope, dto.professional_id).await?;
    let execution = ExecutionService::update_execution(&state.db, id, scope, dto).await?;
    Ok(Json(execution))
}

#[utoipa::path(
    delete,
    path = "/api/executions/{id}",
    params(("id" = Uuid, Path, description = "Execution ID")),
    responses(
        (status = 200, description = "Execution deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canEditClasses", body = ErrorResponse),
        (status = 404, description = "Execution not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Executions"
)]
#[instrument(skip(state))]
pub async fn delete_execution(
    State(state): State<AppState>,
    RequireEditClasses(auth_user): RequireEditClasses,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let scope = auth_user.school_scope()?;
    ExecutionService::delete_execution(&state.db, id, scope).await?;
    Ok(Json(json!({"message": "Execution deleted successfully"})))
}
