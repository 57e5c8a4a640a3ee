use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use pei_core::{AppError, PaginationMeta};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{RequireDeleteStudents, RequireEditStudents, RequireViewStudents};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::peis::model::{
    CreatePeiDto, PaginatedPeisResponse, Pei, PeiFilterParams, UpdatePeiDto,
};
use crate::modules::peis::service::PeiService;
use crate::state::AppState;
use crate::utils::scope::{ensure_professional_in_scope, ensure_student_in_scope};
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/peis",
    request_body = CreatePeiDto,
    responses(
        (status = 201, description = "PEI created", body = Pei),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canEditStudents", body = ErrorResponse),
        (status = 404, description = "Student not found in scope", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "PEIs"
)]
#[instrument(skip(state))]
pub async fn create_pei(
    State(state): State<AppState>,
    RequireEditStudents(auth_user): RequireEditStudents,
    ValidatedJson(dto): ValidatedJson<CreatePeiDto>,
) -> Result<(StatusCode, Json<Pei>), AppError> {
    let scope = auth_user.school_scope()?;
    ensure_student_in_scope(&state.db, scope, Some(dto.student_id)).await?;
    ensure_professional_in_scope(&state.db, scope, dto.professional_id).await?;

    let pei = PeiService::create_pei(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(pei)))
}

#[utoipa::path(
    get,
    path = "/api/peis",
    params(PeiFilterParams),
    responses(
        (status = 200, description = "Paginated PEIs, latest school year first", body = PaginatedPeisResponse),
        (status = 400, description = "Unknown status filter", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canViewStudents", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "PEIs"
)]
#[instrument(skip(state))]
pub async fn get_peis(
    State(state): State<AppState>,
    RequireViewStudents(auth_user): RequireViewStudents,
    Query(filters): Query<PeiFilterParams>,
) -> Result<Json<PaginatedPeisResponse>, AppError> {
    let scope = auth_user.school_scope()?;
    let (data, total) = PeiService::get_peis(&state.db, scope, &filters).await?;

    Ok(Json(PaginatedPeisResponse {
        data,
        meta: PaginationMeta::new(&filters.pagination, total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/peis/{id}",
    params(("id" = Uuid, Path, description = "PEI ID")),
    responses(
        (status = 200, description = "PEI details", body = Pei),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canViewStudents", body = ErrorResponse),
        (status = 404, description = "PEI not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "PEIs"
)]
#[instrument(skip(state))]
pub async fn get_pei(
    State(state): State<AppState>,
    RequireViewStudents(auth_user): RequireViewStudents,
    Path(id): Path<Uuid>,
) -> Result<Json<Pei>, AppError> {
    let scope = auth_user.school_scope()?;
    let pei = PeiService::get_pei(&state.db, id, scope).await?;
    Ok(Json(pei))
}

#[utoipa::path(
    put,
    path = "/api/peis/{id}",
    params(("id" = Uuid, Path, description = "PEI ID")),
    request_body = UpdatePeiDto,
    responses(
        (status = 200, description = "PEI updated", body = Pei),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canEditStudents", body = ErrorResponse),
        (status = 404, description = "PEI not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "PEIs"
)]
#[instrument(skip(state))]
pub async fn update_pei(
    State(state): State<AppState>,
    RequireEditStudents(auth_user): RequireEditStudents,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePeiDto>,
) -> Result<Json<Pei>, AppError> {
    let scope = auth_user.school_scope()?;
    ensure_professional_in_scope(&state.db, scope, dto.professional_id).await?;
    let pei = PeiService::update_pei(&state.db, id, scope, dto).await?;
    Ok(Json(pei))
}

#[utoipa::path(
    delete,
    path = "/api/peis/{id}",
    params(("id" = Uuid, Path, description = "PEI ID")),
    responses(
        (status = 200, description = "PEI deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canDeleteStudents", body = ErrorResponse),
        (status = 404, description = "PEI not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "PEIs"
)]
#[instrument(skip(state))]
pub async fn delete_pei(
    State(state): State<AppState>,
    RequireDeleteStudents(auth_user): RequireDeleteStudents,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let scope = auth_user.school_scope()?;
    PeiService::delete_pei(&state.db, id, scope).await?;
    Ok(Json(json!({"message": "PEI deleted successfully"})))
}
