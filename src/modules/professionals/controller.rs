use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use pei_core::{AppError, PaginationMeta};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{RequireManageUsers, RequireViewManagement};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::professionals::model::{
    CreateProfessionalDto, PaginatedProfessionalsResponse, Professional,
    ProfessionalFilterParams, UpdateProfessionalDto,
};
use crate::modules::professionals::service::ProfessionalService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/professionals",
    request_body = CreateProfessionalDto,
    responses(
        (status = 201, description = "Professional created", body = Professional),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canManageUsers", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Professionals"
)]
#[instrument(skip(state))]
pub async fn create_professional(
    State(state): State<AppState>,
    RequireManageUsers(auth_user): RequireManageUsers,
    ValidatedJson(dto): ValidatedJson<CreateProfessionalDto>,
) -> Result<(StatusCode, Json<Professional>), AppError> {
    let school_id = auth_user.scoped_school(dto.school_id)?;
    let professional = ProfessionalService::create_professional(&state.db, dto, school_id).await?;
    Ok((StatusCode::CREATED, Json(professional)))
}

#[utoipa::path(
    get,
    path = "/api/professionals",
    params(ProfessionalFilterParams),
    responses(
        (status = 200, description = "Paginated professionals", body = PaginatedProfessionalsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canViewManagement", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Professionals"
)]
#[instrument(skip(state))]
pub async fn get_professionals(
    State(state): State<AppState>,
    RequireViewManagement(auth_user): RequireViewManagement,
    Query(filters): Query<ProfessionalFilterParams>,
) -> Result<Json<PaginatedProfessionalsResponse>, AppError> {
    let school_id = auth_user.scoped_school(filters.school_id)?;
    let (data, total) =
        ProfessionalService::get_professionals(&state.db, school_id, &filters.pagination).await?;

    Ok(Json(PaginatedProfessionalsResponse {
        data,
        meta: PaginationMeta::new(&filters.pagination, total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/professionals/{id}",
    params(("id" = Uuid, Path, description = "Professional ID")),
    responses(
        (status = 200, description = "Professional details", body = Professional),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canViewManagement", body = ErrorResponse),
        (status = 404, description = "Professional not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Professionals"
)]
#[instrument(skip(state))]
pub async fn get_professional(
    State(state): State<AppState>,
    RequireViewManagement(auth_user): RequireViewManagement,
    Path(id): Path<Uuid>,
) -> Result<Json<Professional>, AppError> {
    let scope = auth_user.school_scope()?;
    let professional = ProfessionalService::get_professional(&state.db, id, scope).await?;
    Ok(Json(professional))
}

#[utoipa::path(
    put,
    path = "/api/professionals/{id}",
    params(("id" = Uuid, Path, description = "Professional ID")),
    request_body = UpdateProfessionalDto,
    responses(
        (status = 200, description = "Professional updated", body = Professional),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canManageUsers", body = ErrorResponse),
        (status = 404, description = "Professional not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Professionals"
)]
#[instrument(skip(state))]
pub async fn update_professional(
    State(state): State<AppState>,
    RequireManageUsers(auth_user): RequireManageUsers,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProfessionalDto>,
) -> Result<Json<Professional>, AppError> {
    let scope = auth_user.school_scope()?;
    let professional =
        ProfessionalService::update_professional(&state.db, id, scope, dto).await?;
    Ok(Json(professional))
}

#[utoipa::path(
    delete,
    path = "/api/professionals/{id}",
    params(("id" = Uuid, Path, description = "Professional ID")),
    responses(
        (status = 200, description = "Professional deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canManageUsers", body = ErrorResponse),
        (status = 404, description = "Professional not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Professionals"
)]
#[instrument(skip(state))]
pub async fn delete_professional(
    State(state): State<AppState>,
    RequireManageUsers(auth_user): RequireManageUsers,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let scope = auth_user.school_scope()?;
    ProfessionalService::delete_professional(&state.db, id, scope).await?;
    Ok(Json(json!({"message": "Professional deleted successfully"})))
}
