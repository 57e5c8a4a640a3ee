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
use crate::modules::families::model::{
    CreateFamilyDto, Family, FamilyFilterParams, PaginatedFamiliesResponse, UpdateFamilyDto,
};
use crate::modules::families::service::FamilyService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/families",
    request_body = CreateFamilyDto,
    responses(
        (status = 201, description = "Family created", body = Family),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canManageUsers", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Families"
)]
#[instrument(skip(state))]
pub async fn create_family(
    State(state): State<AppState>,
    RequireManageUsers(_auth_user): RequireManageUsers,
    ValidatedJson(dto): ValidatedJson<CreateFamilyDto>,
) -> Result<(StatusCode, Json<Family>), AppError> {
    let family = FamilyService::create_family(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(family)))
}

#[utoipa::path(
    get,
    path = "/api/families",
    params(FamilyFilterParams),
    responses(
        (status = 200, description = "Paginated families", body = PaginatedFamiliesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canViewManagement", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Families"
)]
#[instrument(skip(state))]
pub async fn get_families(
    State(state): State<AppState>,
    RequireViewManagement(_auth_user): RequireViewManagement,
    Query(filters): Query<FamilyFilterParams>,
) -> Result<Json<PaginatedFamiliesResponse>, AppError> {
    let (data, total) = FamilyService::get_families(&state.db, &filters.pagination).await?;

    Ok(Json(PaginatedFamiliesResponse {
        data,
        meta: PaginationMeta::new(&filters.pagination, total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/families/{id}",
    params(("id" = Uuid, Path, description = "Family ID")),
    responses(
        (status = 200, description = "Family details", body = Family),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canViewManagement", body = ErrorResponse),
        (status = 404, description = "Family not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Families"
)]
#[instrument(skip(state))]
pub async fn get_family(
    State(state): State<AppState>,
    RequireViewManagement(_auth_user): RequireViewManagement,
    Path(id): Path<Uuid>,
) -> Result<Json<Family>, AppError> {
    let family = FamilyService::get_family(&state.db, id).await?;
    Ok(Json(family))
}

#[utoipa::path(
    put,
    path = "/api/families/{id}",
    params(("id" = Uuid, Path, description = "Family ID")),
    request_body = UpdateFamilyDto,
    responses(
        (status = 200, description = "Family updated", body = Family),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canManageUsers", body = ErrorResponse),
        (status = 404, description = "Family not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Families"
)]
#[instrument(skip(state))]
pub async fn update_family(
    State(state): State<AppState>,
    RequireManageUsers(_auth_user): RequireManageUsers,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateFamilyDto>,
) -> Result<Json<Family>, AppError> {
    let family = FamilyService::update_family(&state.db, id, dto).await?;
    Ok(Json(family))
}

#[utoipa::path(
    delete,
    path = "/api/families/{id}",
    params(("id" = Uuid, Path, description = "Family ID")),
    responses(
        (status = 200, description = "Family deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canManageUsers", body = ErrorResponse),
        (status = 404, description = "Family not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Families"
)]
#[instrument(skip(state))]
pub async fn delete_family(
    State(state): State<AppState>,
    RequireManageUsers(_auth_user): RequireManageUsers,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    FamilyService::delete_family(&state.db, id).await?;
    Ok(Json(json!({"message": "Family deleted successfully"})))
}
