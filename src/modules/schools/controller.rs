use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use pei_core::{AppError, PaginationMeta};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{AuthUser, RequireViewAllSchools};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::schools::model::{
    CreateSchoolDto, PaginatedSchoolsResponse, School, SchoolFilterParams, UpdateSchoolDto,
};
use crate::modules::schools::service::SchoolService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/schools",
    request_body = CreateSchoolDto,
    responses(
        (status = 201, description = "School created", body = School),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canViewAllSchools", body = ErrorResponse),
        (status = 409, description = "School name already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schools"
)]
#[instrument(skip(state))]
pub async fn create_school(
    State(state): State<AppState>,
    RequireViewAllSchools(_auth_user): RequireViewAllSchools,
    ValidatedJson(dto): ValidatedJson<CreateSchoolDto>,
) -> Result<(StatusCode, Json<School>), AppError> {
    let school = SchoolService::create_school(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(school)))
}

/// List schools
///
/// Callers without canViewAllSchools only see their own school.
#[utoipa::path(
    get,
    path = "/api/schools",
    params(SchoolFilterParams),
    responses(
        (status = 200, description = "Paginated schools", body = PaginatedSchoolsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "No school assigned", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schools"
)]
#[instrument(skip(state))]
pub async fn get_schools(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(filters): Query<SchoolFilterParams>,
) -> Result<Json<PaginatedSchoolsResponse>, AppError> {
    let scope = auth_user.school_scope()?;
    let (data, total) = SchoolService::get_schools(&state.db, scope, &filters.pagination).await?;

    Ok(Json(PaginatedSchoolsResponse {
        data,
        meta: PaginationMeta::new(&filters.pagination, total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/schools/{id}",
    params(("id" = Uuid, Path, description = "School ID")),
    responses(
        (status = 200, description = "School details", body = School),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "School outside of the caller's scope", body = ErrorResponse),
        (status = 404, description = "School not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schools"
)]
#[instrument(skip(state))]
pub async fn get_school(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<School>, AppError> {
    if let Some(own) = auth_user.school_scope()? {
        if own != id {
            return Err(AppError::forbidden(
                "Access denied. School outside of your scope",
            ));
        }
    }

    let school = SchoolService::get_school(&state.db, id).await?;
    Ok(Json(school))
}

#[utoipa::path(
    put,
    path = "/api/schools/{id}",
    params(("id" = Uuid, Path, description = "School ID")),
    request_body = UpdateSchoolDto,
    responses(
        (status = 200, description = "School updated", body = School),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canViewAllSchools", body = ErrorResponse),
        (status = 404, description = "School not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schools"
)]
#[instrument(skip(state))]
pub async fn update_school(
    State(state): State<AppState>,
    RequireViewAllSchools(_auth_user): RequireViewAllSchools,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateSchoolDto>,
) -> Result<Json<School>, AppError> {
    let school = SchoolService::update_school(&state.db, id, dto).await?;
    Ok(Json(school))
}

#[utoipa::path(
    delete,
    path = "/api/schools/{id}",
    params(("id" = Uuid, Path, description = "School ID")),
    responses(
        (status = 200, description = "School deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Missing canViewAllSchools", body = ErrorResponse),
        (status = 404, description = "School not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schools"
)]
#[instrument(skip(state))]
pub async fn delete_school(
    State(state): State<AppState>,
    RequireViewAllSchools(_auth_user): RequireViewAllSchools,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    SchoolService::delete_school(&state.db, id).await?;
    Ok(Json(json!({"message": "School deleted successfully"})))
}
