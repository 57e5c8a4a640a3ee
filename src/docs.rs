use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use pei_core::{PaginationMeta, PaginationParams, PermissionSet};

use crate::modules::agenda::model::{
    AgendaEvent, AgendaFilterParams, CreateAgendaEventDto, PaginatedAgendaResponse,
    UpdateAgendaEventDto,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, LoginResponse, PermissionsResponse, ProfileResponse,
};
use crate::modules::executions::model::{
    CreateExecutionDto, DisciplineSummary, Execution, ExecutionFilterParams,
    PaginatedExecutionsResponse, UpdateExecutionDto,
};
use crate::modules::families::model::{
    CreateFamilyDto, Family, FamilyFilterParams, PaginatedFamiliesResponse, UpdateFamilyDto,
};
use crate::modules::peis::model::{
    CreatePeiDto, PaginatedPeisResponse, Pei, PeiFilterParams, PeiStatus, UpdatePeiDto,
};
use crate::modules::professionals::model::{
    CreateProfessionalDto, PaginatedProfessionalsResponse, Professional, ProfessionalFilterParams,
    UpdateProfessionalDto,
};
use crate::modules::schools::model::{
    CreateSchoolDto, PaginatedSchoolsResponse, School, SchoolFilterParams, UpdateSchoolDto,
};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams, UpdateStudentDto,
};
use crate::modules::users::model::{CreateUserDto, PaginatedUsersResponse, User, UserFilterParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_profile,
        crate::modules::auth::controller::get_permissions,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::delete_user,
        crate::modules::schools::controller::create_school,
        crate::modules::schools::controller::get_schools,
        crate::modules::schools::controller::get_school,
        crate::modules::schools::controller::update_school,
        crate::modules::schools::controller::delete_school,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::professionals::controller::create_professional,
        crate::modules::professionals::controller::get_professionals,
        crate::modules::professionals::controller::get_professional,
        crate::modules::professionals::controller::update_professional,
        crate::modules::professionals::controller::delete_professional,
        crate::modules::families::controller::create_family,
        crate::modules::families::controller::get_families,
        crate::modules::families::controller::get_family,
        crate::modules::families::controller::update_family,
        crate::modules::families::controller::delete_family,
        crate::modules::executions::controller::create_execution,
        crate::modules::executions::controller::get_executions,
        crate::modules::executions::controller::get_disciplines,
        crate::modules::executions::controller::get_execution,
        crate::modules::executions::controller::update_execution,
        crate::modules::executions::controller::delete_execution,
        crate::modules::peis::controller::create_pei,
        crate::modules::peis::controller::get_peis,
        crate::modules::peis::controller::get_pei,
        crate::modules::peis::controller::update_pei,
        crate::modules::peis::controller::delete_pei,
        crate::modules::agenda::controller::create_event,
        crate::modules::agenda::controller::get_events,
        crate::modules::agenda::controller::get_event,
        crate::modules::agenda::controller::update_event,
        crate::modules::agenda::controller::delete_event,
    ),
    components(
        schemas(
            ErrorResponse,
            PermissionSet,
            PaginationMeta,
            PaginationParams,
            LoginRequest,
            LoginResponse,
            PermissionsResponse,
            ProfileResponse,
            User,
            CreateUserDto,
            UserFilterParams,
            PaginatedUsersResponse,
            School,
            CreateSchoolDto,
            UpdateSchoolDto,
            SchoolFilterParams,
            PaginatedSchoolsResponse,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            StudentFilterParams,
            PaginatedStudentsResponse,
            Professional,
            CreateProfessionalDto,
            UpdateProfessionalDto,
            ProfessionalFilterParams,
            PaginatedProfessionalsResponse,
            Family,
            CreateFamilyDto,
            UpdateFamilyDto,
            FamilyFilterParams,
            PaginatedFamiliesResponse,
            Execution,
            CreateExecutionDto,
            UpdateExecutionDto,
            ExecutionFilterParams,
            PaginatedExecutionsResponse,
            DisciplineSummary,
            Pei,
            PeiStatus,
            CreatePeiDto,
            UpdatePeiDto,
            PeiFilterParams,
            PaginatedPeisResponse,
            AgendaEvent,
            CreateAgendaEventDto,
            UpdateAgendaEventDto,
            AgendaFilterParams,
            PaginatedAgendaResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, profile and capability lookup"),
        (name = "Users", description = "Account management"),
        (name = "Schools", description = "School management"),
        (name = "Students", description = "Student records"),
        (name = "Professionals", description = "Teaching and support staff"),
        (name = "Families", description = "Student guardians"),
        (name = "Executions", description = "Logged activity sessions and disciplines"),
        (name = "PEIs", description = "Individualized education plans"),
        (name = "Agenda", description = "Scheduled events")
    ),
    info(
        title = "PEI API",
        version = "0.1.0",
        description = "REST API for managing individualized education plans, built with Rust, Axum, and PostgreSQL. Access is governed by role-derived capability sets.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_registers_bearer_auth() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("PermissionSet"));
    }

    #[test]
    fn test_openapi_lists_permission_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/auth/permissions"));
        assert!(doc.paths.paths.contains_key("/api/executions/disciplines"));
    }
}
