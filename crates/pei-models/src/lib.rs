//! # PEI Models
//!
//! Domain models and DTOs for the PEI API.
//!
//! Each entity comes in two shapes:
//!
//! - a `*Row` struct mirroring the backend table (Portuguese column names,
//!   decoded with [`sqlx::FromRow`]);
//! - an API struct with camelCase JSON field names, built from the row with
//!   `From<Row>`.
//!
//! Create/update DTOs carry the API field names and are validated with
//! [`validator`] before the services bind them to columns.
//!
//! # Modules
//!
//! - [`agenda`]: Agenda events (`agenda_eventos`)
//! - [`auth`]: Login and permission responses
//! - [`executions`]: Acompanhamentos, logged activity sessions (`acompanhamentos`)
//! - [`families`]: Families and guardians (`familias`)
//! - [`peis`]: Individualized education plans (`peis`)
//! - [`professionals`]: Professionals (`profissionais`)
//! - [`schools`]: Schools (`escolas`)
//! - [`students`]: Students (`alunos`)
//! - [`users`]: Application users (`usuarios`)

pub mod agenda;
pub mod auth;
pub mod executions;
pub mod families;
pub mod peis;
pub mod professionals;
pub mod schools;
pub mod students;
pub mod users;

pub use agenda::{
    AgendaEvent, AgendaEventRow, AgendaFilterParams, CreateAgendaEventDto,
    PaginatedAgendaResponse, UpdateAgendaEventDto,
};
pub use auth::{LoginRequest, LoginResponse, PermissionsResponse, ProfileResponse};
pub use executions::{
    CreateExecutionDto, DisciplineRow, DisciplineSummary, Execution, ExecutionFilterParams,
    ExecutionRow, PaginatedExecutionsResponse, UpdateExecutionDto,
};
pub use families::{
    CreateFamilyDto, Family, FamilyFilterParams, FamilyRow, PaginatedFamiliesResponse,
    UpdateFamilyDto,
};
pub use peis::{
    CreatePeiDto, PaginatedPeisResponse, Pei, PeiFilterParams, PeiRow, PeiStatus, UpdatePeiDto,
};
pub use professionals::{
    CreateProfessionalDto, PaginatedProfessionalsResponse, Professional,
    ProfessionalFilterParams, ProfessionalRow, UpdateProfessionalDto,
};
pub use schools::{
    CreateSchoolDto, PaginatedSchoolsResponse, School, SchoolFilterParams, SchoolRow,
    UpdateSchoolDto,
};
pub use students::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams, StudentRow,
    UpdateStudentDto,
};
pub use users::{CreateUserDto, PaginatedUsersResponse, User, UserFilterParams, UserRow};

