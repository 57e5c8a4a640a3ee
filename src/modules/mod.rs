pub mod agenda;
pub mod auth;
pub mod executions;
pub mod families;
pub mod peis;
pub mod professionals;
pub mod schools;
pub mod students;
pub mod users;
