use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::auth::controller::{get_permissions, get_profile, login_user};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/me", get(get_profile))
        .route("/permissions", get(get_permissions))
}
