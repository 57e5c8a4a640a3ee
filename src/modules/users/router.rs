use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::users::controller::{create_user, delete_user, get_user, get_users};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(get_users))
        .route("/{id}", get(get_user).delete(delete_user))
}
