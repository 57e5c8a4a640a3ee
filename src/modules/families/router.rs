use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::families::controller::{
    create_family, delete_family, get_families, get_family, update_family,
};
use crate::state::AppState;

pub fn init_families_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_family).get(get_families))
        .route(
            "/{id}",
            get(get_family).put(update_family).delete(delete_family),
        )
}
