use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::professionals::controller::{
    create_professional, delete_professional, get_professional, get_professionals,
    update_professional,
};
use crate::state::AppState;

pub fn init_professionals_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_professional).get(get_professionals))
        .route(
            "/{id}",
            get(get_professional)
                .put(update_professional)
                .delete(delete_professional),
        )
}
