use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::executions::controller::{
    create_execution, delete_execution, get_disciplines, get_execution, get_executions,
    update_execution,
};
use crate::state::AppState;

pub fn init_executions_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_execution).get(get_executions))
        .route("/disciplines", get(get_disciplines))
        .route(
            "/{id}",
            get(get_execution)
                .put(update_execution)
                .delete(delete_execution),
        )
}
