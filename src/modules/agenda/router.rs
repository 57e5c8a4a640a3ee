use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::agenda::controller::{
    create_event, delete_event, get_event, get_events, update_event,
};
use crate::state::AppState;

pub fn init_agenda_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_event).get(get_events))
        .route(
            "/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}
