use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::peis::controller::{create_pei, delete_pei, get_pei, get_peis, update_pei};
use crate::state::AppState;

pub fn init_peis_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_pei).get(get_peis))
        .route("/{id}", get(get_pei).put(update_pei).delete(delete_pei))
}
