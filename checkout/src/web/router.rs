use axum::{Router, routing::post};
use checkout::{Transport, card::MessageCatalog};
use std::sync::Arc;

use super::{check_card::handle_check_card, config::Config};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub transport: Transport,
    pub catalog: Arc<dyn MessageCatalog>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/check_card/{charge_id}", post(handle_check_card))
        .with_state(state)
}
