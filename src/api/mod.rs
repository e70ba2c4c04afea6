pub mod commands;
pub mod error;
pub mod patch;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::db::RepoProvider;

pub use error::{ApiError, ApiResult};

pub const COMMANDS_ROUTE: &str = "/api/commands";

#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepoProvider>,
}

impl AppState {
    pub fn new(repos: Arc<dyn RepoProvider>) -> Self {
        AppState { repos }
    }
}

/// Route a client can follow to fetch the command with this id.
pub fn command_location(id: i64) -> String {
    format!("{}/{}", COMMANDS_ROUTE, id)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            COMMANDS_ROUTE,
            get(commands::get_all_commands).post(commands::create_command),
        )
        .route(
            "/api/commands/{id}",
            get(commands::get_command_by_id)
                .put(commands::update_command)
                .patch(commands::partial_command_update)
                .delete(commands::delete_command),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
