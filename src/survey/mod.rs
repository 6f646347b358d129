mod dto;
pub mod handlers;
pub mod prompt;
mod repo;
pub mod scoring;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
