mod dto;
pub mod handlers;
pub mod template;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::router()
}
