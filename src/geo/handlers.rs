use axum::{
    extract::Query,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::state::AppState;

use super::grid::{cost_grid, CityCost};

pub fn router() -> Router<AppState> {
    Router::new().route("/geo/cost-grid", get(get_cost_grid))
}

#[derive(Debug, Deserialize)]
pub struct GridQuery {
    pub origin: Option<String>,
    pub home_size: Option<String>,
}

#[instrument]
pub async fn get_cost_grid(Query(query): Query<GridQuery>) -> Json<Vec<CityCost>> {
    let origin = query.origin.as_deref().unwrap_or("New York, NY");
    let home_size = query.home_size.as_deref().unwrap_or("2bedroom");
    Json(cost_grid(origin, home_size))
}
