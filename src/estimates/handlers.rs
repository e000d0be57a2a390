use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::jwt::{AuthUser, MaybeAuthUser},
    error::ApiError,
    state::AppState,
    storage::{MoveEstimate, NewEstimate},
};

use super::cost;
use super::dto::{
    EstimateList, MoveCalculationRequest, MoveCalculationResponse, SaveEstimateRequest,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/estimates/calculate", post(calculate))
        .route("/estimates", post(save_estimate).get(list_my_estimates))
        .route("/estimates/all", get(list_all_estimates))
}

/// Runs the cost model and persists the result. Anonymous callers are
/// allowed; their estimates carry no owner.
#[instrument(skip(state, payload))]
pub async fn calculate(
    State(state): State<AppState>,
    MaybeAuthUser(user_id): MaybeAuthUser,
    Json(payload): Json<MoveCalculationRequest>,
) -> Result<Json<MoveCalculationResponse>, ApiError> {
    let input = payload.validate().map_err(ApiError::Validation)?;
    let result = cost::estimate(&input, state.distance.as_ref(), state.availability.as_ref());

    let estimate = state
        .store
        .create_estimate(NewEstimate {
            user_id,
            origin: input.origin,
            destination: input.destination,
            distance: result.distance,
            home_size: input.home_size.as_str().to_string(),
            additional_items: input.additional_items.as_str().to_string(),
            move_date: input.move_date,
            flexibility: input.flexibility.as_str().to_string(),
            services: input.services.iter().map(|s| s.as_str().to_string()).collect(),
            cost_diy: result.costs.diy,
            cost_hybrid: result.costs.hybrid,
            cost_full_service: result.costs.full_service,
        })
        .await?;

    info!(
        estimate_id = estimate.id,
        distance = result.distance,
        "estimate calculated"
    );
    Ok(Json(MoveCalculationResponse {
        estimate_id: estimate.id,
        distance: result.distance,
        costs: result.costs,
        breakdown: result.breakdown,
        companies: result.companies,
    }))
}

#[instrument(skip(state, payload))]
pub async fn save_estimate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<SaveEstimateRequest>,
) -> Result<(StatusCode, Json<MoveEstimate>), ApiError> {
    let payload = payload.validate().map_err(ApiError::Validation)?;

    let estimate = state
        .store
        .create_estimate(NewEstimate {
            user_id: Some(user_id),
            origin: payload.origin,
            destination: payload.destination,
            distance: payload.distance,
            home_size: payload.home_size,
            additional_items: payload.additional_items,
            move_date: payload.move_date,
            flexibility: payload.flexibility,
            services: normalize_services(payload.services),
            cost_diy: payload.cost_diy,
            cost_hybrid: payload.cost_hybrid,
            cost_full_service: payload.cost_full_service,
        })
        .await?;

    info!(estimate_id = estimate.id, user_id, "estimate saved");
    Ok((StatusCode::CREATED, Json(estimate)))
}

fn normalize_services(mut services: Vec<String>) -> Vec<String> {
    services.sort();
    services.dedup();
    services
}

#[instrument(skip(state))]
pub async fn list_my_estimates(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<EstimateList>, ApiError> {
    let estimates = state.store.list_estimates_by_user(user_id).await?;
    Ok(Json(EstimateList { estimates }))
}

#[instrument(skip(state))]
pub async fn list_all_estimates(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<EstimateList>, ApiError> {
    let estimates = state.store.list_estimates().await?;
    Ok(Json(EstimateList { estimates }))
}
