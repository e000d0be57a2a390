use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState, storage::UserProgress};

use super::dto::{AwardPointsRequest, UnlockAchievementRequest, UnlockResponse};
use super::services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/progress", get(get_progress))
        .route("/progress/points", post(award_points))
        .route("/progress/achievements", post(unlock_achievement))
}

#[instrument(skip(state))]
pub async fn get_progress(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserProgress>, ApiError> {
    let progress = services::ensure_progress(state.store.as_ref(), user_id).await?;
    Ok(Json(progress))
}

#[instrument(skip(state, payload))]
pub async fn award_points(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AwardPointsRequest>,
) -> Result<Json<UserProgress>, ApiError> {
    if payload.points < 0 {
        return Err(ApiError::validation("points", "must be non-negative"));
    }
    let progress = services::award_points(state.store.as_ref(), user_id, payload.points).await?;
    info!(user_id, points = payload.points, total = progress.points, "points awarded");
    Ok(Json(progress))
}

#[instrument(skip(state, payload))]
pub async fn unlock_achievement(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UnlockAchievementRequest>,
) -> Result<Json<UnlockResponse>, ApiError> {
    if payload.achievement_id.trim().is_empty() {
        return Err(ApiError::validation("achievement_id", "is required"));
    }
    if payload.points < 0 {
        return Err(ApiError::validation("points", "must be non-negative"));
    }

    let (unlocked, progress) = services::unlock_achievement(
        state.store.as_ref(),
        user_id,
        payload.achievement_id.trim(),
        payload.points,
    )
    .await?;

    info!(
        user_id,
        achievement = %payload.achievement_id,
        unlocked,
        "achievement unlock requested"
    );
    Ok(Json(UnlockResponse { unlocked, progress }))
}
