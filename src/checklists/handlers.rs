use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    state::AppState,
    storage::{ChecklistItem, MoveChecklist, NewChecklist},
};

use super::dto::{ChecklistResponse, CreateChecklistRequest, ToggleItemRequest};
use super::template;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checklists", post(create_checklist).get(list_my_checklists))
        .route("/checklists/:id", get(get_checklist))
        .route("/checklists/by-estimate/:estimate_id", get(get_checklist_by_estimate))
        .route("/checklists/items/:id", patch(toggle_item))
}

/// Persists the checklist row and its 18 template items as one atomic
/// storage operation.
#[instrument(skip(state, payload))]
pub async fn create_checklist(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateChecklistRequest>,
) -> Result<(StatusCode, Json<ChecklistResponse>), ApiError> {
    if payload.move_date.trim().is_empty() {
        return Err(ApiError::validation("move_date", "is required"));
    }

    // A linked estimate must exist and must not belong to someone else.
    // Ownership mismatch collapses to not-found.
    if let Some(estimate_id) = payload.estimate_id {
        let estimate = state
            .store
            .get_estimate(estimate_id)
            .await?
            .ok_or(ApiError::NotFound("estimate"))?;
        if estimate.user_id.is_some_and(|owner| owner != user_id) {
            return Err(ApiError::NotFound("estimate"));
        }
    }

    let (checklist, items) = state
        .store
        .create_checklist_with_items(
            NewChecklist {
                user_id,
                estimate_id: payload.estimate_id,
                move_date: payload.move_date.trim().to_string(),
            },
            template::item_seeds(),
        )
        .await?;

    info!(checklist_id = checklist.id, user_id, items = items.len(), "checklist created");
    Ok((
        StatusCode::CREATED,
        Json(ChecklistResponse { checklist, items }),
    ))
}

#[instrument(skip(state))]
pub async fn list_my_checklists(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<MoveChecklist>>, ApiError> {
    let checklists = state.store.list_checklists_by_user(user_id).await?;
    Ok(Json(checklists))
}

#[instrument(skip(state))]
pub async fn get_checklist(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ChecklistResponse>, ApiError> {
    let checklist = state
        .store
        .get_checklist(id)
        .await?
        .ok_or(ApiError::NotFound("checklist"))?;
    owned_response(&state, user_id, checklist).await
}

#[instrument(skip(state))]
pub async fn get_checklist_by_estimate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(estimate_id): Path<i64>,
) -> Result<Json<ChecklistResponse>, ApiError> {
    let checklist = state
        .store
        .find_checklist_by_estimate(estimate_id)
        .await?
        .ok_or(ApiError::NotFound("checklist"))?;
    owned_response(&state, user_id, checklist).await
}

async fn owned_response(
    state: &AppState,
    user_id: i64,
    checklist: MoveChecklist,
) -> Result<Json<ChecklistResponse>, ApiError> {
    if checklist.user_id != user_id {
        return Err(ApiError::NotFound("checklist"));
    }
    let items = state.store.list_items_by_checklist(checklist.id).await?;
    Ok(Json(ChecklistResponse { checklist, items }))
}

#[instrument(skip(state, payload))]
pub async fn toggle_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<ToggleItemRequest>,
) -> Result<Json<ChecklistItem>, ApiError> {
    let item = state
        .store
        .get_item(id)
        .await?
        .ok_or(ApiError::NotFound("checklist item"))?;

    let checklist = state
        .store
        .get_checklist(item.checklist_id)
        .await?
        .ok_or(ApiError::NotFound("checklist item"))?;
    if checklist.user_id != user_id {
        return Err(ApiError::NotFound("checklist item"));
    }

    let updated = state
        .store
        .set_item_completed(id, payload.completed)
        .await?
        .ok_or(ApiError::NotFound("checklist item"))?;

    info!(item_id = id, completed = payload.completed, "checklist item toggled");
    Ok(Json(updated))
}
