use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Persisted cost estimate. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoveEstimate {
    pub id: i64,
    pub user_id: Option<i64>,
    pub origin: String,
    pub destination: String,
    pub distance: i64,
    pub home_size: String,
    pub additional_items: String,
    pub move_date: String,
    pub flexibility: String,
    pub services: Vec<String>,
    pub cost_diy: i64,
    pub cost_hybrid: i64,
    pub cost_full_service: i64,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewEstimate {
    pub user_id: Option<i64>,
    pub origin: String,
    pub destination: String,
    pub distance: i64,
    pub home_size: String,
    pub additional_items: String,
    pub move_date: String,
    pub flexibility: String,
    pub services: Vec<String>,
    pub cost_diy: i64,
    pub cost_hybrid: i64,
    pub cost_full_service: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoveChecklist {
    pub id: i64,
    pub user_id: i64,
    pub estimate_id: Option<i64>,
    pub move_date: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewChecklist {
    pub user_id: i64,
    pub estimate_id: Option<i64>,
    pub move_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChecklistItem {
    pub id: i64,
    pub checklist_id: i64,
    pub task: String,
    pub description: Option<String>,
    pub category: String,
    pub timeframe: String,
    pub completed: bool,
    pub created_at: OffsetDateTime,
}

/// Item content without identity; the store attaches checklist_id and id
/// inside the atomic checklist-creation operation.
#[derive(Debug, Clone)]
pub struct ItemSeed {
    pub task: String,
    pub description: Option<String>,
    pub category: String,
    pub timeframe: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProgress {
    pub id: i64,
    pub user_id: i64,
    pub points: i64,
    pub level: i64,
    pub achievements: Vec<String>,
    pub streak: i64,
    pub last_interaction: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

/// Explicit patch for progress updates: every overridable field is named,
/// level is derived from points by the store.
#[derive(Debug, Clone)]
pub struct ProgressPatch {
    pub points: i64,
    pub achievements: Vec<String>,
    pub streak: i64,
    pub last_interaction: OffsetDateTime,
}

pub fn level_for_points(points: i64) -> i64 {
    points / 100 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_floor_of_points_over_hundred_plus_one() {
        assert_eq!(level_for_points(0), 1);
        assert_eq!(level_for_points(99), 1);
        assert_eq!(level_for_points(100), 2);
        assert_eq!(level_for_points(250), 3);
    }
}
