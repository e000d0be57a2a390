use serde::{Deserialize, Serialize};

use crate::storage::{ChecklistItem, MoveChecklist};

#[derive(Debug, Deserialize)]
pub struct CreateChecklistRequest {
    pub move_date: String,
    #[serde(default)]
    pub estimate_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleItemRequest {
    pub completed: bool,
}

/// A checklist always travels with its items.
#[derive(Debug, Serialize)]
pub struct ChecklistResponse {
    pub checklist: MoveChecklist,
    pub items: Vec<ChecklistItem>,
}
