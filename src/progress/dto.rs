use serde::{Deserialize, Serialize};

use crate::storage::UserProgress;

#[derive(Debug, Deserialize)]
pub struct AwardPointsRequest {
    pub points: i64,
}

/// Point values arrive from the client and are not checked against a
/// server-side achievement catalog; the client shell is trusted with its
/// own point values.
#[derive(Debug, Deserialize)]
pub struct UnlockAchievementRequest {
    pub achievement_id: String,
    pub points: i64,
}

#[derive(Debug, Serialize)]
pub struct UnlockResponse {
    pub unlocked: bool,
    pub progress: UserProgress,
}
