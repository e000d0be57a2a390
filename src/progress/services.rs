use anyhow::Context;
use time::OffsetDateTime;

use crate::storage::{MoveStore, ProgressPatch, UserProgress};

/// Progress records are created lazily on first read or write.
pub async fn ensure_progress(
    store: &dyn MoveStore,
    user_id: i64,
) -> anyhow::Result<UserProgress> {
    match store.get_progress_by_user(user_id).await? {
        Some(progress) => Ok(progress),
        None => store.create_progress(user_id).await,
    }
}

/// Adds points and recomputes the level. The streak grows by one the first
/// time the user interacts on a new calendar day.
pub async fn award_points(
    store: &dyn MoveStore,
    user_id: i64,
    points: i64,
) -> anyhow::Result<UserProgress> {
    let current = ensure_progress(store, user_id).await?;
    let now = OffsetDateTime::now_utc();
    let streak = if current.last_interaction.date() < now.date() {
        current.streak + 1
    } else {
        current.streak
    };
    store
        .update_progress(
            user_id,
            ProgressPatch {
                points: current.points + points,
                achievements: current.achievements,
                streak,
                last_interaction: now,
            },
        )
        .await?
        .context("progress record disappeared during update")
}

/// Unlocks an achievement once: a second unlock of the same id is a no-op
/// that awards no points and reports `false`.
pub async fn unlock_achievement(
    store: &dyn MoveStore,
    user_id: i64,
    achievement_id: &str,
    points: i64,
) -> anyhow::Result<(bool, UserProgress)> {
    let current = ensure_progress(store, user_id).await?;

    if current.achievements.iter().any(|a| a == achievement_id) {
        return Ok((false, current));
    }

    let mut achievements = current.achievements;
    achievements.push(achievement_id.to_string());

    let updated = store
        .update_progress(
            user_id,
            ProgressPatch {
                points: current.points + points,
                achievements,
                streak: current.streak,
                last_interaction: OffsetDateTime::now_utc(),
            },
        )
        .await?
        .context("progress record disappeared during update")?;

    Ok((true, updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn first_read_creates_a_zeroed_record() {
        let store = MemoryStore::new();
        let progress = ensure_progress(&store, 1).await.unwrap();
        assert_eq!(progress.points, 0);
        assert_eq!(progress.level, 1);
        assert!(progress.achievements.is_empty());
        assert_eq!(progress.streak, 0);

        // second read returns the same record rather than creating another
        let again = ensure_progress(&store, 1).await.unwrap();
        assert_eq!(again.id, progress.id);
    }

    #[tokio::test]
    async fn fresh_unlock_creates_progress_with_points() {
        let store = MemoryStore::new();
        let (unlocked, progress) = unlock_achievement(&store, 1, "first_estimate", 15)
            .await
            .unwrap();
        assert!(unlocked);
        assert_eq!(progress.points, 15);
        assert_eq!(progress.level, 1);
        assert_eq!(progress.achievements, vec!["first_estimate".to_string()]);
    }

    #[tokio::test]
    async fn second_unlock_is_a_noop() {
        let store = MemoryStore::new();
        unlock_achievement(&store, 1, "first_estimate", 15)
            .await
            .unwrap();
        let (unlocked, progress) = unlock_achievement(&store, 1, "first_estimate", 15)
            .await
            .unwrap();
        assert!(!unlocked);
        assert_eq!(progress.points, 15);
        assert_eq!(progress.achievements.len(), 1);
    }

    #[tokio::test]
    async fn points_accumulate_and_level_up() {
        let store = MemoryStore::new();
        award_points(&store, 2, 60).await.unwrap();
        let progress = award_points(&store, 2, 60).await.unwrap();
        assert_eq!(progress.points, 120);
        assert_eq!(progress.level, 2);
    }

    #[tokio::test]
    async fn same_day_interactions_do_not_grow_the_streak() {
        let store = MemoryStore::new();
        let first = award_points(&store, 3, 10).await.unwrap();
        let second = award_points(&store, 3, 10).await.unwrap();
        assert_eq!(second.streak, first.streak);
    }
}
