use axum::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use super::types::{
    level_for_points, ChecklistItem, ItemSeed, MoveChecklist, MoveEstimate, NewChecklist,
    NewEstimate, ProgressPatch, User, UserProgress,
};
use super::MoveStore;

/// Durable store delegating each operation to relational table statements.
/// Checklist creation wraps the row and its items in one transaction.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MoveStore for PgStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_user(&self, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_estimate(&self, new: NewEstimate) -> anyhow::Result<MoveEstimate> {
        let estimate = sqlx::query_as::<_, MoveEstimate>(
            r#"
            INSERT INTO move_estimates
                (user_id, origin, destination, distance, home_size, additional_items,
                 move_date, flexibility, services, cost_diy, cost_hybrid, cost_full_service)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, user_id, origin, destination, distance, home_size,
                      additional_items, move_date, flexibility, services,
                      cost_diy, cost_hybrid, cost_full_service, created_at
            "#,
        )
        .bind(new.user_id)
        .bind(&new.origin)
        .bind(&new.destination)
        .bind(new.distance)
        .bind(&new.home_size)
        .bind(&new.additional_items)
        .bind(&new.move_date)
        .bind(&new.flexibility)
        .bind(&new.services)
        .bind(new.cost_diy)
        .bind(new.cost_hybrid)
        .bind(new.cost_full_service)
        .fetch_one(&self.pool)
        .await?;
        Ok(estimate)
    }

    async fn get_estimate(&self, id: i64) -> anyhow::Result<Option<MoveEstimate>> {
        let estimate = sqlx::query_as::<_, MoveEstimate>(
            r#"
            SELECT id, user_id, origin, destination, distance, home_size,
                   additional_items, move_date, flexibility, services,
                   cost_diy, cost_hybrid, cost_full_service, created_at
            FROM move_estimates
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(estimate)
    }

    async fn list_estimates_by_user(&self, user_id: i64) -> anyhow::Result<Vec<MoveEstimate>> {
        let rows = sqlx::query_as::<_, MoveEstimate>(
            r#"
            SELECT id, user_id, origin, destination, distance, home_size,
                   additional_items, move_date, flexibility, services,
                   cost_diy, cost_hybrid, cost_full_service, created_at
            FROM move_estimates
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_estimates(&self) -> anyhow::Result<Vec<MoveEstimate>> {
        let rows = sqlx::query_as::<_, MoveEstimate>(
            r#"
            SELECT id, user_id, origin, destination, distance, home_size,
                   additional_items, move_date, flexibility, services,
                   cost_diy, cost_hybrid, cost_full_service, created_at
            FROM move_estimates
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_checklist_with_items(
        &self,
        new: NewChecklist,
        items: Vec<ItemSeed>,
    ) -> anyhow::Result<(MoveChecklist, Vec<ChecklistItem>)> {
        let mut tx = self.pool.begin().await?;

        let checklist = sqlx::query_as::<_, MoveChecklist>(
            r#"
            INSERT INTO move_checklists (user_id, estimate_id, move_date)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, estimate_id, move_date, created_at
            "#,
        )
        .bind(new.user_id)
        .bind(new.estimate_id)
        .bind(&new.move_date)
        .fetch_one(&mut *tx)
        .await?;

        let mut created = Vec::with_capacity(items.len());
        for seed in items {
            let item = sqlx::query_as::<_, ChecklistItem>(
                r#"
                INSERT INTO checklist_items
                    (checklist_id, task, description, category, timeframe, completed)
                VALUES ($1, $2, $3, $4, $5, false)
                RETURNING id, checklist_id, task, description, category, timeframe,
                          completed, created_at
                "#,
            )
            .bind(checklist.id)
            .bind(&seed.task)
            .bind(&seed.description)
            .bind(&seed.category)
            .bind(&seed.timeframe)
            .fetch_one(&mut *tx)
            .await?;
            created.push(item);
        }

        tx.commit().await?;
        Ok((checklist, created))
    }

    async fn get_checklist(&self, id: i64) -> anyhow::Result<Option<MoveChecklist>> {
        let checklist = sqlx::query_as::<_, MoveChecklist>(
            r#"
            SELECT id, user_id, estimate_id, move_date, created_at
            FROM move_checklists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(checklist)
    }

    async fn find_checklist_by_estimate(
        &self,
        estimate_id: i64,
    ) -> anyhow::Result<Option<MoveChecklist>> {
        let checklist = sqlx::query_as::<_, MoveChecklist>(
            r#"
            SELECT id, user_id, estimate_id, move_date, created_at
            FROM move_checklists
            WHERE estimate_id = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(estimate_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(checklist)
    }

    async fn list_checklists_by_user(&self, user_id: i64) -> anyhow::Result<Vec<MoveChecklist>> {
        let rows = sqlx::query_as::<_, MoveChecklist>(
            r#"
            SELECT id, user_id, estimate_id, move_date, created_at
            FROM move_checklists
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_items_by_checklist(
        &self,
        checklist_id: i64,
    ) -> anyhow::Result<Vec<ChecklistItem>> {
        let rows = sqlx::query_as::<_, ChecklistItem>(
            r#"
            SELECT id, checklist_id, task, description, category, timeframe,
                   completed, created_at
            FROM checklist_items
            WHERE checklist_id = $1
            ORDER BY id
            "#,
        )
        .bind(checklist_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_item(&self, id: i64) -> anyhow::Result<Option<ChecklistItem>> {
        let item = sqlx::query_as::<_, ChecklistItem>(
            r#"
            SELECT id, checklist_id, task, description, category, timeframe,
                   completed, created_at
            FROM checklist_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn set_item_completed(
        &self,
        id: i64,
        completed: bool,
    ) -> anyhow::Result<Option<ChecklistItem>> {
        let item = sqlx::query_as::<_, ChecklistItem>(
            r#"
            UPDATE checklist_items
            SET completed = $2
            WHERE id = $1
            RETURNING id, checklist_id, task, description, category, timeframe,
                      completed, created_at
            "#,
        )
        .bind(id)
        .bind(completed)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn get_progress_by_user(&self, user_id: i64) -> anyhow::Result<Option<UserProgress>> {
        let progress = sqlx::query_as::<_, UserProgress>(
            r#"
            SELECT id, user_id, points, level, achievements, streak,
                   last_interaction, created_at
            FROM user_progress
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(progress)
    }

    async fn create_progress(&self, user_id: i64) -> anyhow::Result<UserProgress> {
        let now = OffsetDateTime::now_utc();
        let progress = sqlx::query_as::<_, UserProgress>(
            r#"
            INSERT INTO user_progress (user_id, points, level, achievements, streak, last_interaction)
            VALUES ($1, 0, 1, '{}', 0, $2)
            RETURNING id, user_id, points, level, achievements, streak,
                      last_interaction, created_at
            "#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(progress)
    }

    async fn update_progress(
        &self,
        user_id: i64,
        patch: ProgressPatch,
    ) -> anyhow::Result<Option<UserProgress>> {
        let progress = sqlx::query_as::<_, UserProgress>(
            r#"
            UPDATE user_progress
            SET points = $2,
                level = $3,
                achievements = $4,
                streak = $5,
                last_interaction = $6
            WHERE user_id = $1
            RETURNING id, user_id, points, level, achievements, streak,
                      last_interaction, created_at
            "#,
        )
        .bind(user_id)
        .bind(patch.points)
        .bind(level_for_points(patch.points))
        .bind(&patch.achievements)
        .bind(patch.streak)
        .bind(patch.last_interaction)
        .fetch_optional(&self.pool)
        .await?;
        Ok(progress)
    }
}
