use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use axum::async_trait;
use time::OffsetDateTime;

use super::types::{
    level_for_points, ChecklistItem, ItemSeed, MoveChecklist, MoveEstimate, NewChecklist,
    NewEstimate, ProgressPatch, User, UserProgress,
};
use super::MoveStore;

/// Process-lifetime store: per-entity maps keyed by sequence ids. All state
/// lives behind one mutex, so the two-step checklist creation is naturally
/// atomic to other callers.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: HashMap<&'static str, i64>,
    users: HashMap<i64, User>,
    estimates: HashMap<i64, MoveEstimate>,
    checklists: HashMap<i64, MoveChecklist>,
    items: HashMap<i64, ChecklistItem>,
    progress: HashMap<i64, UserProgress>,
}

impl Inner {
    fn alloc(&mut self, kind: &'static str) -> i64 {
        let next = self.next_id.entry(kind).or_insert(1);
        let id = *next;
        *next += 1;
        id
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl MoveStore for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> anyhow::Result<User> {
        let mut inner = self.lock();
        if inner.users.values().any(|u| u.username == username) {
            anyhow::bail!("username already taken");
        }
        let user = User {
            id: inner.alloc("users"),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn get_user(&self, id: i64) -> anyhow::Result<Option<User>> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn create_estimate(&self, new: NewEstimate) -> anyhow::Result<MoveEstimate> {
        let mut inner = self.lock();
        let estimate = MoveEstimate {
            id: inner.alloc("estimates"),
            user_id: new.user_id,
            origin: new.origin,
            destination: new.destination,
            distance: new.distance,
            home_size: new.home_size,
            additional_items: new.additional_items,
            move_date: new.move_date,
            flexibility: new.flexibility,
            services: new.services,
            cost_diy: new.cost_diy,
            cost_hybrid: new.cost_hybrid,
            cost_full_service: new.cost_full_service,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.estimates.insert(estimate.id, estimate.clone());
        Ok(estimate)
    }

    async fn get_estimate(&self, id: i64) -> anyhow::Result<Option<MoveEstimate>> {
        Ok(self.lock().estimates.get(&id).cloned())
    }

    async fn list_estimates_by_user(&self, user_id: i64) -> anyhow::Result<Vec<MoveEstimate>> {
        let mut rows: Vec<_> = self
            .lock()
            .estimates
            .values()
            .filter(|e| e.user_id == Some(user_id))
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.id);
        Ok(rows)
    }

    async fn list_estimates(&self) -> anyhow::Result<Vec<MoveEstimate>> {
        let mut rows: Vec<_> = self.lock().estimates.values().cloned().collect();
        rows.sort_by_key(|e| e.id);
        Ok(rows)
    }

    async fn create_checklist_with_items(
        &self,
        new: NewChecklist,
        items: Vec<ItemSeed>,
    ) -> anyhow::Result<(MoveChecklist, Vec<ChecklistItem>)> {
        let mut inner = self.lock();
        let now = OffsetDateTime::now_utc();
        let checklist = MoveChecklist {
            id: inner.alloc("checklists"),
            user_id: new.user_id,
            estimate_id: new.estimate_id,
            move_date: new.move_date,
            created_at: now,
        };
        let mut created = Vec::with_capacity(items.len());
        for seed in items {
            let item = ChecklistItem {
                id: inner.alloc("items"),
                checklist_id: checklist.id,
                task: seed.task,
                description: seed.description,
                category: seed.category,
                timeframe: seed.timeframe,
                completed: false,
                created_at: now,
            };
            inner.items.insert(item.id, item.clone());
            created.push(item);
        }
        inner.checklists.insert(checklist.id, checklist.clone());
        Ok((checklist, created))
    }

    async fn get_checklist(&self, id: i64) -> anyhow::Result<Option<MoveChecklist>> {
        Ok(self.lock().checklists.get(&id).cloned())
    }

    async fn find_checklist_by_estimate(
        &self,
        estimate_id: i64,
    ) -> anyhow::Result<Option<MoveChecklist>> {
        Ok(self
            .lock()
            .checklists
            .values()
            .find(|c| c.estimate_id == Some(estimate_id))
            .cloned())
    }

    async fn list_checklists_by_user(&self, user_id: i64) -> anyhow::Result<Vec<MoveChecklist>> {
        let mut rows: Vec<_> = self
            .lock()
            .checklists
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.id);
        Ok(rows)
    }

    async fn list_items_by_checklist(
        &self,
        checklist_id: i64,
    ) -> anyhow::Result<Vec<ChecklistItem>> {
        let mut rows: Vec<_> = self
            .lock()
            .items
            .values()
            .filter(|i| i.checklist_id == checklist_id)
            .cloned()
            .collect();
        rows.sort_by_key(|i| i.id);
        Ok(rows)
    }

    async fn get_item(&self, id: i64) -> anyhow::Result<Option<ChecklistItem>> {
        Ok(self.lock().items.get(&id).cloned())
    }

    async fn set_item_completed(
        &self,
        id: i64,
        completed: bool,
    ) -> anyhow::Result<Option<ChecklistItem>> {
        let mut inner = self.lock();
        match inner.items.get_mut(&id) {
            Some(item) => {
                item.completed = completed;
                Ok(Some(item.clone()))
            }
            None => Ok(None),
        }
    }

    async fn get_progress_by_user(&self, user_id: i64) -> anyhow::Result<Option<UserProgress>> {
        Ok(self
            .lock()
            .progress
            .values()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn create_progress(&self, user_id: i64) -> anyhow::Result<UserProgress> {
        let mut inner = self.lock();
        if inner.progress.values().any(|p| p.user_id == user_id) {
            anyhow::bail!("progress already exists for user {user_id}");
        }
        let now = OffsetDateTime::now_utc();
        let progress = UserProgress {
            id: inner.alloc("progress"),
            user_id,
            points: 0,
            level: 1,
            achievements: Vec::new(),
            streak: 0,
            last_interaction: now,
            created_at: now,
        };
        inner.progress.insert(progress.id, progress.clone());
        Ok(progress)
    }

    async fn update_progress(
        &self,
        user_id: i64,
        patch: ProgressPatch,
    ) -> anyhow::Result<Option<UserProgress>> {
        let mut inner = self.lock();
        let Some(progress) = inner.progress.values_mut().find(|p| p.user_id == user_id) else {
            return Ok(None);
        };
        progress.points = patch.points;
        progress.level = level_for_points(patch.points);
        progress.achievements = patch.achievements;
        progress.streak = patch.streak;
        progress.last_interaction = patch.last_interaction;
        Ok(Some(progress.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(task: &str, timeframe: &str) -> ItemSeed {
        ItemSeed {
            task: task.into(),
            description: None,
            category: "planning".into(),
            timeframe: timeframe.into(),
        }
    }

    fn sample_estimate(user_id: Option<i64>) -> NewEstimate {
        NewEstimate {
            user_id,
            origin: "123 Main St, New York, NY".into(),
            destination: "456 Oak Ave, Boston, MA".into(),
            distance: 215,
            home_size: "2bedroom".into(),
            additional_items: "none".into(),
            move_date: "2025-06-01".into(),
            flexibility: "exact".into(),
            services: vec![],
            cost_diy: 850,
            cost_hybrid: 2122,
            cost_full_service: 4037,
        }
    }

    #[tokio::test]
    async fn ids_are_fresh_and_sequential_per_kind() {
        let store = MemoryStore::new();
        let a = store.create_estimate(sample_estimate(None)).await.unwrap();
        let b = store.create_estimate(sample_estimate(None)).await.unwrap();
        let u = store.create_user("mover", "hash").await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(u.id, 1);
    }

    #[tokio::test]
    async fn get_missing_returns_none_not_error() {
        let store = MemoryStore::new();
        assert!(store.get_estimate(42).await.unwrap().is_none());
        assert!(store.get_checklist(42).await.unwrap().is_none());
        assert!(store.set_item_completed(42, true).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = MemoryStore::new();
        store.create_user("sam", "h1").await.unwrap();
        assert!(store.create_user("sam", "h2").await.is_err());
    }

    #[tokio::test]
    async fn list_estimates_filters_by_owner() {
        let store = MemoryStore::new();
        store.create_estimate(sample_estimate(Some(1))).await.unwrap();
        store.create_estimate(sample_estimate(Some(2))).await.unwrap();
        store.create_estimate(sample_estimate(None)).await.unwrap();
        assert_eq!(store.list_estimates_by_user(1).await.unwrap().len(), 1);
        assert_eq!(store.list_estimates().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn checklist_creation_returns_all_items_under_new_id() {
        let store = MemoryStore::new();
        let seeds = vec![seed("a", "8-weeks"), seed("b", "moving-day")];
        let (checklist, items) = store
            .create_checklist_with_items(
                NewChecklist {
                    user_id: 7,
                    estimate_id: Some(3),
                    move_date: "2025-06-01".into(),
                },
                seeds,
            )
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.checklist_id == checklist.id));
        assert!(items.iter().all(|i| !i.completed));
        let listed = store.list_items_by_checklist(checklist.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        let by_estimate = store.find_checklist_by_estimate(3).await.unwrap().unwrap();
        assert_eq!(by_estimate.id, checklist.id);
    }

    #[tokio::test]
    async fn double_toggle_restores_original_state() {
        let store = MemoryStore::new();
        let (_, items) = store
            .create_checklist_with_items(
                NewChecklist {
                    user_id: 1,
                    estimate_id: None,
                    move_date: "2025-06-01".into(),
                },
                vec![seed("pack", "1-week")],
            )
            .await
            .unwrap();
        let id = items[0].id;
        let on = store.set_item_completed(id, true).await.unwrap().unwrap();
        assert!(on.completed);
        let off = store.set_item_completed(id, false).await.unwrap().unwrap();
        assert!(!off.completed);
        assert_eq!(off.task, items[0].task);
    }

    #[tokio::test]
    async fn progress_patch_recomputes_level() {
        let store = MemoryStore::new();
        let fresh = store.create_progress(9).await.unwrap();
        assert_eq!(fresh.points, 0);
        assert_eq!(fresh.level, 1);
        let updated = store
            .update_progress(
                9,
                ProgressPatch {
                    points: 230,
                    achievements: vec!["first_estimate".into()],
                    streak: 1,
                    last_interaction: OffsetDateTime::now_utc(),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.level, 3);
        assert!(store
            .update_progress(
                99,
                ProgressPatch {
                    points: 1,
                    achievements: vec![],
                    streak: 0,
                    last_interaction: OffsetDateTime::now_utc(),
                },
            )
            .await
            .unwrap()
            .is_none());
    }
}
