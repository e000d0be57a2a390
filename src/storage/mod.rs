use axum::async_trait;

pub mod memory;
pub mod postgres;
pub mod types;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use types::{
    ChecklistItem, ItemSeed, MoveChecklist, MoveEstimate, NewChecklist, NewEstimate,
    ProgressPatch, User, UserProgress,
};

/// Persistence capability for the five entity kinds. Implementations assign
/// fresh ids and server-side created_at timestamps on create; missing ids are
/// reported as Ok(None), never as errors.
///
/// Ownership checks live in the handlers, not here.
#[async_trait]
pub trait MoveStore: Send + Sync {
    // users
    async fn create_user(&self, username: &str, password_hash: &str) -> anyhow::Result<User>;
    async fn find_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    async fn get_user(&self, id: i64) -> anyhow::Result<Option<User>>;

    // estimates
    async fn create_estimate(&self, new: NewEstimate) -> anyhow::Result<MoveEstimate>;
    async fn get_estimate(&self, id: i64) -> anyhow::Result<Option<MoveEstimate>>;
    async fn list_estimates_by_user(&self, user_id: i64) -> anyhow::Result<Vec<MoveEstimate>>;
    async fn list_estimates(&self) -> anyhow::Result<Vec<MoveEstimate>>;

    // checklists + items. Creation is a single atomic operation: a reader can
    // never observe the checklist id with a partially inserted item list.
    async fn create_checklist_with_items(
        &self,
        new: NewChecklist,
        items: Vec<ItemSeed>,
    ) -> anyhow::Result<(MoveChecklist, Vec<ChecklistItem>)>;
    async fn get_checklist(&self, id: i64) -> anyhow::Result<Option<MoveChecklist>>;
    async fn find_checklist_by_estimate(
        &self,
        estimate_id: i64,
    ) -> anyhow::Result<Option<MoveChecklist>>;
    async fn list_checklists_by_user(&self, user_id: i64) -> anyhow::Result<Vec<MoveChecklist>>;
    async fn list_items_by_checklist(
        &self,
        checklist_id: i64,
    ) -> anyhow::Result<Vec<ChecklistItem>>;
    async fn get_item(&self, id: i64) -> anyhow::Result<Option<ChecklistItem>>;
    async fn set_item_completed(
        &self,
        id: i64,
        completed: bool,
    ) -> anyhow::Result<Option<ChecklistItem>>;

    // progress
    async fn get_progress_by_user(&self, user_id: i64) -> anyhow::Result<Option<UserProgress>>;
    async fn create_progress(&self, user_id: i64) -> anyhow::Result<UserProgress>;
    async fn update_progress(
        &self,
        user_id: i64,
        patch: ProgressPatch,
    ) -> anyhow::Result<Option<UserProgress>>;
}
