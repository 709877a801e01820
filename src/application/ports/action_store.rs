use crate::domain::entities::ActionRecord;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Durable storage for the full action collection.
///
/// `load` is infallible by contract: corrupted or unavailable storage yields
/// an empty collection (logged by the implementation) so a broken queue can
/// never block application startup. `save` may fail; the queue logs and
/// keeps the in-memory collection authoritative for the session.
#[async_trait]
pub trait ActionStore: Send + Sync {
    async fn load(&self) -> Vec<ActionRecord>;
    async fn save(&self, records: &[ActionRecord]) -> Result<(), AppError>;
}
