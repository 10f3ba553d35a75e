//! CRUD contract of the events backend.

use recurrence_engine::{EventId, EventInstance};

use crate::error::ApiResult;

/// Operations the events backend exposes, keyed by opaque [`EventId`].
///
/// Bulk operations are atomic: a batch either applies as a whole or fails
/// without effect.
pub trait EventApi: Send + Sync {
    fn fetch_all(&self) -> ApiResult<Vec<EventInstance>>;

    /// Persist one event; the returned copy carries its assigned id.
    fn create(&self, event: EventInstance) -> ApiResult<EventInstance>;

    /// Replace the stored event `id` with `event`.
    fn update(&self, id: &EventId, event: EventInstance) -> ApiResult<EventInstance>;

    fn delete(&self, id: &EventId) -> ApiResult<()>;

    /// Persist a whole series at once. Repeating instances come back sharing
    /// one series id.
    fn create_many(&self, events: Vec<EventInstance>) -> ApiResult<Vec<EventInstance>>;

    /// Update every event of the batch that is already stored, by id.
    fn update_many(&self, events: Vec<EventInstance>) -> ApiResult<Vec<EventInstance>>;

    /// Remove every listed event. Unknown ids are ignored.
    fn delete_many(&self, ids: &[EventId]) -> ApiResult<()>;
}
