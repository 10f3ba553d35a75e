//! In-memory events backend.
//!
//! Behaves like the reference REST backend: ids are handed out from a
//! counter, a bulk create stamps one series id on all its repeating
//! instances, and bulk deletes ignore unknown ids. Useful for tests and for
//! running the orchestrator without a server.

use std::sync::{Mutex, MutexGuard};

use recurrence_engine::{EventId, EventInstance, SeriesId};

use crate::api::EventApi;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Default)]
struct Store {
    events: Vec<EventInstance>,
    next_id: u64,
    next_series: u64,
    unavailable: bool,
}

impl Store {
    fn check_available(&self) -> ApiResult<()> {
        if self.unavailable {
            return Err(ApiError::Unavailable("backend is offline".to_string()));
        }
        Ok(())
    }

    fn assign_id(&mut self) -> EventId {
        self.next_id += 1;
        EventId(self.next_id.to_string())
    }

    fn assign_series(&mut self) -> SeriesId {
        self.next_series += 1;
        SeriesId(self.next_series.to_string())
    }

    fn position(&self, id: &EventId) -> Option<usize> {
        self.events.iter().position(|e| e.id.as_ref() == Some(id))
    }
}

/// Thread-safe [`EventApi`] keeping events in a `Vec`.
#[derive(Debug, Default)]
pub struct InMemoryEventApi {
    store: Mutex<Store>,
}

impl InMemoryEventApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing events. New ids continue after the largest
    /// numeric id (or series id) already present.
    pub fn with_events(events: Vec<EventInstance>) -> Self {
        let next_id = max_numeric(
            events
                .iter()
                .filter_map(|e| e.id.as_ref())
                .map(|id| id.0.as_str()),
        );
        let next_series = max_numeric(
            events
                .iter()
                .filter_map(|e| e.series_id.as_ref())
                .map(|id| id.0.as_str()),
        );
        InMemoryEventApi {
            store: Mutex::new(Store {
                events,
                next_id,
                next_series,
                unavailable: false,
            }),
        }
    }

    /// Make every subsequent call fail with [`ApiError::Unavailable`] until
    /// switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut store) = self.store.lock() {
            store.unavailable = unavailable;
        }
    }

    /// Copy of everything currently stored, bypassing availability.
    pub fn snapshot(&self) -> Vec<EventInstance> {
        self.store
            .lock()
            .map(|store| store.events.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, Store>> {
        let store = self
            .store
            .lock()
            .map_err(|_| ApiError::Unavailable("event store lock poisoned".to_string()))?;
        store.check_available()?;
        Ok(store)
    }
}

impl EventApi for InMemoryEventApi {
    fn fetch_all(&self) -> ApiResult<Vec<EventInstance>> {
        Ok(self.lock()?.events.clone())
    }

    fn create(&self, mut event: EventInstance) -> ApiResult<EventInstance> {
        let mut store = self.lock()?;
        event.id = Some(store.assign_id());
        store.events.push(event.clone());
        tracing::debug!(id = ?event.id, "created event");
        Ok(event)
    }

    fn update(&self, id: &EventId, mut event: EventInstance) -> ApiResult<EventInstance> {
        let mut store = self.lock()?;
        let index = store
            .position(id)
            .ok_or_else(|| ApiError::NotFound(id.clone()))?;
        let stored = &mut store.events[index];
        event.id = Some(id.clone());
        if event.series_id.is_none() {
            event.series_id = stored.series_id.clone();
        }
        *stored = event.clone();
        Ok(event)
    }

    fn delete(&self, id: &EventId) -> ApiResult<()> {
        let mut store = self.lock()?;
        let index = store
            .position(id)
            .ok_or_else(|| ApiError::NotFound(id.clone()))?;
        store.events.remove(index);
        Ok(())
    }

    fn create_many(&self, events: Vec<EventInstance>) -> ApiResult<Vec<EventInstance>> {
        let mut store = self.lock()?;
        let series = events
            .iter()
            .any(EventInstance::is_repeating)
            .then(|| store.assign_series());

        let mut created = Vec::with_capacity(events.len());
        for mut event in events {
            event.id = Some(store.assign_id());
            event.series_id = if event.is_repeating() {
                series.clone()
            } else {
                None
            };
            created.push(event);
        }
        store.events.extend(created.iter().cloned());
        tracing::debug!(count = created.len(), series = ?series, "created event batch");
        Ok(created)
    }

    fn update_many(&self, events: Vec<EventInstance>) -> ApiResult<Vec<EventInstance>> {
        let mut store = self.lock()?;
        let mut updated = Vec::new();
        for mut event in events {
            let Some(index) = event.id.as_ref().and_then(|id| store.position(id)) else {
                continue;
            };
            let stored = &mut store.events[index];
            if event.series_id.is_none() {
                event.series_id = stored.series_id.clone();
            }
            *stored = event.clone();
            updated.push(event);
        }
        if updated.is_empty() {
            return Err(ApiError::NothingMatched);
        }
        Ok(updated)
    }

    fn delete_many(&self, ids: &[EventId]) -> ApiResult<()> {
        let mut store = self.lock()?;
        store
            .events
            .retain(|e| e.id.as_ref().is_none_or(|id| !ids.contains(id)));
        Ok(())
    }
}

fn max_numeric<'a>(ids: impl Iterator<Item = &'a str>) -> u64 {
    ids.filter_map(|id| id.parse::<u64>().ok()).max().unwrap_or(0)
}
