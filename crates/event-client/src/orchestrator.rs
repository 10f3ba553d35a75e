//! Save/delete orchestration on top of an [`EventApi`].
//!
//! Creating a repeating event expands it locally and submits the whole
//! series as one bulk create. If expansion fails, or yields nothing, the
//! save is aborted before any request is made. Every failure ends in a
//! single error notification and leaves the cached event list as it was;
//! nothing is retried and no subset of a series is ever committed.

use recurrence_engine::{expand_event, EventId, EventInstance, SeriesId};

use crate::api::EventApi;
use crate::error::{ApiResult, Result, SaveError};
use crate::notify::{Notification, Notifier, Severity};

pub const MSG_LOADED: &str = "Events loaded";
pub const MSG_LOAD_FAILED: &str = "Failed to load events";
pub const MSG_CREATED: &str = "Event added";
pub const MSG_UPDATED: &str = "Event updated";
pub const MSG_SERIES_CREATED: &str = "Repeating events created";
pub const MSG_SERIES_UPDATED: &str = "Repeating events updated";
pub const MSG_SAVE_FAILED: &str = "Failed to save event";
pub const MSG_DELETED: &str = "Event deleted";
pub const MSG_SERIES_DELETED: &str = "Repeating events deleted";
pub const MSG_DELETE_FAILED: &str = "Failed to delete event";

/// Whether a save creates a new event or edits a persisted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    /// Edits touch one stored instance and never re-expand its rule.
    Edit,
}

/// What a successful save wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(EventInstance),
    Updated(EventInstance),
    SeriesCreated(Vec<EventInstance>),
}

/// Client-side view of the event list plus the operations that change it.
pub struct EventSaveOrchestrator<A, N> {
    api: A,
    notifier: N,
    events: Vec<EventInstance>,
}

impl<A: EventApi, N: Notifier> EventSaveOrchestrator<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        EventSaveOrchestrator {
            api,
            notifier,
            events: Vec::new(),
        }
    }

    /// Events as of the last successful fetch.
    pub fn events(&self) -> &[EventInstance] {
        &self.events
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Initial load: fetch, then tell the user the list is ready.
    ///
    /// The "loaded" notice is sent even when the fetch failed, after the
    /// load error.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the fetch fails.
    pub fn init(&mut self) -> ApiResult<()> {
        let fetched = self.fetch_events().map(|_| ());
        self.notify(Severity::Info, MSG_LOADED);
        fetched
    }

    /// Replace the cached list with the backend's.
    ///
    /// # Errors
    ///
    /// On failure the cached list is kept and an error is shown.
    pub fn fetch_events(&mut self) -> ApiResult<&[EventInstance]> {
        match self.api.fetch_all() {
            Ok(events) => {
                tracing::debug!(count = events.len(), "fetched events");
                self.events = events;
                Ok(&self.events)
            }
            Err(err) => {
                tracing::warn!(error = %err, "fetching events failed");
                self.notify(Severity::Error, MSG_LOAD_FAILED);
                Err(err)
            }
        }
    }

    /// Save `event`, expanding it into a series when it is a new repeating
    /// event.
    ///
    /// # Errors
    ///
    /// - [`SaveError::Expansion`] if the rule cannot be expanded (no end date)
    /// - [`SaveError::EmptySeries`] if the rule yields no instance
    /// - [`SaveError::MissingId`] when editing an event without an id
    /// - [`SaveError::Api`] if the backend rejects the write
    #[tracing::instrument(skip(self, event), fields(title = %event.title, date = %event.date))]
    pub fn save_event(&mut self, event: EventInstance, mode: SaveMode) -> Result<SaveOutcome> {
        match self.write(event, mode) {
            Ok(outcome) => {
                let message = match &outcome {
                    SaveOutcome::Created(_) => MSG_CREATED,
                    SaveOutcome::Updated(_) => MSG_UPDATED,
                    SaveOutcome::SeriesCreated(_) => MSG_SERIES_CREATED,
                };
                self.notify(Severity::Success, message);
                self.refresh();
                Ok(outcome)
            }
            Err(err) => Err(self.fail(err, MSG_SAVE_FAILED)),
        }
    }

    /// Delete one stored event.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Api`] if the backend refuses the delete.
    pub fn delete_event(&mut self, id: &EventId) -> Result<()> {
        match self.api.delete(id) {
            Ok(()) => {
                tracing::info!(%id, "deleted event");
                self.refresh();
                self.notify(Severity::Info, MSG_DELETED);
                Ok(())
            }
            Err(err) => Err(self.fail(err.into(), MSG_DELETE_FAILED)),
        }
    }

    /// Apply `edit` to every cached instance of `series` and submit them as
    /// one bulk update. `edit` must not change dates it wants kept.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::UnknownSeries`] if no cached instance belongs to
    /// the series, or [`SaveError::Api`] if the bulk update fails.
    pub fn update_series<F>(&mut self, series: &SeriesId, mut edit: F) -> Result<Vec<EventInstance>>
    where
        F: FnMut(&mut EventInstance),
    {
        let mut batch = self.series_instances(series);
        if batch.is_empty() {
            return Err(self.fail(SaveError::UnknownSeries(series.clone()), MSG_SAVE_FAILED));
        }
        batch.iter_mut().for_each(&mut edit);

        match self.api.update_many(batch) {
            Ok(updated) => {
                tracing::info!(%series, count = updated.len(), "updated series");
                self.notify(Severity::Success, MSG_SERIES_UPDATED);
                self.refresh();
                Ok(updated)
            }
            Err(err) => Err(self.fail(err.into(), MSG_SAVE_FAILED)),
        }
    }

    /// Delete every cached instance of `series` with one bulk delete.
    ///
    /// Returns how many instances were removed.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::UnknownSeries`] if no cached instance belongs to
    /// the series, or [`SaveError::Api`] if the bulk delete fails.
    pub fn delete_series(&mut self, series: &SeriesId) -> Result<usize> {
        let ids: Vec<EventId> = self
            .series_instances(series)
            .into_iter()
            .filter_map(|e| e.id)
            .collect();
        if ids.is_empty() {
            return Err(self.fail(SaveError::UnknownSeries(series.clone()), MSG_DELETE_FAILED));
        }

        match self.api.delete_many(&ids) {
            Ok(()) => {
                tracing::info!(%series, count = ids.len(), "deleted series");
                self.refresh();
                self.notify(Severity::Info, MSG_SERIES_DELETED);
                Ok(ids.len())
            }
            Err(err) => Err(self.fail(err.into(), MSG_DELETE_FAILED)),
        }
    }

    fn write(&self, event: EventInstance, mode: SaveMode) -> Result<SaveOutcome> {
        match mode {
            SaveMode::Edit => {
                let id = event.id.clone().ok_or(SaveError::MissingId)?;
                Ok(SaveOutcome::Updated(self.api.update(&id, event)?))
            }
            SaveMode::Create if event.is_repeating() => {
                let series = expand_event(&event)?;
                if series.is_empty() {
                    return Err(SaveError::EmptySeries);
                }
                tracing::info!(
                    kind = %event.repeat.kind(),
                    instances = series.len(),
                    "submitting repeating series"
                );
                Ok(SaveOutcome::SeriesCreated(self.api.create_many(series)?))
            }
            SaveMode::Create => Ok(SaveOutcome::Created(self.api.create(event)?)),
        }
    }

    fn series_instances(&self, series: &SeriesId) -> Vec<EventInstance> {
        self.events
            .iter()
            .filter(|e| e.series_id.as_ref() == Some(series))
            .cloned()
            .collect()
    }

    /// Re-fetch after a successful write. A failed refresh has already been
    /// reported by [`Self::fetch_events`] and does not undo the write.
    fn refresh(&mut self) {
        let _ = self.fetch_events();
    }

    fn fail(&self, err: SaveError, message: &str) -> SaveError {
        tracing::warn!(error = %err, "{message}");
        self.notify(Severity::Error, message);
        err
    }

    fn notify(&self, severity: Severity, message: &str) {
        self.notifier.notify(Notification::new(severity, message));
    }
}
