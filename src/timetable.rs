use crate::config::{ConfigError, TimetableConfig};
use crate::event::{Event, EventDraft};
use crate::event_validation::{self, InputError};
use crate::persistence::{EventRepository, KeyValueStore, PersistenceError, PersistenceResult};
use crate::placement::{self, Placement};
use crate::render::TimetableView;
use crate::slots::SlotGrid;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Everything the editor needs, built once at startup: the validated
/// configuration, the slot grid derived from it, and the event repository.
pub struct Timetable<S> {
    config: TimetableConfig,
    grid: SlotGrid,
    repository: EventRepository<S>,
}

impl<S: KeyValueStore> Timetable<S> {
    pub fn new(config: TimetableConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = SlotGrid::from_config(&config);
        debug!(rows = grid.row_count(), "built slot grid");
        let repository = EventRepository::new(store, config.storage_key.clone());
        Ok(Self {
            config,
            grid,
            repository,
        })
    }

    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    pub fn repository(&self) -> &EventRepository<S> {
        &self.repository
    }

    pub fn events(&self) -> PersistenceResult<Vec<Event>> {
        self.repository.load_events()
    }

    pub fn find_event(&self, id: &str) -> PersistenceResult<Option<Event>> {
        Ok(self.events()?.into_iter().find(|event| event.id == id))
    }

    /// Validates the form input and appends the new event. Nothing is
    /// persisted when validation fails.
    pub fn submit(&self, draft: &EventDraft) -> Result<Event, SubmitError> {
        let event = event_validation::event_from_draft(draft, &self.config, &self.grid)?;
        self.repository.add_event(event.clone())?;
        Ok(event)
    }

    pub fn delete_event(&self, id: &str) -> PersistenceResult<bool> {
        self.repository.delete_event(id)
    }

    pub fn clear_all(&self) -> PersistenceResult<()> {
        self.repository.clear_all()
    }

    pub fn replace_events(&self, events: Vec<Event>) -> PersistenceResult<()> {
        self.repository.replace_events(events)
    }

    pub fn placements(&self) -> PersistenceResult<Vec<Placement>> {
        let events = self.events()?;
        Ok(placement::resolve_all(&events, &self.grid, self.config.days))
    }

    pub fn empty_view(&self) -> TimetableView {
        TimetableView::new(&self.grid, self.config.days)
    }

    /// Re-renders `view` from the persisted collection.
    pub fn refresh_view(&self, view: &mut TimetableView) -> PersistenceResult<()> {
        let events = self.events()?;
        view.render_events(&events);
        Ok(())
    }

    pub fn view(&self) -> PersistenceResult<TimetableView> {
        let mut view = self.empty_view();
        self.refresh_view(&mut view)?;
        Ok(view)
    }
}
