use crate::Event;
use crate::event_validation;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// String-keyed persistent storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> PersistenceResult<()>;
    fn remove(&self, key: &str) -> PersistenceResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> PersistenceResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> PersistenceResult<()> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PersistenceResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PersistenceResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// The persisted event collection: one JSON array under a single key.
///
/// Every mutation reloads the whole collection, changes it, and writes it
/// back in full.
pub struct EventRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> EventRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the collection. A missing, `null`, or unparsable record yields
    /// an empty collection.
    pub fn load_events(&self) -> PersistenceResult<Vec<Event>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Option<Vec<Event>>>(&raw) {
            Ok(events) => Ok(events.unwrap_or_default()),
            Err(err) => {
                warn!(key = %self.key, "discarding malformed event data: {err}");
                Ok(Vec::new())
            }
        }
    }

    pub fn save_events(&self, events: &[Event]) -> PersistenceResult<()> {
        let json = serde_json::to_string(events)?;
        self.store.set(&self.key, &json)
    }

    /// Load, apply `mutate`, save.
    pub fn transact<T>(&self, mutate: impl FnOnce(&mut Vec<Event>) -> T) -> PersistenceResult<T> {
        let mut events = self.load_events()?;
        let result = mutate(&mut events);
        self.save_events(&events)?;
        Ok(result)
    }

    pub fn add_event(&self, event: Event) -> PersistenceResult<()> {
        info!(event_id = %event.id, title = %event.title, "adding event");
        self.transact(|events| events.push(event))
    }

    /// Returns whether an event with `id` was removed.
    pub fn delete_event(&self, id: &str) -> PersistenceResult<bool> {
        let removed = self.transact(|events| {
            let before = events.len();
            events.retain(|event| event.id != id);
            events.len() != before
        })?;
        if removed {
            info!(event_id = %id, "deleted event");
        }
        Ok(removed)
    }

    /// Replaces the whole collection after validating it.
    pub fn replace_events(&self, replacement: Vec<Event>) -> PersistenceResult<()> {
        validate_events(&replacement)?;
        info!(count = replacement.len(), "replacing event collection");
        self.transact(|events| *events = replacement)
    }

    pub fn clear_all(&self) -> PersistenceResult<()> {
        info!(key = %self.key, "clearing all events");
        self.store.remove(&self.key)
    }
}

pub fn validate_events(events: &[Event]) -> PersistenceResult<()> {
    event_validation::validate_event_collection(events)
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{
    JsonFileStore, export_events_to_csv, export_events_to_json, import_events_from_csv,
    import_events_from_json,
};
