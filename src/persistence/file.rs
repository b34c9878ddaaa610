use super::{KeyValueStore, PersistenceError, PersistenceResult};
use crate::event::non_empty;
use crate::{ClockTime, Event};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Key-value store backed by a single JSON object on disk.
///
/// A missing file is an empty store. A garbled file is also read as empty
/// and gets overwritten by the next `set`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> PersistenceResult<BTreeMap<String, String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(path = %self.path.display(), "ignoring unreadable store file: {err}");
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> PersistenceResult<()> {
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, entries)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> PersistenceResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> PersistenceResult<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

pub fn export_events_to_json<P: AsRef<Path>>(events: &[Event], path: P) -> PersistenceResult<()> {
    super::validate_events(events)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, events)?;
    Ok(())
}

pub fn import_events_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Event>> {
    let file = File::open(path)?;
    let events: Vec<Event> = serde_json::from_reader(file)?;
    super::validate_events(&events)?;
    Ok(events)
}

#[derive(Serialize, Deserialize)]
struct EventCsvRecord {
    id: String,
    title: String,
    day: u8,
    start: String,
    end: String,
    location: String,
    note: String,
}

impl From<&Event> for EventCsvRecord {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            day: event.day,
            start: event.start.to_string(),
            end: event.end.to_string(),
            location: event.location.clone().unwrap_or_default(),
            note: event.note.clone().unwrap_or_default(),
        }
    }
}

impl EventCsvRecord {
    fn into_event(self) -> PersistenceResult<Event> {
        Ok(Event {
            id: self.id,
            title: self.title,
            day: self.day,
            start: parse_time(&self.start)?,
            end: parse_time(&self.end)?,
            location: non_empty(self.location),
            note: non_empty(self.note),
        })
    }
}

pub fn export_events_to_csv<P: AsRef<Path>>(events: &[Event], path: P) -> PersistenceResult<()> {
    super::validate_events(events)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for event in events {
        writer.serialize(EventCsvRecord::from(event))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn import_events_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Event>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut events = Vec::new();
    for record in reader.deserialize::<EventCsvRecord>() {
        events.push(record?.into_event()?);
    }
    super::validate_events(&events)?;
    Ok(events)
}

fn parse_time(input: &str) -> PersistenceResult<ClockTime> {
    input
        .parse()
        .map_err(|err| PersistenceError::InvalidData(format!("{err}")))
}

