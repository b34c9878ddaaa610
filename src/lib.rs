pub mod config;
pub mod event;
pub(crate) mod event_validation;
pub mod persistence;
pub mod placement;
pub mod render;
pub mod slots;
pub mod time;
pub mod timetable;

pub use config::{ConfigError, TimetableConfig};
pub use event::{Event, EventDraft};
pub use event_validation::InputError;
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteStore;
pub use persistence::{
    EventRepository, JsonFileStore, KeyValueStore, MemoryStore, PersistenceError,
    export_events_to_csv, export_events_to_json, import_events_from_csv,
    import_events_from_json, validate_events,
};
pub use placement::Placement;
pub use render::{EventBlock, TimetableView};
pub use slots::{SlotGrid, SlotRow, generate_slots};
pub use time::{ClockTime, ParseClockTimeError};
pub use timetable::{SubmitError, Timetable};
