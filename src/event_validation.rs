use crate::config::{MAX_DAYS, TimetableConfig};
use crate::event::{Event, EventDraft, generate_event_id, non_empty};
use crate::slots::SlotGrid;
use crate::time::{ClockTime, ParseClockTimeError};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Rejection of user-entered form data. The message is meant to be shown to
/// the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("day must be a number between 1 and {max} (got '{input}')")]
    InvalidDay { input: String, max: u8 },
    #[error("{field} time is invalid: {source}")]
    InvalidTime {
        field: &'static str,
        source: ParseClockTimeError,
    },
    #[error("end time {end} must be later than start time {start}")]
    EndNotAfterStart { start: ClockTime, end: ClockTime },
    #[error("event {start}-{end} must fall within the grid {grid_start}-{grid_end}")]
    OutsideGrid {
        start: ClockTime,
        end: ClockTime,
        grid_start: ClockTime,
        grid_end: ClockTime,
    },
    #[error("the grid has no rows to place events in")]
    EmptyGrid,
}

/// Turns form input into a new event, or explains why it was rejected.
pub fn event_from_draft(
    draft: &EventDraft,
    config: &TimetableConfig,
    grid: &SlotGrid,
) -> Result<Event, InputError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(InputError::EmptyTitle);
    }

    let day = draft
        .day
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|d| (1..=config.days).contains(d))
        .ok_or_else(|| InputError::InvalidDay {
            input: draft.day.clone(),
            max: config.days,
        })?;

    let start: ClockTime = draft
        .start
        .parse()
        .map_err(|source| InputError::InvalidTime {
            field: "start",
            source,
        })?;
    let end: ClockTime = draft
        .end
        .parse()
        .map_err(|source| InputError::InvalidTime { field: "end", source })?;

    if end <= start {
        return Err(InputError::EndNotAfterStart { start, end });
    }

    let (Some(grid_start), Some(grid_end)) = (grid.start(), grid.end()) else {
        return Err(InputError::EmptyGrid);
    };
    if start < grid_start || end > grid_end {
        return Err(InputError::OutsideGrid {
            start,
            end,
            grid_start,
            grid_end,
        });
    }

    Ok(Event {
        id: generate_event_id(),
        title: title.to_string(),
        day,
        start,
        end,
        location: draft.location.clone().and_then(non_empty),
        note: draft.note.clone().and_then(non_empty),
    })
}

#[derive(Debug, Clone)]
pub struct EventValidationError {
    message: String,
}

impl EventValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for EventValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EventValidationError {}

pub fn validate_event(event: &Event) -> Result<(), EventValidationError> {
    if event.id.trim().is_empty() {
        return Err(EventValidationError::new(format!(
            "event '{}' has an empty id",
            event.title
        )));
    }
    if event.title.trim().is_empty() {
        return Err(EventValidationError::new(format!(
            "event {} has an empty title",
            event.id
        )));
    }
    if !(1..=MAX_DAYS).contains(&event.day) {
        return Err(EventValidationError::new(format!(
            "event {} has invalid day {} (must be between 1 and {MAX_DAYS})",
            event.id, event.day
        )));
    }
    if event.end <= event.start {
        return Err(EventValidationError::new(format!(
            "event {} ends at {} which is not after its start {}",
            event.id, event.end, event.start
        )));
    }
    Ok(())
}

pub fn validate_event_collection(events: &[Event]) -> Result<(), EventValidationError> {
    let mut seen_ids = HashSet::with_capacity(events.len());
    for event in events {
        if !seen_ids.insert(event.id.as_str()) {
            return Err(EventValidationError::new(format!(
                "duplicate event id {}",
                event.id
            )));
        }
        validate_event(event)?;
    }
    Ok(())
}
