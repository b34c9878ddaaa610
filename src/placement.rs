//! Maps events onto grid cells.
//!
//! Grid coordinates are 1-based. Row 1 is the day header and column 1 holds
//! the time labels, so slot `i` lives in row `i + 2` and day `d` in column
//! `d + 1`.

use crate::event::Event;
use crate::slots::SlotGrid;
use crate::time::ClockTime;
use std::ops::Range;
use tracing::debug;

pub const HEADER_ROWS: usize = 1;
pub const TIME_LABEL_COLUMNS: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub event_id: String,
    pub column: usize,
    pub row: usize,
    pub span: usize,
}

impl Placement {
    /// Grid rows covered by the event, `[row, row + span)`.
    pub fn rows(&self) -> Range<usize> {
        self.row..self.row + self.span
    }

    /// Zero-based index of the first slot.
    pub fn slot_index(&self) -> usize {
        self.row - HEADER_ROWS - 1
    }
}

/// `max(1, ceil((end - start) / step))`.
pub fn span_for(start: ClockTime, end: ClockTime, step_minutes: u16) -> usize {
    let duration = start.minutes_until(end).max(0) as usize;
    let step = usize::from(step_minutes.max(1));
    duration.div_ceil(step).max(1)
}

pub fn row_for(grid: &SlotGrid, start: ClockTime) -> Option<usize> {
    grid.slot_index(start).map(|index| index + HEADER_ROWS + 1)
}

pub fn column_for_day(day: u8) -> usize {
    usize::from(day) + TIME_LABEL_COLUMNS
}

/// Resolves where `event` is drawn, or `None` when it cannot be placed on
/// this grid (day beyond `days`, or a start outside every slot).
pub fn resolve(event: &Event, grid: &SlotGrid, days: u8) -> Option<Placement> {
    if event.day == 0 || event.day > days {
        debug!(event_id = %event.id, day = event.day, "event day is outside the grid");
        return None;
    }
    let Some(row) = row_for(grid, event.start) else {
        debug!(event_id = %event.id, start = %event.start, "event start is outside every slot");
        return None;
    };
    Some(Placement {
        event_id: event.id.clone(),
        column: column_for_day(event.day),
        row,
        span: span_for(event.start, event.end, grid.step_minutes()),
    })
}

/// Places every event independently; overlapping events are all kept.
pub fn resolve_all(events: &[Event], grid: &SlotGrid, days: u8) -> Vec<Placement> {
    events
        .iter()
        .filter_map(|event| resolve(event, grid, days))
        .collect()
}
