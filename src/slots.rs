//! Slot generation: partitions the day into the rows of the grid.

use crate::config::TimetableConfig;
use crate::time::ClockTime;

/// Boundaries from `start` to `end` inclusive, `step_minutes` apart.
///
/// When `end` is not reachable in whole steps the last boundary is the last
/// value not after `end`. Returns an empty list for a zero step.
pub fn generate_slots(start: ClockTime, end: ClockTime, step_minutes: u16) -> Vec<ClockTime> {
    let mut slots = Vec::new();
    if step_minutes == 0 {
        return slots;
    }
    let mut current = Some(start);
    while let Some(time) = current {
        if time > end {
            break;
        }
        slots.push(time);
        current = time.checked_add_minutes(step_minutes);
    }
    slots
}

/// One row of the grid: the half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRow {
    pub index: usize,
    pub start: ClockTime,
    pub end: ClockTime,
}

impl SlotRow {
    pub fn contains(&self, time: ClockTime) -> bool {
        self.start <= time && time < self.end
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
    boundaries: Vec<ClockTime>,
    step_minutes: u16,
}

impl SlotGrid {
    pub fn new(start: ClockTime, end: ClockTime, step_minutes: u16) -> Self {
        Self {
            boundaries: generate_slots(start, end, step_minutes),
            step_minutes,
        }
    }

    pub fn from_config(config: &TimetableConfig) -> Self {
        Self::new(config.grid_start, config.grid_end, config.step_minutes)
    }

    pub fn boundaries(&self) -> &[ClockTime] {
        &self.boundaries
    }

    pub fn step_minutes(&self) -> u16 {
        self.step_minutes
    }

    pub fn row_count(&self) -> usize {
        self.boundaries.len().saturating_sub(1)
    }

    pub fn rows(&self) -> impl Iterator<Item = SlotRow> + '_ {
        self.boundaries
            .windows(2)
            .enumerate()
            .map(|(index, pair)| SlotRow {
                index,
                start: pair[0],
                end: pair[1],
            })
    }

    pub fn row(&self, index: usize) -> Option<SlotRow> {
        let start = *self.boundaries.get(index)?;
        let end = *self.boundaries.get(index + 1)?;
        Some(SlotRow { index, start, end })
    }

    /// Index of the unique row whose interval contains `time`.
    pub fn slot_index(&self, time: ClockTime) -> Option<usize> {
        self.boundaries
            .windows(2)
            .position(|pair| pair[0] <= time && time < pair[1])
    }

    /// First boundary; `None` when the grid has no rows.
    pub fn start(&self) -> Option<ClockTime> {
        if self.row_count() == 0 {
            return None;
        }
        self.boundaries.first().copied()
    }

    /// Last boundary, which is the effective end of the grid.
    pub fn end(&self) -> Option<ClockTime> {
        if self.row_count() == 0 {
            return None;
        }
        self.boundaries.last().copied()
    }

    pub fn contains(&self, time: ClockTime) -> bool {
        self.slot_index(time).is_some()
    }
}
