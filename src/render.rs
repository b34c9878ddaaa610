//! Derived, disposable view of the timetable.

use crate::event::{Event, weekday_for_day};
use crate::placement::{self, HEADER_ROWS, Placement};
use crate::slots::SlotGrid;

const CONTINUATION_MARK: &str = "|";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBlock {
    pub placement: Placement,
    pub title: String,
    pub time_range: String,
    pub location: Option<String>,
    pub note: Option<String>,
}

impl EventBlock {
    fn from_event(event: &Event, placement: Placement) -> Self {
        Self {
            placement,
            title: event.title.clone(),
            time_range: event.time_range(),
            location: event.location.clone(),
            note: event.note.clone(),
        }
    }

    /// Title, time range, `@ location` and note, skipping absent fields.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone(), self.time_range.clone()];
        if let Some(location) = &self.location {
            lines.push(format!("@ {location}"));
        }
        if let Some(note) = &self.note {
            lines.push(note.clone());
        }
        lines
    }
}

enum Cell {
    Empty,
    Starts(Vec<String>),
    Continues,
}

impl Cell {
    fn line(&self, index: usize) -> &str {
        match self {
            Cell::Empty => "",
            Cell::Starts(lines) => lines.get(index).map(String::as_str).unwrap_or(""),
            Cell::Continues => CONTINUATION_MARK,
        }
    }

    fn height(&self) -> usize {
        match self {
            Cell::Starts(lines) => lines.len(),
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableView {
    grid: SlotGrid,
    days: u8,
    blocks: Vec<EventBlock>,
}

impl TimetableView {
    pub fn new(grid: &SlotGrid, days: u8) -> Self {
        Self {
            grid: grid.clone(),
            days,
            blocks: Vec::new(),
        }
    }

    pub fn blocks(&self) -> &[EventBlock] {
        &self.blocks
    }

    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.blocks.iter().map(|block| &block.placement)
    }

    pub fn clear_events(&mut self) {
        self.blocks.clear();
    }

    /// Drops all previously placed blocks, then places `events`. Events that
    /// cannot be placed are skipped.
    pub fn render_events(&mut self, events: &[Event]) {
        self.clear_events();
        for event in events {
            if let Some(placement) = placement::resolve(event, &self.grid, self.days) {
                self.blocks.push(EventBlock::from_event(event, placement));
            }
        }
    }

    pub fn blocks_starting_at(
        &self,
        column: usize,
        row: usize,
    ) -> impl Iterator<Item = &EventBlock> {
        self.blocks
            .iter()
            .filter(move |b| b.placement.column == column && b.placement.row == row)
    }

    pub fn blocks_covering(&self, column: usize, row: usize) -> impl Iterator<Item = &EventBlock> {
        self.blocks.iter().filter(move |b| {
            b.placement.column == column && b.placement.rows().contains(&row)
        })
    }

    fn cell(&self, column: usize, row: usize) -> Cell {
        let lines: Vec<String> = self
            .blocks_starting_at(column, row)
            .flat_map(EventBlock::summary_lines)
            .collect();
        if !lines.is_empty() {
            Cell::Starts(lines)
        } else if self.blocks_covering(column, row).next().is_some() {
            Cell::Continues
        } else {
            Cell::Empty
        }
    }

    /// Renders the grid as an ASCII table: a header row with the day names,
    /// then one or more lines per slot. The time label sits on the first
    /// line of its slot.
    pub fn render_text(&self) -> String {
        let mut header = vec!["Time".to_string()];
        header.extend((1..=self.days).map(|day| {
            weekday_for_day(day)
                .map(|wd| wd.to_string())
                .unwrap_or_default()
        }));

        let mut lines: Vec<Vec<String>> = Vec::with_capacity(self.grid.row_count());
        for slot in self.grid.rows() {
            let row = slot.index + HEADER_ROWS + 1;
            let cells: Vec<Cell> = (1..=self.days)
                .map(|day| self.cell(placement::column_for_day(day), row))
                .collect();
            let height = cells.iter().map(Cell::height).max().unwrap_or(1);
            for index in 0..height {
                let label = if index == 0 { slot.label() } else { String::new() };
                let mut line = vec![label];
                line.extend(cells.iter().map(|cell| cell.line(index).to_string()));
                lines.push(line);
            }
        }

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for line in &lines {
            for (ci, cell) in line.iter().enumerate() {
                widths[ci] = widths[ci].max(cell.chars().count());
            }
        }

        let mut sep = String::from("+");
        for w in &widths {
            sep.push_str(&"-".repeat(*w + 2));
            sep.push('+');
        }

        let mut out = String::new();
        out.push_str(&sep);
        out.push('\n');
        push_line(&mut out, &header, &widths);
        out.push_str(&sep);
        out.push('\n');
        for line in &lines {
            push_line(&mut out, line, &widths);
        }
        out.push_str(&sep);
        out.push('\n');
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (cell, width) in cells.iter().zip(widths) {
        out.push(' ');
        out.push_str(cell);
        let pad = width.saturating_sub(cell.chars().count());
        out.push_str(&" ".repeat(pad));
        out.push_str(" |");
    }
    out.push('\n');
}
