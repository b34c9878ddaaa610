use crate::time::ClockTime;
use chrono::{Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    /// 1 = Monday .. 7 = Sunday.
    pub day: u8,
    pub start: ClockTime,
    pub end: ClockTime,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<String>,
}

impl Event {
    /// Builds an event with a freshly generated id.
    pub fn new(title: impl Into<String>, day: u8, start: ClockTime, end: ClockTime) -> Self {
        Self {
            id: generate_event_id(),
            title: title.into(),
            day,
            start,
            end,
            location: None,
            note: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_empty(location.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = non_empty(note.into());
        self
    }

    pub fn weekday(&self) -> Option<Weekday> {
        weekday_for_day(self.day)
    }

    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

/// Raw form input for a new event, exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub day: String,
    pub start: String,
    pub end: String,
    pub location: Option<String>,
    pub note: Option<String>,
}

impl EventDraft {
    pub fn new(
        title: impl Into<String>,
        day: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            day: day.into(),
            start: start.into(),
            end: end.into(),
            location: None,
            note: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

pub fn weekday_for_day(day: u8) -> Option<Weekday> {
    let index = usize::from(day).checked_sub(1)?;
    ALL_WEEKDAYS.get(index).copied()
}

/// Random hex followed by the current Unix time in milliseconds, also hex.
pub fn generate_event_id() -> String {
    let entropy: u64 = rand::random();
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    format!("{entropy:x}{millis:x}")
}

/// Trims the value and maps blank strings to `None`.
pub(crate) fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Stored records write blank fields as `""`; read those back as `None`.
fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(non_empty))
}
