// Appointment module
// Work-log entry model shown on the calendar grid

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppointmentError {
    #[error("appointment start time is required")]
    MissingStart,
    #[error("appointment end time is required")]
    MissingEnd,
}

/// Round hours to two decimals, the precision work logs are reported in.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Hours between two instants, rounded to two decimals.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    round_hours((end - start).num_minutes() as f64 / 60.0)
}

/// A scheduled work entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub project: String,
    pub task_type: String,
    #[serde(default)]
    pub description: String,
    /// Explicit elapsed hours; `None` means derive from the duration.
    #[serde(default)]
    pub hours_override: Option<f64>,
    #[serde(default)]
    pub issue_key: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Appointment {
    /// Create a builder for constructing appointments with optional fields
    pub fn builder() -> AppointmentBuilder {
        AppointmentBuilder::new()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Elapsed hours: the override if set, else derived from the duration.
    pub fn elapsed_hours(&self) -> f64 {
        self.hours_override
            .unwrap_or_else(|| hours_between(self.start, self.end))
    }

    /// Calendar day the entry belongs to (the day it starts on).
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Start as minutes from midnight.
    pub fn start_minute(&self) -> i32 {
        minute_of_day(self.start)
    }

    /// End as minutes from the start day's midnight.
    ///
    /// An entry ending at the following midnight reports 1440.
    pub fn end_minute(&self) -> i32 {
        let midnight = self.date().and_time(NaiveTime::default());
        (self.end - midnight).num_minutes().clamp(0, i32::MAX as i64) as i32
    }

    /// Enforce the duration floor: at least one block long.
    pub fn normalize(mut self, block_size: i32) -> Self {
        self.end = normalized_end(self.start, self.end, block_size);
        self
    }

    /// True if `[start, end)` intersects the other entry's range.
    pub fn overlaps(&self, other: &Appointment) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Minutes from midnight for an instant.
pub fn minute_of_day(instant: NaiveDateTime) -> i32 {
    (instant.hour() * 60 + instant.minute()) as i32
}

/// Instant on `date` at `minute` minutes from midnight. 1440 maps to the
/// following midnight.
pub fn at_minute(date: NaiveDate, minute: i32) -> NaiveDateTime {
    date.and_time(NaiveTime::default()) + Duration::minutes(minute as i64)
}

/// End corrected so that `end - start >= block_size` minutes.
pub fn normalized_end(start: NaiveDateTime, end: NaiveDateTime, block_size: i32) -> NaiveDateTime {
    let floor = start + Duration::minutes(block_size.max(1) as i64);
    if end < floor {
        floor
    } else {
        end
    }
}

/// An appointment that has not been assigned an id yet.
///
/// Produced by create-by-drag; the store that accepts it owns id assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub project: String,
    pub task_type: String,
    pub description: String,
    pub issue_key: Option<String>,
}

impl AppointmentDraft {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn into_appointment(self, id: i64) -> Appointment {
        Appointment {
            id,
            title: self.title,
            start: self.start,
            end: self.end,
            project: self.project,
            task_type: self.task_type,
            description: self.description,
            hours_override: None,
            issue_key: self.issue_key,
            completed: false,
        }
    }
}

/// Builder for creating appointments with optional fields
#[derive(Default)]
pub struct AppointmentBuilder {
    id: i64,
    title: String,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    project: String,
    task_type: String,
    description: String,
    hours_override: Option<f64>,
    issue_key: Option<String>,
    completed: bool,
}

impl AppointmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn task_type(mut self, task_type: impl Into<String>) -> Self {
        self.task_type = task_type.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set elapsed hours explicitly instead of deriving them
    pub fn hours(mut self, hours: f64) -> Self {
        self.hours_override = Some(hours);
        self
    }

    pub fn issue_key(mut self, key: impl Into<String>) -> Self {
        self.issue_key = Some(key.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Build the appointment, enforcing the one-block duration floor.
    pub fn build(self, block_size: i32) -> Result<Appointment, AppointmentError> {
        let start = self.start.ok_or(AppointmentError::MissingStart)?;
        let end = self.end.ok_or(AppointmentError::MissingEnd)?;

        Ok(Appointment {
            id: self.id,
            title: self.title,
            start,
            end,
            project: self.project,
            task_type: self.task_type,
            description: self.description,
            hours_override: self.hours_override,
            issue_key: self.issue_key,
            completed: self.completed,
        }
        .normalize(block_size))
    }
}
