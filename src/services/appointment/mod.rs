//! Mutation boundary between the gesture engine and whoever owns the
//! appointment list.
//!
//! The engine never stores anything itself. Completed gestures are handed to
//! a [`ScheduleHandler`]; [`AppointmentStore`] is the in-memory reference
//! implementation used by the demo host and the tests.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::models::appointment::{Appointment, AppointmentDraft};

/// Where a create-by-drag gesture placed the new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateContext {
    pub date: NaiveDate,
    pub slot: i32,
    pub duration_minutes: i32,
}

/// Receives committed gestures. Each method is called at most once per
/// completed gesture.
pub trait ScheduleHandler {
    fn on_move(&mut self, entry_id: i64, new_start: NaiveDateTime);
    fn on_resize(&mut self, entry_id: i64, new_start: NaiveDateTime, new_end: NaiveDateTime);
    fn on_create(&mut self, draft: AppointmentDraft, context: CreateContext);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("appointment {0} not found")]
    NotFound(i64),
}

/// In-memory appointment list owned by the caller.
#[derive(Debug, Clone, Default)]
pub struct AppointmentStore {
    appointments: Vec<Appointment>,
    block_size: i32,
    /// Id of the most recent change, for settle highlighting
    last_changed: Option<i64>,
}

impl AppointmentStore {
    pub fn new(block_size: i32) -> Self {
        Self::with_appointments(Vec::new(), block_size)
    }

    /// Seed the store with an explicit initial list.
    pub fn with_appointments(appointments: Vec<Appointment>, block_size: i32) -> Self {
        let appointments = appointments
            .into_iter()
            .map(|appt| appt.normalize(block_size))
            .collect();
        Self {
            appointments,
            block_size,
            last_changed: None,
        }
    }

    /// Load a JSON array of appointments.
    pub fn load_json(path: &Path, block_size: i32) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read appointments from {}", path.display()))?;
        let appointments: Vec<Appointment> = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse appointments from {}", path.display()))?;
        log::info!(
            "Loaded {} appointments from {}",
            appointments.len(),
            path.display()
        );
        Ok(Self::with_appointments(appointments, block_size))
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn get(&self, id: i64) -> Option<&Appointment> {
        self.appointments.iter().find(|appt| appt.id == id)
    }

    /// Take the id of the last changed entry, if any.
    pub fn take_last_changed(&mut self) -> Option<i64> {
        self.last_changed.take()
    }

    fn get_mut(&mut self, id: i64) -> Result<&mut Appointment, StoreError> {
        self.appointments
            .iter_mut()
            .find(|appt| appt.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn next_id(&self) -> i64 {
        self.appointments.iter().map(|appt| appt.id).max().unwrap_or(0) + 1
    }

    /// Move an entry, keeping its duration.
    pub fn move_to(&mut self, id: i64, new_start: NaiveDateTime) -> Result<(), StoreError> {
        let appt = self.get_mut(id)?;
        let duration = appt.duration();
        appt.start = new_start;
        appt.end = new_start + duration;
        self.last_changed = Some(id);
        Ok(())
    }

    /// Set a new range. Elapsed hours follow the new duration.
    pub fn resize(
        &mut self,
        id: i64,
        new_start: NaiveDateTime,
        new_end: NaiveDateTime,
    ) -> Result<(), StoreError> {
        let block_size = self.block_size;
        let appt = self.get_mut(id)?;
        appt.start = new_start;
        appt.end = new_end;
        appt.hours_override = None;
        *appt = appt.clone().normalize(block_size);
        self.last_changed = Some(id);
        Ok(())
    }

    /// Accept a draft and return the id assigned to it.
    pub fn insert(&mut self, draft: AppointmentDraft) -> i64 {
        let id = self.next_id();
        self.appointments
            .push(draft.into_appointment(id).normalize(self.block_size));
        self.last_changed = Some(id);
        id
    }

    /// Replace an entry wholesale (edit dialog result).
    pub fn update(&mut self, appointment: Appointment) -> Result<(), StoreError> {
        let block_size = self.block_size;
        let id = appointment.id;
        let slot = self.get_mut(id)?;
        *slot = appointment.normalize(block_size);
        self.last_changed = Some(id);
        Ok(())
    }

    pub fn delete(&mut self, id: i64) -> Result<Appointment, StoreError> {
        let index = self
            .appointments
            .iter()
            .position(|appt| appt.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.appointments.remove(index))
    }

    /// Flip the completion flag and return the new value.
    pub fn toggle_complete(&mut self, id: i64) -> Result<bool, StoreError> {
        let appt = self.get_mut(id)?;
        appt.completed = !appt.completed;
        let completed = appt.completed;
        self.last_changed = Some(id);
        Ok(completed)
    }
}

impl ScheduleHandler for AppointmentStore {
    fn on_move(&mut self, entry_id: i64, new_start: NaiveDateTime) {
        if let Err(e) = self.move_to(entry_id, new_start) {
            log::warn!("Dropping move commit: {}", e);
        }
    }

    fn on_resize(&mut self, entry_id: i64, new_start: NaiveDateTime, new_end: NaiveDateTime) {
        if let Err(e) = self.resize(entry_id, new_start, new_end) {
            log::warn!("Dropping resize commit: {}", e);
        }
    }

    fn on_create(&mut self, draft: AppointmentDraft, context: CreateContext) {
        let id = self.insert(draft);
        log::info!(
            "Created appointment {} on {} at slot {} ({} min)",
            id,
            context.date,
            context.slot,
            context.duration_minutes
        );
    }
}
