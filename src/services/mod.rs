// Service module exports

pub mod appointment;
pub mod layout;
pub mod schedule;
pub mod settings;
