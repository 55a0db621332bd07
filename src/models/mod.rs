// Module exports for models

pub mod appointment;
pub mod filter;
pub mod settings;
pub mod timeline;
pub mod ui;
