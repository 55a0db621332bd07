mod app;
pub mod create;
pub mod drag;
pub mod drop_zone;
pub mod gesture;
pub mod resize;
pub mod settle;
pub mod surface;
pub mod time_grid;
mod views;

pub use app::SchedulerApp;
