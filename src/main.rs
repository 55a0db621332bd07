// Worklog Scheduler
// Demo host for the scheduling engine

use anyhow::{Context, Result};
use worklog_scheduler::models::timeline::TimelineConfig;
use worklog_scheduler::services::appointment::AppointmentStore;
use worklog_scheduler::services::settings::{
    default_settings_path, load_settings_or_default, SettingsService,
};
use worklog_scheduler::ui_egui::SchedulerApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Worklog Scheduler");

    let settings_service = SettingsService::new(default_settings_path());
    log::info!("Settings file: {}", settings_service.path().display());
    let settings = load_settings_or_default(&settings_service);
    let block_size = TimelineConfig::resolve(&settings.timeline).0.block_size();

    // Optional JSON seed: worklog-scheduler <appointments.json>
    let store = match std::env::args_os().nth(1) {
        Some(path) => AppointmentStore::load_json(path.as_ref(), block_size)
            .context("failed to load seed appointments")?,
        None => AppointmentStore::new(block_size),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Worklog Scheduler",
        options,
        Box::new(move |cc| {
            Ok(Box::new(SchedulerApp::new(
                cc,
                settings,
                settings_service,
                store,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("eframe failed: {err}"))
}
