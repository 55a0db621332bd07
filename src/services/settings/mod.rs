mod service;

pub use service::{default_settings_path, load_settings_or_default, SettingsService};
