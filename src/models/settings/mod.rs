// Settings module
// Engine settings persisted as TOML

use serde::{Deserialize, Serialize};

use crate::models::timeline::TimelineSettings;
use crate::models::ui::ViewType;

pub const DEFAULT_CREATE_MINUTES: i32 = 30;
pub const DEFAULT_DRAG_ACTIVATION_DISTANCE: f32 = 4.0;
pub const DEFAULT_SETTLE_MILLIS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub timeline: TimelineSettings,
    /// Duration of an entry created by a click without dragging
    pub default_create_minutes: i32,
    /// Pointer travel (px) before a press on a card becomes a drag
    pub drag_activation_distance: f32,
    /// How long a card shows its settle highlight after a change
    pub settle_millis: u64,
    pub current_view: ViewType,
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u8,
    pub projects: Vec<String>,
    pub task_types: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            timeline: TimelineSettings::default(),
            default_create_minutes: DEFAULT_CREATE_MINUTES,
            drag_activation_distance: DEFAULT_DRAG_ACTIVATION_DISTANCE,
            settle_millis: DEFAULT_SETTLE_MILLIS,
            current_view: ViewType::Week,
            first_day_of_week: 1,
            projects: vec!["General".to_string()],
            task_types: vec!["Development".to_string()],
        }
    }
}

impl EngineSettings {
    /// Clamp the non-timeline values into usable ranges.
    pub fn sanitized(mut self) -> Self {
        if self.default_create_minutes <= 0 {
            log::warn!(
                "default_create_minutes {} is not positive; using {}",
                self.default_create_minutes,
                DEFAULT_CREATE_MINUTES
            );
            self.default_create_minutes = DEFAULT_CREATE_MINUTES;
        }
        if !self.drag_activation_distance.is_finite() || self.drag_activation_distance < 0.0 {
            self.drag_activation_distance = DEFAULT_DRAG_ACTIVATION_DISTANCE;
        }
        self.first_day_of_week %= 7;
        self
    }
}
