// UI models module
// View modes the calendar can show

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewType {
    Day,
    #[default]
    Week,
    WorkWeek,
    Month,
}

impl ViewType {
    pub const ALL: [ViewType; 4] = [
        ViewType::Day,
        ViewType::Week,
        ViewType::WorkWeek,
        ViewType::Month,
    ];

    /// Day, week and work-week render a slot grid; month renders day cells.
    pub fn is_grid(&self) -> bool {
        !matches!(self, ViewType::Month)
    }

    pub fn supports_resize(&self) -> bool {
        self.is_grid()
    }

    pub fn supports_create(&self) -> bool {
        self.is_grid()
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewType::Day => "Day",
            ViewType::Week => "Week",
            ViewType::WorkWeek => "Work Week",
            ViewType::Month => "Month",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_grid_views_allow_resize_and_create() {
        for view in ViewType::ALL {
            assert_eq!(view.supports_resize(), view != ViewType::Month);
            assert_eq!(view.supports_create(), view != ViewType::Month);
        }
    }
}
