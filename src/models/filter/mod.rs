//! Filter selection applied to the visible appointment set.
//!
//! The filter controls themselves live outside the engine; this is only the
//! selection they produce and the predicate that applies it.

use serde::{Deserialize, Serialize};

use crate::models::appointment::Appointment;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub project: Option<String>,
    pub task_type: Option<String>,
    /// Case-insensitive text matched against title, description and issue key
    pub search: Option<String>,
    pub hide_completed: bool,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.project.is_none()
            && self.task_type.is_none()
            && self.search.as_deref().map_or(true, |s| s.trim().is_empty())
            && !self.hide_completed
    }

    pub fn matches(&self, appointment: &Appointment) -> bool {
        if let Some(ref project) = self.project {
            if &appointment.project != project {
                return false;
            }
        }
        if let Some(ref task_type) = self.task_type {
            if &appointment.task_type != task_type {
                return false;
            }
        }
        if self.hide_completed && appointment.completed {
            return false;
        }
        if let Some(needle) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = needle.to_lowercase();
            let in_title = appointment.title.to_lowercase().contains(&needle);
            let in_description = appointment.description.to_lowercase().contains(&needle);
            let in_issue = appointment
                .issue_key
                .as_deref()
                .map_or(false, |key| key.to_lowercase().contains(&needle));
            if !(in_title || in_description || in_issue) {
                return false;
            }
        }
        true
    }
}

/// Project and task type given to entries created by dragging on the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDefaults {
    pub project: String,
    pub task_type: String,
}

impl CreateDefaults {
    /// Use the active filter selection when set, else the first option.
    pub fn resolve(filter: &FilterSelection, projects: &[String], task_types: &[String]) -> Self {
        let project = filter
            .project
            .clone()
            .or_else(|| projects.first().cloned())
            .unwrap_or_default();
        let task_type = filter
            .task_type
            .clone()
            .or_else(|| task_types.first().cloned())
            .unwrap_or_default();
        Self { project, task_type }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Appointment {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Appointment::builder()
            .id(1)
            .title("Review pull request")
            .start(start)
            .end(start + chrono::Duration::hours(1))
            .project("atlas")
            .task_type("review")
            .issue_key("ATL-42")
            .build(15)
            .unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = FilterSelection::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&sample()));
    }

    #[test]
    fn test_project_and_task_filters() {
        let mut filter = FilterSelection {
            project: Some("atlas".into()),
            ..Default::default()
        };
        assert!(filter.matches(&sample()));
        filter.task_type = Some("dev".into());
        assert!(!filter.matches(&sample()));
    }

    #[test]
    fn test_search_is_case_insensitive_and_checks_issue_key() {
        let filter = FilterSelection {
            search: Some("atl-4".into()),
            ..Default::default()
        };
        assert!(filter.matches(&sample()));

        let filter = FilterSelection {
            search: Some("deploy".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&sample()));
    }

    #[test]
    fn test_hide_completed() {
        let filter = FilterSelection {
            hide_completed: true,
            ..Default::default()
        };
        let mut appt = sample();
        assert!(filter.matches(&appt));
        appt.completed = true;
        assert!(!filter.matches(&appt));
    }

    #[test]
    fn test_create_defaults_prefer_filter_selection() {
        let projects = vec!["atlas".to_string(), "borealis".to_string()];
        let tasks = vec!["dev".to_string(), "review".to_string()];

        let defaults = CreateDefaults::resolve(&FilterSelection::default(), &projects, &tasks);
        assert_eq!(defaults.project, "atlas");
        assert_eq!(defaults.task_type, "dev");

        let filter = FilterSelection {
            project: Some("borealis".into()),
            ..Default::default()
        };
        let defaults = CreateDefaults::resolve(&filter, &projects, &tasks);
        assert_eq!(defaults.project, "borealis");
        assert_eq!(defaults.task_type, "dev");

        let defaults = CreateDefaults::resolve(&FilterSelection::default(), &[], &[]);
        assert_eq!(defaults, CreateDefaults::default());
    }
}
