// Test fixtures - reusable test data
// Provides a week of day columns and a few appointments for gesture tests

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use egui::{Pos2, Rect, Vec2};
use worklog_scheduler::models::appointment::{at_minute, Appointment};
use worklog_scheduler::models::filter::CreateDefaults;
use worklog_scheduler::models::timeline::TimelineConfig;
use worklog_scheduler::models::ui::ViewType;
use worklog_scheduler::ui_egui::drop_zone::{DropZoneRegistry, ZoneKey};
use worklog_scheduler::ui_egui::gesture::GestureEnv;
use worklog_scheduler::ui_egui::time_grid::card_rect;

pub const COLUMN_WIDTH: f32 = 120.0;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, Mar 10 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    pub fn weekday(offset: i64) -> NaiveDate {
        monday() + Duration::days(offset)
    }

    pub fn at(offset: i64, hour: i32, minute: i32) -> NaiveDateTime {
        at_minute(weekday(offset), hour * 60 + minute)
    }
}

/// Sample appointments for testing
pub mod appointments {
    use super::*;

    pub fn entry(id: i64, day: i64, start_minute: i32, end_minute: i32) -> Appointment {
        Appointment::builder()
            .id(id)
            .title(format!("Entry {}", id))
            .start(at_minute(dates::weekday(day), start_minute))
            .end(at_minute(dates::weekday(day), end_minute))
            .project("Internal")
            .task_type("Development")
            .build(15)
            .unwrap()
    }

    /// Standup 09:00-09:15 and review 09:00-10:00 on Monday, planning
    /// 14:00-15:30 on Tuesday.
    pub fn week() -> Vec<Appointment> {
        vec![
            entry(1, 0, 9 * 60, 9 * 60 + 15),
            entry(2, 0, 9 * 60, 10 * 60),
            entry(3, 1, 14 * 60, 15 * 60 + 30),
        ]
    }
}

/// A week of day columns laid out side by side from x = 0.
pub struct WeekGrid {
    pub timeline: TimelineConfig,
    pub zones: DropZoneRegistry,
    pub appointments: Vec<Appointment>,
    pub defaults: CreateDefaults,
}

impl WeekGrid {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        let timeline = TimelineConfig::default();
        let mut zones = DropZoneRegistry::new();
        for day in 0..7 {
            zones.register(ZoneKey::Column(dates::weekday(day)), Self::column_at(&timeline, day));
        }
        Self {
            timeline,
            zones,
            appointments,
            defaults: CreateDefaults {
                project: "Internal".into(),
                task_type: "Development".into(),
            },
        }
    }

    fn column_at(timeline: &TimelineConfig, day: i64) -> Rect {
        Rect::from_min_size(
            Pos2::new(day as f32 * COLUMN_WIDTH, 0.0),
            Vec2::new(COLUMN_WIDTH, timeline.column_height()),
        )
    }

    pub fn env(&self, view: ViewType) -> GestureEnv<'_> {
        GestureEnv {
            appointments: &self.appointments,
            timeline: &self.timeline,
            view,
            zones: &self.zones,
            defaults: &self.defaults,
            default_create_minutes: 30,
        }
    }

    pub fn column(&self, day: i64) -> Rect {
        self.zones
            .rect_for(ZoneKey::Column(dates::weekday(day)))
            .unwrap()
    }

    /// Screen rect of a single-lane card for `id`.
    pub fn card(&self, id: i64) -> Rect {
        let appt = self.appointments.iter().find(|a| a.id == id).unwrap();
        let day = (appt.date() - dates::monday()).num_days();
        card_rect(
            &self.timeline,
            self.column(day),
            appt.start_minute(),
            appt.end_minute(),
            0,
            1,
        )
    }

    /// Point in the middle of `slot` in the column for `day`.
    pub fn slot_point(&self, day: i64, slot: i32) -> Pos2 {
        let column = self.column(day);
        Pos2::new(
            column.center().x,
            column.top() + (slot as f32 + 0.5) * self.timeline.slot_height(),
        )
    }
}
