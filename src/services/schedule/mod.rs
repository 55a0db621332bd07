//! Pure, per-frame view of the schedule.
//!
//! Everything the views need (which days are shown, which entries pass the
//! filter, how entries stack into lanes) is derived here from an immutable
//! snapshot. Nothing is cached; the host recomputes it each frame.

use chrono::NaiveDate;

use crate::models::appointment::Appointment;
use crate::models::filter::FilterSelection;
use crate::models::timeline::TimelineConfig;
use crate::models::ui::ViewType;
use crate::services::layout::{assign_lanes, LaneAssignment};
use crate::utils::date::visible_dates;

#[derive(Debug, Clone, Copy)]
pub struct ScheduleSnapshot<'a> {
    pub appointments: &'a [Appointment],
    pub filter: &'a FilterSelection,
    pub timeline: &'a TimelineConfig,
    pub view: ViewType,
    pub anchor: NaiveDate,
    pub first_day_of_week: u8,
}

/// Entries of one visible day together with their lane layout.
#[derive(Debug, Clone)]
pub struct DayLayout<'a> {
    pub date: NaiveDate,
    pub entries: Vec<&'a Appointment>,
    pub lanes: LaneAssignment,
}

impl<'a> ScheduleSnapshot<'a> {
    pub fn visible_dates(&self) -> Vec<NaiveDate> {
        visible_dates(self.view, self.anchor, self.first_day_of_week)
    }

    /// Appointments that pass the filter, in snapshot order.
    pub fn filtered(&self) -> impl Iterator<Item = &'a Appointment> {
        let filter = self.filter;
        self.appointments
            .iter()
            .filter(move |appt| filter.matches(appt))
    }

    /// Filtered entries starting on `date`, sorted by start (stable).
    pub fn entries_for_day(&self, date: NaiveDate) -> Vec<&'a Appointment> {
        let mut entries: Vec<&'a Appointment> =
            self.filtered().filter(|appt| appt.date() == date).collect();
        entries.sort_by_key(|appt| appt.start);
        entries
    }

    pub fn day_layout(&self, date: NaiveDate) -> DayLayout<'a> {
        let entries = self.entries_for_day(date);
        let lanes = assign_lanes(entries.iter().copied());
        DayLayout {
            date,
            entries,
            lanes,
        }
    }

    pub fn day_layouts(&self) -> Vec<DayLayout<'a>> {
        self.visible_dates()
            .into_iter()
            .map(|date| self.day_layout(date))
            .collect()
    }

    /// Total elapsed hours of the filtered entries on `date`.
    pub fn hours_for_day(&self, date: NaiveDate) -> f64 {
        self.entries_for_day(date)
            .iter()
            .map(|appt| appt.elapsed_hours())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sample() -> Vec<Appointment> {
        vec![
            Appointment::builder()
                .id(1)
                .start(at(10, 11))
                .end(at(10, 12))
                .project("atlas")
                .build(15)
                .unwrap(),
            Appointment::builder()
                .id(2)
                .start(at(10, 9))
                .end(at(10, 12))
                .project("borealis")
                .build(15)
                .unwrap(),
            Appointment::builder()
                .id(3)
                .start(at(11, 9))
                .end(at(11, 9) + Duration::minutes(30))
                .project("atlas")
                .build(15)
                .unwrap(),
        ]
    }

    #[test]
    fn test_entries_for_day_are_sorted_and_filtered() {
        let appointments = sample();
        let timeline = TimelineConfig::default();
        let filter = FilterSelection::default();
        let snapshot = ScheduleSnapshot {
            appointments: &appointments,
            filter: &filter,
            timeline: &timeline,
            view: ViewType::Week,
            anchor: at(10, 0).date(),
            first_day_of_week: 1,
        };

        let ids: Vec<i64> = snapshot
            .entries_for_day(at(10, 0).date())
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);

        let layout = snapshot.day_layout(at(10, 0).date());
        assert_eq!(layout.lanes.lane_count(), 2);
        assert_eq!(snapshot.hours_for_day(at(10, 0).date()), 4.0);

        let filter = FilterSelection {
            project: Some("atlas".into()),
            ..Default::default()
        };
        let snapshot = ScheduleSnapshot {
            filter: &filter,
            ..snapshot
        };
        assert_eq!(snapshot.entries_for_day(at(10, 0).date()).len(), 1);
        assert_eq!(snapshot.day_layouts().len(), 7);
    }
}
