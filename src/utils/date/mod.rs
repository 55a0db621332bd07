// Date utility functions
// Visible date ranges and navigation for each view

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::models::ui::ViewType;

/// Calculate the start of the week containing the given date.
///
/// `first_day_of_week`: 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Days a view shows around the anchor date, in display order.
///
/// Month view always returns a 6×7 grid so the layout doesn't jump between
/// months.
pub fn visible_dates(view: ViewType, anchor: NaiveDate, first_day_of_week: u8) -> Vec<NaiveDate> {
    match view {
        ViewType::Day => vec![anchor],
        ViewType::Week => {
            let start = get_week_start(anchor, first_day_of_week);
            (0..7).map(|offset| start + Duration::days(offset)).collect()
        }
        ViewType::WorkWeek => {
            let monday = get_week_start(anchor, 1);
            (0..5).map(|offset| monday + Duration::days(offset)).collect()
        }
        ViewType::Month => {
            let start = get_week_start(month_start(anchor), first_day_of_week);
            (0..42).map(|offset| start + Duration::days(offset)).collect()
        }
    }
}

/// Move the anchor date one page forward (`forward`) or back.
pub fn step_anchor(view: ViewType, anchor: NaiveDate, forward: bool) -> NaiveDate {
    match view {
        ViewType::Day => {
            if forward {
                anchor + Duration::days(1)
            } else {
                anchor - Duration::days(1)
            }
        }
        ViewType::Week | ViewType::WorkWeek => {
            if forward {
                anchor + Duration::days(7)
            } else {
                anchor - Duration::days(7)
            }
        }
        ViewType::Month => {
            let first = month_start(anchor);
            let stepped = if forward {
                first.checked_add_months(Months::new(1))
            } else {
                first.checked_sub_months(Months::new(1))
            };
            stepped.unwrap_or(first)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_get_week_start_sunday() {
        // Wednesday, Dec 4, 2024
        assert_eq!(get_week_start(date(2024, 12, 4), 0), date(2024, 12, 1));
    }

    #[test]
    fn test_get_week_start_monday() {
        assert_eq!(get_week_start(date(2024, 12, 4), 1), date(2024, 12, 2));
    }

    #[test]
    fn test_work_week_is_monday_to_friday() {
        let dates = visible_dates(ViewType::WorkWeek, date(2024, 12, 8), 0);
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0], date(2024, 12, 2));
        assert_eq!(dates[4], date(2024, 12, 6));
    }

    #[test]
    fn test_month_grid_covers_whole_month() {
        let dates = visible_dates(ViewType::Month, date(2025, 2, 14), 1);
        assert_eq!(dates.len(), 42);
        assert!(dates.contains(&date(2025, 2, 1)));
        assert!(dates.contains(&date(2025, 2, 28)));
        assert_eq!(dates[0], date(2025, 1, 27));
    }

    #[test]
    fn test_step_anchor() {
        assert_eq!(step_anchor(ViewType::Day, date(2025, 1, 31), true), date(2025, 2, 1));
        assert_eq!(step_anchor(ViewType::Week, date(2025, 1, 31), false), date(2025, 1, 24));
        assert_eq!(step_anchor(ViewType::Month, date(2025, 1, 31), true), date(2025, 2, 1));
        assert_eq!(step_anchor(ViewType::Month, date(2025, 1, 31), false), date(2024, 12, 1));
    }
}
