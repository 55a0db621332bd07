//! Lane layout for overlapping entries within one day column.
//!
//! Entries that overlap in time are placed side by side. Each entry gets a
//! lane index; the day's lane count tells the renderer how many columns to
//! split the day into.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::models::appointment::Appointment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneAssignment {
    lanes: HashMap<i64, usize>,
    lane_count: usize,
}

impl LaneAssignment {
    /// Lane for an entry, or `None` if it was not part of the layout.
    pub fn lane_of(&self, entry_id: i64) -> Option<usize> {
        self.lanes.get(&entry_id).copied()
    }

    /// Number of lanes in the day, never less than one.
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}

impl Default for LaneAssignment {
    fn default() -> Self {
        Self {
            lanes: HashMap::new(),
            lane_count: 1,
        }
    }
}

/// Greedy earliest-fit lane packing.
///
/// Entries are stably sorted by start, so equal starts keep input order. Each
/// entry goes into the lowest lane whose last end is at or before its start;
/// otherwise a new lane opens. Sorted first-fit uses the minimum number of
/// lanes: the count equals the largest number of entries overlapping at once.
pub fn assign_lanes<'a, I>(entries: I) -> LaneAssignment
where
    I: IntoIterator<Item = &'a Appointment>,
{
    let mut sorted: Vec<&Appointment> = entries.into_iter().collect();
    sorted.sort_by_key(|appt| appt.start);

    let mut lane_ends: Vec<NaiveDateTime> = Vec::new();
    let mut lanes = HashMap::with_capacity(sorted.len());

    for appt in sorted {
        let lane = match lane_ends.iter().position(|end| *end <= appt.start) {
            Some(index) => {
                lane_ends[index] = appt.end;
                index
            }
            None => {
                lane_ends.push(appt.end);
                lane_ends.len() - 1
            }
        };
        lanes.insert(appt.id, lane);
    }

    LaneAssignment {
        lanes,
        lane_count: lane_ends.len().max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn entry(id: i64, start: (u32, u32), end: (u32, u32)) -> Appointment {
        Appointment::builder()
            .id(id)
            .start(at(start.0, start.1))
            .end(at(end.0, end.1))
            .build(15)
            .unwrap()
    }

    #[test]
    fn test_empty_day_has_one_lane() {
        let layout = assign_lanes(&Vec::<Appointment>::new());
        assert_eq!(layout.lane_count(), 1);
        assert!(layout.is_empty());
    }

    #[test]
    fn test_back_to_back_entries_share_a_lane() {
        let entries = vec![entry(1, (9, 0), (10, 0)), entry(2, (10, 0), (11, 0))];
        let layout = assign_lanes(&entries);
        assert_eq!(layout.lane_count(), 1);
        assert_eq!(layout.lane_of(1), Some(0));
        assert_eq!(layout.lane_of(2), Some(0));
    }

    #[test]
    fn test_overlaps_open_new_lanes_and_reuse_freed_ones() {
        let entries = vec![
            entry(3, (11, 0), (12, 0)),
            entry(1, (9, 0), (10, 30)),
            entry(2, (9, 30), (11, 0)),
        ];
        let layout = assign_lanes(&entries);
        assert_eq!(layout.lane_count(), 2);
        assert_eq!(layout.lane_of(1), Some(0));
        assert_eq!(layout.lane_of(2), Some(1));
        // Lane 0 frees at 10:30, before entry 3 starts
        assert_eq!(layout.lane_of(3), Some(0));
    }

    #[test]
    fn test_identical_starts_keep_input_order() {
        let entries = vec![entry(7, (9, 0), (10, 0)), entry(4, (9, 0), (9, 30))];
        let layout = assign_lanes(&entries);
        assert_eq!(layout.lane_of(7), Some(0));
        assert_eq!(layout.lane_of(4), Some(1));
        assert_eq!(layout.lane_of(99), None);
    }
}
