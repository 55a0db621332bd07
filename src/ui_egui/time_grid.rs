//! Time-grid geometry.
//!
//! Converts between three coordinate spaces: minute-of-day, slot index and
//! pixel offset from the top of a day column. Every conversion is total;
//! out-of-window inputs clamp to `[0, slot_count - 1]`.

use egui::{Pos2, Rect};

use crate::models::timeline::TimelineConfig;

/// Horizontal gap between cards sharing a column.
pub const LANE_GAP: f32 = 2.0;

fn clamp_slot(timeline: &TimelineConfig, slot: i32) -> i32 {
    slot.clamp(0, (timeline.slot_count() - 1).max(0))
}

/// Slot containing `minute` (minutes from midnight).
pub fn minute_to_slot(timeline: &TimelineConfig, minute: i32) -> i32 {
    clamp_slot(
        timeline,
        (minute - timeline.day_start()).div_euclid(timeline.block_size()),
    )
}

/// Minute-of-day at which `slot` begins.
pub fn slot_to_minute(timeline: &TimelineConfig, slot: i32) -> i32 {
    timeline.day_start() + clamp_slot(timeline, slot) * timeline.block_size()
}

/// Pixel offset of the top of `slot`.
pub fn slot_to_offset(timeline: &TimelineConfig, slot: i32) -> f32 {
    clamp_slot(timeline, slot) as f32 * timeline.slot_height()
}

/// Slot under a pixel offset measured from the column top.
pub fn offset_to_slot(timeline: &TimelineConfig, offset: f32) -> i32 {
    clamp_slot(timeline, raw_offset_to_slot(timeline, offset))
}

/// Like [`offset_to_slot`] but without clamping, for relative arithmetic.
pub fn raw_offset_to_slot(timeline: &TimelineConfig, offset: f32) -> i32 {
    if !offset.is_finite() {
        return 0;
    }
    (offset / timeline.slot_height()).floor() as i32
}

/// Pixel offset of a minute, clamped to the column. Minutes need not sit on
/// a block boundary.
pub fn minute_to_offset(timeline: &TimelineConfig, minute: i32) -> f32 {
    let minute = minute.clamp(timeline.day_start(), timeline.day_end());
    (minute - timeline.day_start()) as f32 / timeline.block_size() as f32 * timeline.slot_height()
}

/// Slots needed to hold `minutes`, rounded up, at least one.
pub fn duration_slots(timeline: &TimelineConfig, minutes: i32) -> i32 {
    let block = timeline.block_size();
    ((minutes + block - 1).div_euclid(block)).max(1)
}

/// Slot under `pointer` in a day column whose screen rect is `column`.
pub fn slot_at(timeline: &TimelineConfig, column: Rect, pointer: Pos2) -> i32 {
    offset_to_slot(timeline, pointer.y - column.top())
}

/// Screen rect of an entry card inside a day column.
///
/// `start`/`end` are minutes from midnight; the column is split evenly
/// between `lane_count` lanes.
pub fn card_rect(
    timeline: &TimelineConfig,
    column: Rect,
    start: i32,
    end: i32,
    lane: usize,
    lane_count: usize,
) -> Rect {
    let lane_count = lane_count.max(1);
    let lane = lane.min(lane_count - 1);
    let lane_width = column.width() / lane_count as f32;

    let top = column.top() + minute_to_offset(timeline, start);
    let bottom = column.top() + minute_to_offset(timeline, end);
    let left = column.left() + lane as f32 * lane_width;
    let right = if lane + 1 == lane_count {
        left + lane_width
    } else {
        left + lane_width - LANE_GAP
    };

    Rect::from_min_max(
        Pos2::new(left, top),
        Pos2::new(right.max(left), bottom.max(top + 1.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timeline::TimelineSettings;
    use egui::Vec2;

    fn business_hours() -> TimelineConfig {
        TimelineConfig::resolve(&TimelineSettings {
            day_start_minutes: 8 * 60,
            day_end_minutes: 18 * 60,
            block_size_minutes: 30,
            slot_height: 20.0,
            ..TimelineSettings::default()
        })
        .0
    }

    #[test]
    fn test_minute_slot_round_trip_on_boundaries() {
        let timeline = TimelineConfig::default();
        assert_eq!(minute_to_slot(&timeline, 570), 38);
        assert_eq!(slot_to_minute(&timeline, 38), 570);
        assert_eq!(minute_to_slot(&timeline, 584), 38);
    }

    #[test]
    fn test_out_of_window_inputs_clamp() {
        let timeline = business_hours();
        assert_eq!(timeline.slot_count(), 20);
        assert_eq!(minute_to_slot(&timeline, 0), 0);
        assert_eq!(minute_to_slot(&timeline, 1439), 19);
        assert_eq!(slot_to_minute(&timeline, -4), 480);
        assert_eq!(slot_to_minute(&timeline, 40), 1050);
        assert_eq!(offset_to_slot(&timeline, -15.0), 0);
        assert_eq!(offset_to_slot(&timeline, 10_000.0), 19);
        assert_eq!(offset_to_slot(&timeline, f32::NAN), 0);
    }

    #[test]
    fn test_offsets() {
        let timeline = business_hours();
        assert_eq!(slot_to_offset(&timeline, 3), 60.0);
        assert_eq!(offset_to_slot(&timeline, 59.9), 2);
        assert_eq!(minute_to_offset(&timeline, 8 * 60 + 45), 30.0);
        assert_eq!(minute_to_offset(&timeline, 20 * 60), 400.0);
    }

    #[test]
    fn test_duration_slots_rounds_up() {
        let timeline = TimelineConfig::default();
        assert_eq!(duration_slots(&timeline, 0), 1);
        assert_eq!(duration_slots(&timeline, 15), 1);
        assert_eq!(duration_slots(&timeline, 16), 2);
        assert_eq!(duration_slots(&timeline, 50), 4);
    }

    #[test]
    fn test_card_rect_splits_lanes() {
        let timeline = business_hours();
        let column = Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(120.0, 400.0));

        let card = card_rect(&timeline, column, 9 * 60, 10 * 60, 1, 3);
        assert_eq!(card.top(), 90.0);
        assert_eq!(card.bottom(), 130.0);
        assert_eq!(card.left(), 140.0);
        assert_eq!(card.right(), 178.0);

        let last = card_rect(&timeline, column, 9 * 60, 10 * 60, 2, 3);
        assert_eq!(last.right(), 220.0);
    }

    #[test]
    fn test_slot_at_uses_column_top() {
        let timeline = business_hours();
        let column = Rect::from_min_size(Pos2::new(0.0, 200.0), Vec2::new(100.0, 400.0));
        assert_eq!(slot_at(&timeline, column, Pos2::new(10.0, 245.0)), 2);
    }
}
