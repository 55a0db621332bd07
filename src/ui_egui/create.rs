// Create-by-drag
//
// Pressing on empty grid space and dragging selects a range of slots in one
// day column. Releasing turns the selection into a new entry draft; a plain
// click gets the default duration instead of a single slot.

use chrono::NaiveDate;
use egui::Pos2;

use super::drop_zone::{DropZoneRegistry, ZoneKey};
use super::time_grid::{duration_slots, slot_at, slot_to_minute};
use crate::models::appointment::{at_minute, AppointmentDraft};
use crate::models::filter::CreateDefaults;
use crate::models::timeline::TimelineConfig;
use crate::services::appointment::CreateContext;

/// In-progress slot selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreateDraft {
    pub date: NaiveDate,
    pub anchor_slot: i32,
    pub end_slot: i32,
}

impl CreateDraft {
    /// Selected slots as `(first, last)`, whichever way the pointer went.
    pub fn range(&self) -> (i32, i32) {
        (
            self.anchor_slot.min(self.end_slot),
            self.anchor_slot.max(self.end_slot),
        )
    }

    pub fn span(&self) -> i32 {
        let (first, last) = self.range();
        last - first + 1
    }
}

/// A new entry ready to be handed to the schedule handler
#[derive(Clone, Debug, PartialEq)]
pub struct CreateCommit {
    pub draft: AppointmentDraft,
    pub context: CreateContext,
}

/// Start slot and duration in minutes for a selection of `first..=last`.
///
/// A single-slot selection is treated as a click and gets
/// `default_minutes`. The duration rounds to the nearest whole block and is
/// kept between one block and the whole day window; the start slot moves up
/// if needed so the entry ends inside the window.
pub fn plan_creation(
    timeline: &TimelineConfig,
    first: i32,
    last: i32,
    default_minutes: i32,
) -> (i32, i32) {
    let block = timeline.block_size();
    let span = last - first + 1;
    let requested = if span <= 1 {
        default_minutes
    } else {
        span * block
    };

    let rounded = (requested + block / 2).div_euclid(block) * block;
    let duration = rounded.clamp(block, timeline.window_minutes().max(block));

    let max_start = (timeline.slot_count() - duration_slots(timeline, duration)).max(0);
    (first.clamp(0, max_start), duration)
}

#[derive(Debug, Default)]
pub struct CreateController {
    draft: Option<CreateDraft>,
}

impl CreateController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&CreateDraft> {
        self.draft.as_ref()
    }

    /// Start selecting at `slot` in the column for `date`.
    pub fn begin(&mut self, date: NaiveDate, slot: i32, timeline: &TimelineConfig) {
        let slot = slot.clamp(0, (timeline.slot_count() - 1).max(0));
        self.draft = Some(CreateDraft {
            date,
            anchor_slot: slot,
            end_slot: slot,
        });
    }

    /// Extend the selection to the slot under `pointer`.
    ///
    /// The slot is always measured against the column the gesture started in,
    /// so wandering into a neighbouring day only changes the time.
    pub fn update(&mut self, pointer: Pos2, zones: &DropZoneRegistry, timeline: &TimelineConfig) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        if !pointer.y.is_finite() {
            return;
        }
        if let Some(column) = zones.rect_for(ZoneKey::Column(draft.date)) {
            draft.end_slot = slot_at(timeline, column, pointer);
        }
    }

    /// Release: turn the selection into a draft entry and reset.
    pub fn finish(
        &mut self,
        timeline: &TimelineConfig,
        defaults: &CreateDefaults,
        default_minutes: i32,
    ) -> Option<CreateCommit> {
        let draft = self.draft.take()?;
        let (first, last) = draft.range();
        let (slot, duration) = plan_creation(timeline, first, last, default_minutes);

        let start = at_minute(draft.date, slot_to_minute(timeline, slot));
        let end = start + chrono::Duration::minutes(duration as i64);

        Some(CreateCommit {
            draft: AppointmentDraft {
                title: String::new(),
                start,
                end,
                project: defaults.project.clone(),
                task_type: defaults.task_type.clone(),
                description: String::new(),
                issue_key: None,
            },
            context: CreateContext {
                date: draft.date,
                slot,
                duration_minutes: duration,
            },
        })
    }

    pub fn cancel(&mut self) -> bool {
        self.draft.take().is_some()
    }
}
