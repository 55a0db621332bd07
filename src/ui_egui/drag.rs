use chrono::{Duration, NaiveDate, NaiveDateTime};
use egui::{Pos2, Rect, Vec2};

use super::drop_zone::{DropZoneRegistry, ZoneKey};
use super::time_grid::{duration_slots, raw_offset_to_slot, slot_to_minute};
use crate::models::appointment::{at_minute, Appointment};
use crate::models::timeline::TimelineConfig;
use crate::models::ui::ViewType;

/// Where a dragged card would land if released now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Top slot of the card in a grid column
    Slot { date: NaiveDate, slot: i32 },
    /// A month-view day cell; time of day is kept
    Cell { date: NaiveDate },
}

impl DropTarget {
    pub fn date(&self) -> NaiveDate {
        match self {
            DropTarget::Slot { date, .. } | DropTarget::Cell { date } => *date,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    /// Pressed on a card but not yet past the activation distance
    Armed,
    Dragging,
}

#[derive(Clone, Debug)]
pub struct MoveDraft {
    pub entry_id: i64,
    pub original_start: NaiveDateTime,
    pub original_end: NaiveDateTime,
    pub duration: Duration,
    /// Pointer position at pointer-down
    pub origin: Pos2,
    /// Cumulative pointer delta since `origin`
    pub delta: Vec2,
    /// Grab point relative to the card's top-left corner
    pub anchor: Vec2,
    pub card_size: Vec2,
    /// Whole slots between the card top and the grab point
    pub anchor_slots: i32,
    /// Slots the entry covers (rounded up)
    pub entry_slots: i32,
    pub drop_target: Option<DropTarget>,
    pub view: ViewType,
}

impl MoveDraft {
    pub fn pointer_pos(&self) -> Pos2 {
        self.origin + self.delta
    }

    /// Where to paint the floating card so it stays under the grab point.
    pub fn overlay_rect(&self) -> Rect {
        Rect::from_min_size(self.pointer_pos() - self.anchor, self.card_size)
    }

    /// Start the entry would get if dropped on the current target.
    pub fn candidate_start(&self, timeline: &TimelineConfig) -> Option<NaiveDateTime> {
        self.drop_target.map(|target| match target {
            DropTarget::Slot { date, slot } => at_minute(date, slot_to_minute(timeline, slot)),
            DropTarget::Cell { date } => date.and_time(self.original_start.time()),
        })
    }
}

/// A move the user released onto a valid drop zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveCommit {
    pub entry_id: i64,
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
}

/// State machine for moving a card by dragging its body.
#[derive(Debug)]
pub struct DragController {
    draft: Option<MoveDraft>,
    dragging: bool,
    activation_distance: f32,
}

impl DragController {
    pub fn new(activation_distance: f32) -> Self {
        Self {
            draft: None,
            dragging: false,
            activation_distance: activation_distance.max(0.0),
        }
    }

    pub fn phase(&self) -> DragPhase {
        match (&self.draft, self.dragging) {
            (None, _) => DragPhase::Idle,
            (Some(_), false) => DragPhase::Armed,
            (Some(_), true) => DragPhase::Dragging,
        }
    }

    pub fn is_active(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&MoveDraft> {
        self.draft.as_ref()
    }

    /// Arm a move from a pointer-down on a card body.
    pub fn begin(
        &mut self,
        appointment: &Appointment,
        card_rect: Rect,
        pointer: Pos2,
        view: ViewType,
        timeline: &TimelineConfig,
    ) {
        let anchor = pointer - card_rect.min;
        let duration = appointment.duration();
        self.draft = Some(MoveDraft {
            entry_id: appointment.id,
            original_start: appointment.start,
            original_end: appointment.end,
            duration,
            origin: pointer,
            delta: Vec2::ZERO,
            anchor,
            card_size: card_rect.size(),
            anchor_slots: raw_offset_to_slot(timeline, anchor.y).max(0),
            entry_slots: duration_slots(timeline, duration.num_minutes() as i32),
            drop_target: None,
            view,
        });
        self.dragging = false;
    }

    /// Apply the cumulative pointer delta since pointer-down.
    ///
    /// The drop zone is re-resolved from the registry on every call.
    pub fn update(&mut self, delta: Vec2, zones: &DropZoneRegistry, timeline: &TimelineConfig) {
        let activation_distance = self.activation_distance;
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        draft.delta = delta;

        if !self.dragging {
            if delta.length() < activation_distance {
                return;
            }
            self.dragging = true;
            log::debug!("Drag started for appointment {}", draft.entry_id);
        }

        let pointer = draft.pointer_pos();
        let (is_grid, entry_slots, anchor_slots) =
            (draft.view.is_grid(), draft.entry_slots, draft.anchor_slots);
        let zone = zones.resolve(pointer);
        draft.drop_target = zone.and_then(|zone| match (zone.key, is_grid) {
            (ZoneKey::Column(date), true) => {
                let pointer_slot = raw_offset_to_slot(timeline, pointer.y - zone.rect.top());
                let max_slot = (timeline.slot_count() - entry_slots).max(0);
                let slot = (pointer_slot - anchor_slots).clamp(0, max_slot);
                Some(DropTarget::Slot { date, slot })
            }
            (ZoneKey::Cell(date), false) => Some(DropTarget::Cell { date }),
            _ => None,
        });
    }

    /// Release: returns the move to commit, if any, and resets to idle.
    pub fn finish(&mut self, timeline: &TimelineConfig) -> Option<MoveCommit> {
        let was_dragging = std::mem::replace(&mut self.dragging, false);
        let draft = self.draft.take()?;

        if !was_dragging {
            return None;
        }
        let Some(new_start) = draft.candidate_start(timeline) else {
            log::debug!(
                "Drag of appointment {} released outside any drop zone",
                draft.entry_id
            );
            return None;
        };
        if new_start == draft.original_start {
            return None;
        }

        Some(MoveCommit {
            entry_id: draft.entry_id,
            new_start,
            new_end: new_start + draft.duration,
        })
    }

    /// Drop any in-flight move. Returns true if something was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.dragging = false;
        self.draft.take().is_some()
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(crate::models::settings::DEFAULT_DRAG_ACTIVATION_DISTANCE)
    }
}
